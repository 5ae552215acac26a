use crate::error::{PidError, Result};
use crate::prelude::Real;
use getset::CopyGetters;

/// Inclusive `[min, max]` bounds applied to both the integral accumulator and
/// the final control output.
///
/// Infinite bounds are allowed and give one-sided clamping.
#[derive(Debug, Copy, Clone, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct OutputLimits {
    min: Real,
    max: Real,
}

impl OutputLimits {
    /// Validate and create a new pair of bounds. Bounds are never swapped: a
    /// reversed pair is an error.
    pub fn new(min: Real, max: Real) -> Result<Self> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(PidError::InvalidBounds { min, max });
        }
        Ok(OutputLimits { min, max })
    }

    #[inline]
    pub fn clamp(&self, x: Real) -> Real {
        x.min(self.max).max(self.min)
    }

    pub fn contains(&self, x: Real) -> bool {
        self.min <= x && x <= self.max
    }
}
