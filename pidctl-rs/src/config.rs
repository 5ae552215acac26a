use crate::controller::{OutputLimits, PidController};
use crate::error::Result;
use crate::prelude::Real;
use serde::{Deserialize, Serialize};

// Default gains of a controller built without explicit parameters
pub(crate) const KP: Real = 1.0;
pub(crate) const KI: Real = 0.5;
pub(crate) const KD: Real = 0.0;

/// Serializable controller parameters.
///
/// Meant to be embedded in an application's own configuration; every field is
/// optional in the serialized form. Leaving out both bounds gives an unbounded
/// controller, leaving out only one makes that side infinite.
///
/// Struct update syntax covers the partial-gain constructors, with `ki` and
/// `kd` falling back to their defaults:
///
/// ```
/// use pidctl::prelude::*;
///
/// let pid = PidConfig { kp: 2.0, ..Default::default() }.build()?;
/// assert_eq!(pid.gain_integral(), 0.5);
/// assert_eq!(pid.gain_derivative(), 0.0);
/// # Ok::<(), PidError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PidConfig {
    pub kp: Real,
    pub ki: Real,
    pub kd: Real,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_min: Option<Real>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_max: Option<Real>,
}

impl Default for PidConfig {
    fn default() -> Self {
        PidConfig {
            kp: KP,
            ki: KI,
            kd: KD,
            output_min: None,
            output_max: None,
        }
    }
}

impl PidConfig {
    pub fn limits(&self) -> Result<Option<OutputLimits>> {
        match (self.output_min, self.output_max) {
            (None, None) => Ok(None),
            (min, max) => OutputLimits::new(
                min.unwrap_or(Real::NEG_INFINITY),
                max.unwrap_or(Real::INFINITY),
            )
            .map(Some),
        }
    }

    /// Create a fresh controller from these parameters.
    pub fn build(&self) -> Result<PidController> {
        Ok(match self.limits()? {
            Some(limits) => PidController::with_limits(self.kp, self.ki, self.kd, limits),
            None => PidController::new(self.kp, self.ki, self.kd),
        })
    }
}
