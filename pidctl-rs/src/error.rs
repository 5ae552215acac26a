use crate::prelude::Real;
use thiserror::Error;

/// Errors reported by the controller. Every check runs before any state is
/// mutated, so a rejected call leaves the controller exactly as it was.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PidError {
    /// Lower output bound above the upper one, or a bound that is NaN.
    #[error("invalid output bounds: min {min} is not <= max {max}")]
    InvalidBounds { min: Real, max: Real },

    /// Elapsed time that is zero, negative or not finite.
    #[error("elapsed time must be positive and finite, got {0}")]
    InvalidElapsedTime(Real),

    /// NaN or infinite set-point/process variable.
    #[error("{name} must be finite, got {value}")]
    NonFiniteInput { name: &'static str, value: Real },

    #[error("gain {name} must be finite, got {value}")]
    NonFiniteGain { name: &'static str, value: Real },

    /// Finite inputs whose integral term or unclamped output overflowed.
    #[error("control output is not finite: {0}")]
    NonFiniteOutput(Real),
}

pub type Result<T> = std::result::Result<T, PidError>;
