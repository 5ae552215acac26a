pub use crate::config::PidConfig;
pub use crate::controller::{IntegralMode, OutputLimits, PidController};
pub use crate::error::{PidError, Result};

/// Base Real type used by this crate. Uses an alias to easily change precision
/// if necessary. Only `f64` is exercised by the tests; conversions from
/// `std` types go through `as Real` so an `f32` build still compiles.
pub type Real = f64;
