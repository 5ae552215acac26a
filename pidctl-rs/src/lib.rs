//! A discrete-time PID (Proportional, Integral, Derivative) controller.
//!
//! The crate exposes a single value type, [`PidController`], that turns the
//! difference between a set-point and a measured process value into a bounded
//! control output. It is driven by the caller once per control-loop tick:
//!
//! ```
//! use pidctl::prelude::*;
//!
//! let mut pid = PidController::new_bounded(1.0, 0.5, 0.1, -10.0, 10.0)?;
//! pid.set_setpoint(20.0);
//! pid.set_process_variable(18.5);
//! let output = pid.compute_output_dt(0.1)?;
//! assert!(output <= 10.0);
//! # Ok::<(), pidctl::error::PidError>(())
//! ```
pub mod config;
pub mod controller;
pub mod error;
pub mod prelude;

pub use controller::PidController;
