mod integral;
mod limits;
mod pid;

pub use integral::IntegralMode;
pub(crate) use integral::Integrator;
pub use limits::OutputLimits;
pub use pid::PidController;
