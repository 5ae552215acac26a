use std::time::Duration;

use crate::config::{self, PidConfig};
use crate::controller::{IntegralMode, Integrator, OutputLimits};
use crate::error::{PidError, Result};
use crate::prelude::Real;
use getset::{CopyGetters, Setters};
use log::*;

/// A discrete-time PID (Proportional, Integral, Derivative) controller.
///
/// The caller writes the set-point (rarely) and the measured process variable
/// (every tick), then asks for the control output. The derivative term is
/// computed on the measurement, not on the error, so set-point jumps do not
/// produce a derivative kick.
///
/// Controllers built with output limits clamp both the integral accumulator
/// and the output into those limits. Controllers built without limits are
/// unbounded and use the legacy [`IntegralMode::SignReset`] accumulator.
///
/// The controller is a plain value with no interior synchronization. Share it
/// between threads only behind a lock.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters, Setters)]
pub struct PidController {
    /// Weight of the instantaneous error.
    #[getset(get_copy = "pub", set = "pub")]
    gain_proportional: Real,

    /// Weight of the accumulated error. Changes only affect future increments.
    #[getset(get_copy = "pub", set = "pub")]
    gain_integral: Real,

    /// Weight of the rate of change of the measured value.
    #[getset(get_copy = "pub", set = "pub")]
    gain_derivative: Real,

    #[getset(get_copy = "pub", set = "pub")]
    setpoint: Real,

    #[getset(get_copy = "pub")]
    process_variable: Real,

    /// Value of the process variable before its latest write.
    #[getset(get_copy = "pub")]
    process_variable_last: Real,

    #[getset(get_copy = "pub")]
    limits: Option<OutputLimits>,

    integrator: Integrator,
}

impl PidController {
    /// Create an unbounded controller. Output is never clamped and the
    /// integral uses the legacy sign-reset accumulation.
    pub fn new(kp: Real, ki: Real, kd: Real) -> Self {
        debug!("new unbounded pid: kp={}, ki={}, kd={}", kp, ki, kd);
        Self::from_parts(kp, ki, kd, None)
    }

    /// Create a controller whose integral term and output are clamped into
    /// `[out_min, out_max]`.
    pub fn new_bounded(kp: Real, ki: Real, kd: Real, out_min: Real, out_max: Real) -> Result<Self> {
        let limits = OutputLimits::new(out_min, out_max)?;
        Ok(Self::with_limits(kp, ki, kd, limits))
    }

    /// Like [`PidController::new_bounded`], from limits that were already
    /// validated.
    pub fn with_limits(kp: Real, ki: Real, kd: Real, limits: OutputLimits) -> Self {
        debug!(
            "new bounded pid: kp={}, ki={}, kd={}, limits=[{}, {}]",
            kp,
            ki,
            kd,
            limits.min(),
            limits.max()
        );
        Self::from_parts(kp, ki, kd, Some(limits))
    }

    fn from_parts(kp: Real, ki: Real, kd: Real, limits: Option<OutputLimits>) -> Self {
        PidController {
            gain_proportional: kp,
            gain_integral: ki,
            gain_derivative: kd,
            setpoint: 0.0,
            process_variable: 0.0,
            process_variable_last: 0.0,
            limits,
            integrator: Integrator::default(),
        }
    }

    /// Anti-windup strategy, fixed by the construction path.
    pub fn mode(&self) -> IntegralMode {
        match self.limits {
            Some(_) => IntegralMode::Clamped,
            None => IntegralMode::SignReset,
        }
    }

    /// Store a new measurement. The previous value is kept in
    /// `process_variable_last` so the derivative term measures the change
    /// between the last two observations.
    pub fn set_process_variable(&mut self, value: Real) -> &mut Self {
        self.process_variable_last = self.process_variable;
        self.process_variable = value;
        self
    }

    /// Retune all gains at once. The accumulated integral term is kept as is.
    pub fn set_gains(&mut self, kp: Real, ki: Real, kd: Real) -> &mut Self {
        debug!("retune pid: kp={}, ki={}, kd={}", kp, ki, kd);
        self.gain_proportional = kp;
        self.gain_integral = ki;
        self.gain_derivative = kd;
        self
    }

    /// Set-point minus process variable.
    pub fn error(&self) -> Real {
        self.setpoint - self.process_variable
    }

    pub fn proportional_term(&self) -> Real {
        self.gain_proportional * self.error()
    }

    /// Change of the measured value between its last two writes.
    pub fn rate_of_change(&self) -> Real {
        self.process_variable - self.process_variable_last
    }

    /// Integral contribution, already weighted by the integral gain.
    pub fn integral_term(&self) -> Real {
        self.integrator.term()
    }

    /// Raw time-weighted error sum. Only maintained by the sign-reset mode;
    /// always zero for bounded controllers.
    pub fn error_accumulated(&self) -> Real {
        self.integrator.error_accumulated()
    }

    /// Clear the integral state and forget the previous measurement, so the
    /// next computation has neither windup nor a derivative kick.
    pub fn reset(&mut self) {
        debug!("reset pid at process_variable={}", self.process_variable);
        self.integrator.reset();
        self.process_variable_last = self.process_variable;
    }

    /// Snapshot gains and limits, e.g. to persist the result of online tuning.
    pub fn config(&self) -> PidConfig {
        PidConfig {
            kp: self.gain_proportional,
            ki: self.gain_integral,
            kd: self.gain_derivative,
            output_min: self.limits.map(|l| l.min()),
            output_max: self.limits.map(|l| l.max()),
        }
    }

    /// Compute the control output treating the call as one unit of time.
    pub fn compute_output(&mut self) -> Result<Real> {
        self.compute_output_dt(1.0)
    }

    /// Compute the control output for a step measured with [`std::time`].
    pub fn compute_output_elapsed(&mut self, elapsed: Duration) -> Result<Real> {
        self.compute_output_dt(elapsed.as_secs_f64() as Real)
    }

    /// Compute the control output, scaling the integral and derivative terms
    /// by `dt` seconds elapsed since the previous call.
    ///
    /// Fails without touching any state if `dt` is not strictly positive and
    /// finite, if a gain or input is not finite, or if the integral term or
    /// the unclamped output overflows.
    pub fn compute_output_dt(&mut self, dt: Real) -> Result<Real> {
        self.validate(dt)?;

        let error = self.error();
        let ki = self.gain_integral;
        let integrator = match &self.limits {
            Some(limits) => self.integrator.step_clamped(ki, error, dt, limits),
            None => self.integrator.step_sign_reset(ki, error, dt),
        };
        if !integrator.is_finite() {
            warn!("rejecting pid step: integral overflowed to {}", integrator.term());
            return Err(PidError::NonFiniteOutput(integrator.term()));
        }
        let integral = integrator.term();

        // Derivative on measurement: subtracted, so it opposes the motion.
        let derivative = self.gain_derivative * self.rate_of_change() / dt;
        let proportional = self.gain_proportional * error;
        let raw = proportional + integral - derivative;
        if !raw.is_finite() {
            warn!("rejecting pid step: output overflowed to {}", raw);
            return Err(PidError::NonFiniteOutput(raw));
        }
        self.integrator = integrator;
        let output = match &self.limits {
            Some(limits) => limits.clamp(raw),
            None => raw,
        };

        trace!(
            "pid: dt={}, error={}, p={}, i={}, d={}, output={}",
            dt,
            error,
            proportional,
            integral,
            derivative,
            output
        );
        Ok(output)
    }

    fn validate(&self, dt: Real) -> Result<()> {
        if !(dt > 0.0 && dt.is_finite()) {
            warn!("rejecting pid step with elapsed time {}", dt);
            return Err(PidError::InvalidElapsedTime(dt));
        }

        let gains = [
            ("kp", self.gain_proportional),
            ("ki", self.gain_integral),
            ("kd", self.gain_derivative),
        ];
        for &(name, value) in gains.iter() {
            if !value.is_finite() {
                warn!("rejecting pid step with gain {}={}", name, value);
                return Err(PidError::NonFiniteGain { name, value });
            }
        }

        let inputs = [
            ("setpoint", self.setpoint),
            ("process_variable", self.process_variable),
            ("process_variable_last", self.process_variable_last),
        ];
        for &(name, value) in inputs.iter() {
            if !value.is_finite() {
                warn!("rejecting pid step with {}={}", name, value);
                return Err(PidError::NonFiniteInput { name, value });
            }
        }
        Ok(())
    }
}

impl Default for PidController {
    /// Unbounded controller with `kp = 1.0`, `ki = 0.5`, `kd = 0.0`.
    fn default() -> Self {
        PidController::new(config::KP, config::KI, config::KD)
    }
}
