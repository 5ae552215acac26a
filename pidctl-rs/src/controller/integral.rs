use crate::controller::OutputLimits;
use crate::prelude::Real;
use getset::CopyGetters;

/// Anti-windup strategy used by the integral term.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IntegralMode {
    /// Gain-weighted accumulator clamped into the output limits after every
    /// update. Used by every bounded controller.
    Clamped,

    /// Legacy behavior of unbounded controllers: a running sum of error that
    /// restarts from zero whenever the error is zero or its sign disagrees with
    /// the sign of the sum. Produces a sawtooth-like contribution that never
    /// carries past one sign cycle. Not numerically equivalent to `Clamped`.
    SignReset,
}

/// Persistent integral state.
///
/// `term` is already weighted by the integral gain at the time each increment
/// was added, so retuning the gain never rescales past contributions.
/// `error_accumulated` is the raw time-weighted error sum and is only
/// maintained in [`IntegralMode::SignReset`], where its sign drives the reset
/// rule.
#[derive(Debug, Copy, Clone, PartialEq, Default, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Integrator {
    term: Real,
    error_accumulated: Real,
}

impl Integrator {
    /// State after adding `gain × error × dt` and clamping. `self` is left
    /// untouched so the caller can discard a step that overflowed.
    pub(crate) fn step_clamped(
        &self,
        gain: Real,
        error: Real,
        dt: Real,
        limits: &OutputLimits,
    ) -> Integrator {
        Integrator {
            term: limits.clamp(self.term + gain * error * dt),
            ..*self
        }
    }

    /// State after adding `gain × error × dt`, first restarting from zero on a
    /// sign change.
    pub(crate) fn step_sign_reset(&self, gain: Real, error: Real, dt: Real) -> Integrator {
        let acc = self.error_accumulated;
        let mut next = *self;
        if error == 0.0 || (error < 0.0 && acc > 0.0) || (error > 0.0 && acc < 0.0) {
            next.reset();
        }
        next.error_accumulated += error * dt;
        next.term += gain * error * dt;
        next
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.term.is_finite() && self.error_accumulated.is_finite()
    }

    pub(crate) fn reset(&mut self) {
        *self = Integrator::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn clamped_accumulator_saturates() {
        let limits = OutputLimits::new(-2.0, 2.0).unwrap();
        let mut acc = Integrator::default();
        for _ in 0..10 {
            acc = acc.step_clamped(1.0, 1.0, 1.0, &limits);
        }
        assert_eq!(acc.term(), 2.0);
        assert_eq!(acc.error_accumulated(), 0.0);

        // One step back from saturation, not ten.
        acc = acc.step_clamped(1.0, -0.5, 1.0, &limits);
        assert_approx_eq!(acc.term(), 1.5);
    }

    #[test]
    fn step_does_not_mutate() {
        let limits = OutputLimits::new(-2.0, 2.0).unwrap();
        let acc = Integrator::default();
        let next = acc.step_clamped(1.0, 1.0, 1.0, &limits);
        assert_eq!(acc, Integrator::default());
        assert_eq!(next.term(), 1.0);

        let next = acc.step_sign_reset(1.0, -1.0, 1.0);
        assert_eq!(acc, Integrator::default());
        assert_eq!(next.term(), -1.0);
    }

    #[test]
    fn sign_reset_sawtooth() {
        let mut acc = Integrator::default();
        for expected in [1.0, 2.0, 3.0].iter() {
            acc = acc.step_sign_reset(1.0, 1.0, 1.0);
            assert_eq!(acc.term(), *expected);
        }

        // Sign flip discards the whole positive history.
        acc = acc.step_sign_reset(1.0, -0.5, 1.0);
        assert_eq!(acc.term(), -0.5);
        assert_eq!(acc.error_accumulated(), -0.5);

        // Zero error clears the accumulator.
        acc = acc.step_sign_reset(1.0, 0.0, 1.0);
        assert_eq!(acc.term(), 0.0);
        assert_eq!(acc.error_accumulated(), 0.0);
    }

    #[test]
    fn sign_reset_uses_raw_sum_not_weighted_term() {
        // Negative gain flips the weighted term but not the raw sum, so a
        // positive error keeps accumulating.
        let acc = Integrator::default()
            .step_sign_reset(-1.0, 1.0, 0.5)
            .step_sign_reset(-1.0, 1.0, 0.5);
        assert_approx_eq!(acc.term(), -1.0);
        assert_approx_eq!(acc.error_accumulated(), 1.0);
    }

    #[test]
    fn overflow_is_visible() {
        let limits = OutputLimits::new(Real::NEG_INFINITY, 50.0).unwrap();
        let acc = Integrator::default().step_clamped(1e308, -10.0, 1.0, &limits);
        assert!(!acc.is_finite());
        assert!(!Integrator::default().step_sign_reset(1e308, 10.0, 1.0).is_finite());
    }
}
