//! PID control node.
//!
//! A node owns its private control state - the integral accumulator and the
//! last seen error - plus fixed coefficients. State is never shared across
//! nodes and is not part of any session; it mutates exactly once per
//! successful step and resets explicitly.

use tracing::trace;

use crate::error::{Error, Result};

/// Proportional, integral, and derivative coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl Default for PidGains {
    /// Matches the workflow-graph attribute defaults: a pure proportional
    /// unit controller.
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
        }
    }
}

impl PidGains {
    /// Create a gain set.
    pub const fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }
}

/// A PID controller with private integral and previous-error state.
#[derive(Debug, Clone, Default)]
pub struct PidNode {
    gains: PidGains,
    integral: f64,
    previous_error: f64,
}

impl PidNode {
    /// Create a node with zeroed state.
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            integral: 0.0,
            previous_error: 0.0,
        }
    }

    /// The node's coefficients.
    #[must_use]
    pub const fn gains(&self) -> PidGains {
        self.gains
    }

    /// Current integral accumulator.
    #[must_use]
    pub const fn integral(&self) -> f64 {
        self.integral
    }

    /// Error seen by the last successful step.
    #[must_use]
    pub const fn previous_error(&self) -> f64 {
        self.previous_error
    }

    /// Zero the private state, keeping the gains.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.previous_error = 0.0;
    }

    /// One deterministic control step.
    ///
    /// Returns `kp*e + ki*acc + kd*(e - e_prev)/dt` where `acc` is the
    /// integral accumulator after adding `e*dt`. The accumulator and the
    /// previous error update exactly once per successful call.
    ///
    /// # Errors
    ///
    /// [`Error::DivisionByZero`] when `dt == 0`, checked before any state
    /// mutation - the node is left exactly as it was.
    pub fn step(&mut self, error: f64, dt: f64) -> Result<f64> {
        if dt == 0.0 {
            return Err(Error::DivisionByZero);
        }
        let proportional = self.gains.kp * error;
        self.integral += error * dt;
        let integral = self.gains.ki * self.integral;
        let derivative = self.gains.kd * (error - self.previous_error) / dt;
        self.previous_error = error;
        let output = proportional + integral + derivative;
        trace!(error, dt, output, "PID step");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn default_gains_are_pure_proportional() {
        let gains = PidGains::default();
        assert_eq!(gains.kp, 1.0);
        assert_eq!(gains.ki, 0.0);
        assert_eq!(gains.kd, 0.0);

        let mut node = PidNode::default();
        assert_close(node.step(3.5, 1.0).unwrap(), 3.5);
    }

    #[test]
    fn reference_trajectory() {
        let mut node = PidNode::new(PidGains::new(2.0, 0.5, 0.1));
        let errors = [5.0, 4.0, 3.0, 2.0, 1.0];
        let expected_integral = [5.0, 9.0, 12.0, 14.0, 15.0];
        let expected_output = [13.0, 12.4, 11.9, 10.9, 9.4];

        for i in 0..errors.len() {
            let output = node.step(errors[i], 1.0).unwrap();
            assert_eq!(node.integral(), expected_integral[i]);
            assert_close(output, expected_output[i]);
            assert_eq!(node.previous_error(), errors[i]);
        }
    }

    #[test]
    fn integral_scales_with_dt() {
        let mut node = PidNode::new(PidGains::new(0.0, 1.0, 0.0));
        node.step(4.0, 0.5).unwrap();
        assert_eq!(node.integral(), 2.0);
        node.step(4.0, 0.25).unwrap();
        assert_eq!(node.integral(), 3.0);
    }

    #[test]
    fn derivative_uses_previous_error() {
        let mut node = PidNode::new(PidGains::new(0.0, 0.0, 2.0));
        // first step differentiates against the zeroed initial state
        assert_close(node.step(3.0, 1.0).unwrap(), 6.0);
        assert_close(node.step(1.0, 1.0).unwrap(), -4.0);
        // halving dt doubles the slope
        assert_close(node.step(2.0, 0.5).unwrap(), 4.0);
    }

    #[test]
    fn zero_dt_is_division_by_zero() {
        let mut node = PidNode::new(PidGains::new(2.0, 0.5, 0.1));
        for error in [-2.0, 0.0, 7.5] {
            assert!(matches!(
                node.step(error, 0.0),
                Err(Error::DivisionByZero)
            ));
        }
        // the failed steps mutated nothing
        assert_eq!(node.integral(), 0.0);
        assert_eq!(node.previous_error(), 0.0);
        assert_close(node.step(5.0, 1.0).unwrap(), 2.0 * 5.0 + 0.5 * 5.0 + 0.1 * 5.0);
    }

    #[test]
    fn reset_zeroes_state_and_keeps_gains() {
        let mut node = PidNode::new(PidGains::new(2.0, 0.5, 0.1));
        node.step(5.0, 1.0).unwrap();
        node.step(4.0, 1.0).unwrap();
        assert_ne!(node.integral(), 0.0);

        node.reset();
        assert_eq!(node.integral(), 0.0);
        assert_eq!(node.previous_error(), 0.0);
        assert_eq!(node.gains(), PidGains::new(2.0, 0.5, 0.1));
    }
}
