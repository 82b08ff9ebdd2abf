// src/controller/pitch_hold.rs

//! # Pitch-Hold Inner Loop
//!
//! Turns a commanded pitch angle into an elevator deflection. The total
//! energy controller only decides the pitch target; this loop is the stable
//! inner loop that tracks it, independent of flight regime.

use crate::pid::{compute_pitch, PitchControlData};
use crate::saturation::sat;
use crate::{ConfigError, Number, PitchHoldConfig};
use piddiy::PidController;

/// An inner loop that tracks a commanded pitch angle with the elevator.
pub trait PitchHold<T: Number> {
    /// Returns the elevator deflection for pitch target `theta_c` given the
    /// measured pitch `theta` and pitch rate `q`.
    fn pitch_hold(&mut self, theta_c: T, theta: T, q: T) -> T;
}

/// PID pitch-hold loop with trim, symmetric saturation and anti-windup.
pub struct PitchHoldLoop<T: Number> {
    pid: PidController<T, PitchControlData<T>>,
    config: PitchHoldConfig<T>,
}

impl<T: Number> PitchHoldLoop<T> {
    /// Creates a new loop using the provided configuration.
    pub fn with_config(config: PitchHoldConfig<T>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// Creates a new loop with default settings.
    pub fn new() -> Self {
        Self::from_valid(PitchHoldConfig::new())
    }

    fn from_valid(config: PitchHoldConfig<T>) -> Self {
        let mut pid = PidController::new();
        pid.compute_fn(compute_pitch)
            .set_point(T::zero())
            .kp(config.kp)
            .ki(config.ki)
            .kd(config.kd);

        Self { pid, config }
    }

    /// Replaces the configuration between ticks. The integrator is kept.
    pub fn set_config(&mut self, config: PitchHoldConfig<T>) -> Result<(), ConfigError> {
        config.validate()?;
        self.pid.kp(config.kp).ki(config.ki).kd(config.kd);
        self.config = config;
        Ok(())
    }

    /// The accumulated integral term.
    pub fn integrator(&self) -> T {
        self.pid.integral
    }
}

impl<T: Number> Default for PitchHoldLoop<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Number> PitchHold<T> for PitchHoldLoop<T> {
    fn pitch_hold(&mut self, theta_c: T, theta: T, q: T) -> T {
        let config = &self.config;
        let data = PitchControlData {
            theta,
            q,
            dt: T::one() / config.frequency,
        };
        let integral_prev = self.pid.integral;

        self.pid.set_point(theta_c);
        let (error, mut integral, derivative) = compute_pitch(&mut self.pid, data);

        let mut up = config.kp * error;
        let mut ui = config.ki * integral;
        let mut ud = config.kd * derivative;

        if up.is_nan() {
            up = T::zero();
            warn!("Proportional control on the pitch loop is NAN");
        }
        if ui.is_nan() {
            integral = T::zero();
            ui = T::zero();
            warn!("Integral control on the pitch loop is NAN");
        }
        if ud.is_nan() {
            ud = T::zero();
            warn!("Derivative control on the pitch loop is NAN");
        }

        let delta_e_unsat = config.trim_e / config.pwm_rad_e + up + ui + ud;
        let delta_e = sat(delta_e_unsat, config.max_e, -config.max_e);

        // Hold the integrator while the elevator is saturated.
        if (delta_e - delta_e_unsat).magnitude() > T::from_literal(0.0001)
            && config.ki.magnitude() > T::from_literal(0.00001)
        {
            integral = integral_prev;
        }

        self.pid.integral = integral;
        self.pid.error = if error.is_nan() { T::zero() } else { error };

        -delta_e
    }
}
