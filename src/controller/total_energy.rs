// src/controller/total_energy.rs

//! # Total Energy Longitudinal Controller
//!
//! Throttle controls the total energy error, the sum of the kinetic and
//! potential energy errors. Pitch controls the energy balance, their
//! difference, which decides whether energy goes into airspeed or altitude.
//! Both errors are normalized by the kinetic energy at the commanded
//! airspeed so the gains behave the same across airspeeds.
//!
//! ## Regimes
//!
//! - **Take-off:** throttle loop capped at `max_takeoff_throttle`, fixed
//!   pitch target `cmd_takeoff_pitch`.
//! - **Climb:** altitude command limited to `alt_hz / 2` from the aircraft,
//!   throttle and pitch from the energy loops.
//! - **Altitude hold:** as climb, with the looser `alt_hz` limit.
//!
//! Leaving any regime zeroes both energy integrators and their stored
//! previous errors. The throttle integrator is also zeroed on every tick
//! below 0.5 m so it cannot wind up on the ground.

use crate::energy::Energies;
use crate::pid::{compute_energy_balance, compute_total_energy, EnergyControlData};
use crate::saturation::{adjust_h_c, sat};
use crate::{
    ConfigError, FlightRegime, Input, LongitudinalControl, Number, Output, PitchHold,
    PitchHoldLoop, TotalEnergyConfig,
};
use piddiy::PidController;

/// Altitude in meters below which the aircraft is treated as on the ground.
const GROUND_ALTITUDE: f64 = 0.5;

/// Struct representing the total energy longitudinal controller.
pub struct TotalEnergyController<T: Number, P: PitchHold<T> = PitchHoldLoop<T>> {
    throttle_pid: PidController<T, EnergyControlData<T>>,
    pitch_pid: PidController<T, EnergyControlData<T>>,
    pitch_hold: P,
    config: TotalEnergyConfig<T>,
    energies: Energies<T>,
}

impl<T: Number> TotalEnergyController<T, PitchHoldLoop<T>> {
    /// Creates a new controller using the provided configuration and the
    /// default pitch-hold loop.
    pub fn with_config(config: TotalEnergyConfig<T>) -> Result<Self, ConfigError> {
        Self::with_pitch_hold(config, PitchHoldLoop::new())
    }

    /// Creates a new controller with default settings.
    pub fn new() -> Self {
        Self::from_valid(TotalEnergyConfig::new(), PitchHoldLoop::new())
    }
}

impl<T: Number> Default for TotalEnergyController<T, PitchHoldLoop<T>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Number, P: PitchHold<T>> TotalEnergyController<T, P> {
    /// Creates a new controller using the provided configuration and
    /// pitch-hold inner loop.
    pub fn with_pitch_hold(config: TotalEnergyConfig<T>, pitch_hold: P) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config, pitch_hold))
    }

    fn from_valid(config: TotalEnergyConfig<T>, pitch_hold: P) -> Self {
        let mut throttle_pid = PidController::new();
        throttle_pid
            .compute_fn(compute_total_energy)
            .kp(config.e_kp)
            .ki(config.e_ki)
            .kd(config.e_kd);

        let mut pitch_pid = PidController::new();
        pitch_pid
            .compute_fn(compute_energy_balance)
            .kp(config.l_kp)
            .ki(config.l_ki)
            .kd(config.l_kd);

        TotalEnergyController {
            throttle_pid,
            pitch_pid,
            pitch_hold,
            config,
            energies: Energies::default(),
        }
    }

    /// Replaces the configuration between ticks. Integrator state is kept.
    pub fn set_config(&mut self, config: TotalEnergyConfig<T>) -> Result<(), ConfigError> {
        config.validate()?;
        self.throttle_pid.kp(config.e_kp).ki(config.e_ki).kd(config.e_kd);
        self.pitch_pid.kp(config.l_kp).ki(config.l_ki).kd(config.l_kd);
        self.config = config;
        Ok(())
    }

    /// The active configuration.
    pub fn config(&self) -> &TotalEnergyConfig<T> {
        &self.config
    }

    /// Energy errors from the most recent loop evaluation.
    pub fn energies(&self) -> Energies<T> {
        self.energies
    }

    /// Accumulated integral of the total energy error.
    pub fn e_integrator(&self) -> T {
        self.throttle_pid.integral
    }

    /// Accumulated integral of the energy balance error.
    pub fn l_integrator(&self) -> T {
        self.pitch_pid.integral
    }

    /// Total energy error from the previous throttle loop evaluation.
    pub fn e_error_prev(&self) -> T {
        self.throttle_pid.error
    }

    /// Energy balance error from the previous pitch loop evaluation.
    pub fn l_error_prev(&self) -> T {
        self.pitch_pid.error
    }

    /// The pitch-hold inner loop.
    pub fn pitch_hold(&self) -> &P {
        &self.pitch_hold
    }

    /// Zeroes both energy integrators and their previous errors.
    pub fn reset_integrators(&mut self) {
        for pid in [&mut self.throttle_pid, &mut self.pitch_pid] {
            pid.integral = T::zero();
            pid.error = T::zero();
        }
    }

    fn update_energies(&mut self, va_c: T, va: T, h_c: T, h: T) -> EnergyControlData<T> {
        let config = &self.config;
        self.energies = Energies::compute(
            va_c,
            va,
            h_c,
            h,
            config.mass,
            config.gravity,
            config.max_energy,
        );

        EnergyControlData {
            energies: self.energies,
            dt: config.period(),
            reset_integral: false,
        }
    }

    /// Throttle loop. Returns the saturated PI output plus trim, so the
    /// result lies in `[trim_t, max_t + trim_t]`.
    pub fn total_energy_throttle(&mut self, va_c: T, va: T, h_c: T, h: T) -> T {
        let mut data = self.update_energies(va_c, va, h_c, h);
        data.reset_integral = h < T::from_literal(GROUND_ALTITUDE);

        let output = self.throttle_pid.compute(data);
        sat(output, self.config.max_t, T::zero()) + self.config.trim_t
    }

    /// Pitch loop. Returns a pitch target in radians within `±max_roll`.
    pub fn total_energy_pitch(&mut self, va_c: T, va: T, h_c: T, h: T) -> T {
        let data = self.update_energies(va_c, va, h_c, h);

        let output = self.pitch_pid.compute(data);
        let limit = self.config.max_roll.to_radians();
        sat(output, limit, -limit)
    }

    // Climb and altitude hold share one law, differing in the altitude step.
    fn energy_control(&mut self, input: &Input<T>, max_diff: T, regime: FlightRegime) -> Output<T> {
        let h_c = adjust_h_c(input.h_c, input.h, max_diff);

        let delta_t = self.total_energy_throttle(input.va_c, input.va, h_c, input.h);
        let theta_c = self.total_energy_pitch(input.va_c, input.va, h_c, input.h);
        let delta_e = self.pitch_hold.pitch_hold(theta_c, input.theta, input.q);

        Output {
            delta_t,
            theta_c,
            delta_e,
            regime,
        }
    }
}

impl<T: Number, P: PitchHold<T>> LongitudinalControl<T> for TotalEnergyController<T, P> {
    fn take_off(&mut self, input: &Input<T>) -> Output<T> {
        let throttle = self.total_energy_throttle(input.va_c, input.va, input.h_c, input.h);
        let delta_t = sat(throttle, self.config.max_takeoff_throttle, T::zero());

        // Shallow fixed pitch to gain altitude.
        let theta_c = self.config.cmd_takeoff_pitch.to_radians();
        let delta_e = self.pitch_hold.pitch_hold(theta_c, input.theta, input.q);

        Output {
            delta_t,
            theta_c,
            delta_e,
            regime: FlightRegime::TakeOff,
        }
    }

    fn climb(&mut self, input: &Input<T>) -> Output<T> {
        let two = T::one() + T::one();
        self.energy_control(input, self.config.alt_hz / two, FlightRegime::Climb)
    }

    fn altitude_hold(&mut self, input: &Input<T>) -> Output<T> {
        match input.pitch_override {
            None => self.energy_control(input, self.config.alt_hz, FlightRegime::AltitudeHold),
            Some(theta_c) => {
                let h_c = adjust_h_c(input.h_c, input.h, self.config.alt_hz);
                let delta_t = self.total_energy_throttle(input.va_c, input.va, h_c, input.h);
                // Keep the pitch loop current while the pilot holds pitch.
                let _ = self.total_energy_pitch(input.va_c, input.va, h_c, input.h);
                let delta_e = self.pitch_hold.pitch_hold(theta_c, input.theta, input.q);

                Output {
                    delta_t,
                    theta_c,
                    delta_e,
                    regime: FlightRegime::AltitudeHold,
                }
            }
        }
    }

    fn take_off_exit(&mut self) {
        self.reset_integrators();
    }

    fn climb_exit(&mut self) {
        self.reset_integrators();
    }

    fn altitude_hold_exit(&mut self) {
        // Returning to take-off from here is likely a crash or go-around.
        self.reset_integrators();
    }

    fn hold_band(&self) -> T {
        self.config.alt_hz
    }
}
