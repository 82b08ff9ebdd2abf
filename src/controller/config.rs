// src/controller/config.rs

//! Configuration structures for the longitudinal controllers.
//!
//! Each structure has public fields and a `new()` constructor returning
//! flight-tested defaults for a small (2.28 kg) fixed-wing airframe. The
//! values are immutable during a control tick; replace them between ticks
//! through the owning controller's `set_config`.

use crate::Number;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reasons a configuration is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The control frequency must be strictly positive.
    NonPositiveFrequency,
    /// The airframe mass must be strictly positive.
    NonPositiveMass,
    /// A limit that must be non-negative was negative. Holds the field name.
    NegativeLimit(&'static str),
    /// A scale factor that is used as a divisor was zero. Holds the field name.
    ZeroScale(&'static str),
    /// An input-mode string did not name a known mode. Holds the channel.
    InvalidInputMode(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveFrequency => write!(f, "frequency must be greater than zero"),
            Self::NonPositiveMass => write!(f, "mass must be greater than zero"),
            Self::NegativeLimit(name) => write!(f, "limit `{name}` must not be negative"),
            Self::ZeroScale(name) => write!(f, "scale `{name}` must not be zero"),
            Self::InvalidInputMode(channel) => {
                write!(f, "invalid {channel} input mode, using path_follower")
            }
        }
    }
}

fn non_negative<T: Number>(value: T, name: &'static str) -> Result<(), ConfigError> {
    if value < T::zero() {
        return Err(ConfigError::NegativeLimit(name));
    }
    Ok(())
}

/// Configuration for the total energy controller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct TotalEnergyConfig<T> {
    /// Proportional gain of the total energy (throttle) loop.
    pub e_kp: T,
    /// Integral gain of the total energy (throttle) loop.
    pub e_ki: T,
    /// Derivative gain of the total energy loop. Reserved, the control law
    /// has no derivative term.
    pub e_kd: T,
    /// Proportional gain of the energy balance (pitch) loop.
    pub l_kp: T,
    /// Integral gain of the energy balance (pitch) loop.
    pub l_ki: T,
    /// Derivative gain of the energy balance loop. Reserved, the control law
    /// has no derivative term.
    pub l_kd: T,
    /// Airframe mass in kg.
    pub mass: T,
    /// Gravitational acceleration in m/s^2.
    pub gravity: T,
    /// Altitude error in meters beyond which the potential energy error
    /// saturates.
    pub max_energy: T,
    /// Control tick frequency in Hz.
    pub frequency: T,
    /// Upper bound of the throttle loop output, before trim is added.
    pub max_t: T,
    /// Trim throttle added after saturation.
    pub trim_t: T,
    /// Angular limit in degrees, applied symmetrically to the pitch target.
    pub max_roll: T,
    /// Altitude step limit in meters for altitude hold. Climb uses half.
    pub alt_hz: T,
    /// Cap on the throttle loop output during take-off.
    pub max_takeoff_throttle: T,
    /// Fixed pitch target during take-off, in degrees.
    pub cmd_takeoff_pitch: T,
}

impl<T: Number> TotalEnergyConfig<T> {
    /// Creates a new configuration with the default gains and limits.
    ///
    /// Example Usage
    /// ```
    /// use total_energy_autopilot::{TotalEnergyConfig, TotalEnergyController};
    ///
    /// let mut config = TotalEnergyConfig::<f32>::new();
    ///
    /// // Heavier airframe, gentler altitude steps.
    /// config.mass = 3.1;
    /// config.alt_hz = 8.0;
    ///
    /// let controller = TotalEnergyController::with_config(config);
    /// assert!(controller.is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            e_kp: T::from_literal(5.0),
            e_ki: T::from_literal(0.9),
            e_kd: T::zero(),
            l_kp: T::one(),
            l_ki: T::from_literal(0.05),
            l_kd: T::zero(),
            mass: T::from_literal(2.28),
            gravity: T::from_literal(9.8),
            max_energy: T::from_literal(5.0),
            frequency: T::from_literal(100.0),
            max_t: T::one(),
            trim_t: T::from_literal(0.5),
            max_roll: T::from_literal(25.0),
            alt_hz: T::from_literal(10.0),
            max_takeoff_throttle: T::from_literal(0.55),
            cmd_takeoff_pitch: T::from_literal(5.0),
        }
    }

    /// Checks the invariants the control laws rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.frequency > T::zero()) {
            return Err(ConfigError::NonPositiveFrequency);
        }
        if !(self.mass > T::zero()) {
            return Err(ConfigError::NonPositiveMass);
        }
        non_negative(self.max_energy, "max_energy")?;
        non_negative(self.max_t, "max_t")?;
        non_negative(self.max_roll, "max_roll")?;
        non_negative(self.alt_hz, "alt_hz")?;
        non_negative(self.max_takeoff_throttle, "max_takeoff_throttle")?;
        Ok(())
    }

    /// Control tick period in seconds.
    pub fn period(&self) -> T {
        T::one() / self.frequency
    }
}

impl<T: Number> Default for TotalEnergyConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for the pitch-hold inner loop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct PitchHoldConfig<T> {
    /// Proportional gain.
    pub kp: T,
    /// Integral gain.
    pub ki: T,
    /// Derivative gain, applied to the measured pitch rate.
    pub kd: T,
    /// Elevator deflection limit, applied symmetrically.
    pub max_e: T,
    /// Trim elevator deflection.
    pub trim_e: T,
    /// Elevator scaling from radians to actuator units.
    pub pwm_rad_e: T,
    /// Loop frequency in Hz.
    pub frequency: T,
}

impl<T: Number> PitchHoldConfig<T> {
    /// Creates a new configuration with the default gains and limits.
    pub fn new() -> Self {
        Self {
            kp: T::from_literal(-0.15),
            ki: T::zero(),
            kd: T::from_literal(-0.05),
            max_e: T::from_literal(0.15),
            trim_e: T::from_literal(0.02),
            pwm_rad_e: T::one(),
            frequency: T::from_literal(100.0),
        }
    }

    /// Checks the invariants the pitch-hold loop relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.frequency > T::zero()) {
            return Err(ConfigError::NonPositiveFrequency);
        }
        if self.pwm_rad_e == T::zero() {
            return Err(ConfigError::ZeroScale("pwm_rad_e"));
        }
        non_negative(self.max_e, "max_e")
    }
}

impl<T: Number> Default for PitchHoldConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for regime transition detection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct RegimeConfig<T> {
    /// Ceiling of the take-off zone in meters.
    pub alt_toz: T,
}

impl<T: Number> RegimeConfig<T> {
    /// Creates a new configuration with the default take-off zone.
    pub fn new() -> Self {
        Self {
            alt_toz: T::from_literal(5.0),
        }
    }
}

impl<T: Number> Default for RegimeConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs_are_valid() {
        assert_eq!(TotalEnergyConfig::<f32>::new().validate(), Ok(()));
        assert_eq!(PitchHoldConfig::<f64>::new().validate(), Ok(()));
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let mut config = TotalEnergyConfig::<f32>::new();
        config.frequency = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveFrequency));
    }

    #[test]
    fn test_nan_frequency_rejected() {
        let mut config = TotalEnergyConfig::<f32>::new();
        config.frequency = f32::NAN;
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveFrequency));
    }

    #[test]
    fn test_negative_limit_rejected() {
        let mut config = TotalEnergyConfig::<f32>::new();
        config.max_takeoff_throttle = -0.1;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeLimit("max_takeoff_throttle"))
        );
    }

    #[test]
    fn test_default_period() {
        let config = TotalEnergyConfig::<f64>::new();
        assert!((config.period() - 0.01).abs() < 1e-12);
    }
}
