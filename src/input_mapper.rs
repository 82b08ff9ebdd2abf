// src/input_mapper.rs

//! # RC Input Mapper
//!
//! Mixes pilot stick input into the autopilot commands. Each of the three
//! channels (aileron, elevator, throttle) either passes the autopilot
//! command through, nudges it at a configurable rate, or, for aileron and
//! elevator, takes over the attitude target directly. Angle modes ask the
//! autopilot to accept the attitude target as an override through a
//! [`ParamWriter`].

pub mod param_writer;
pub use param_writer::*;

use crate::{ConfigError, Number};
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Aileron channel modes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AileronInput {
    /// Course command from the autopilot.
    #[default]
    PathFollower,
    /// Stick moves the course command at `rc_course_rate`.
    RcCourse,
    /// Stick sets the roll angle directly.
    RcRollAngle,
}

/// Elevator channel modes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ElevatorInput {
    /// Altitude command from the autopilot.
    #[default]
    PathFollower,
    /// Stick moves the altitude command at `rc_altitude_rate`.
    RcAltitude,
    /// Stick sets the pitch angle directly.
    RcPitchAngle,
}

/// Throttle channel modes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ThrottleInput {
    /// Airspeed command from the autopilot.
    #[default]
    PathFollower,
    /// Stick moves the airspeed command at `rc_airspeed_rate`.
    RcAirspeed,
}

impl FromStr for AileronInput {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path_follower" => Ok(Self::PathFollower),
            "rc_course" => Ok(Self::RcCourse),
            "rc_roll_angle" => Ok(Self::RcRollAngle),
            _ => Err(ConfigError::InvalidInputMode("aileron")),
        }
    }
}

impl FromStr for ElevatorInput {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path_follower" => Ok(Self::PathFollower),
            "rc_altitude" => Ok(Self::RcAltitude),
            "rc_pitch_angle" => Ok(Self::RcPitchAngle),
            _ => Err(ConfigError::InvalidInputMode("elevator")),
        }
    }
}

impl FromStr for ThrottleInput {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path_follower" => Ok(Self::PathFollower),
            "rc_airspeed" => Ok(Self::RcAirspeed),
            _ => Err(ConfigError::InvalidInputMode("throttle")),
        }
    }
}

/// Configuration for the input mapper.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct InputMapperConfig<T> {
    /// Roll angle in radians at full aileron stick.
    pub rc_roll_angle_min_max: T,
    /// Course rate in rad/s at full aileron stick.
    pub rc_course_rate: T,
    /// Pitch angle in radians at full elevator stick.
    pub rc_pitch_angle_min_max: T,
    /// Climb rate in m/s at full elevator stick.
    pub rc_altitude_rate: T,
    /// Airspeed rate in m/s^2 at full throttle stick.
    pub rc_airspeed_rate: T,
    /// Raw value of a centered stick.
    pub rc_center: T,
    /// Raw distance from center to full stick.
    pub rc_half_range: T,
}

impl<T: Number> InputMapperConfig<T> {
    /// Creates a new configuration with the default rates and a
    /// 1000..2000 raw stick range.
    pub fn new() -> Self {
        Self {
            rc_roll_angle_min_max: T::from_literal(0.5),
            rc_course_rate: T::from_literal(0.5),
            rc_pitch_angle_min_max: T::from_literal(0.5),
            rc_altitude_rate: T::from_literal(3.0),
            rc_airspeed_rate: T::one(),
            rc_center: T::from_literal(1500.0),
            rc_half_range: T::from_literal(500.0),
        }
    }

    /// Checks that raw values can be normalized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rc_half_range == T::zero() {
            return Err(ConfigError::ZeroScale("rc_half_range"));
        }
        Ok(())
    }

    fn normalize(&self, raw: T) -> T {
        (raw - self.rc_center) / self.rc_half_range
    }
}

impl<T: Number> Default for InputMapperConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Commands for the autopilot, either from the path follower or mixed.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ControllerCommands<T> {
    /// Commanded airspeed.
    pub va_c: T,
    /// Commanded altitude.
    pub h_c: T,
    /// Commanded course.
    pub chi_c: T,
    /// Commanded roll angle, used while the roll override is on.
    pub phi_c: T,
    /// Commanded pitch angle, used while the pitch override is on.
    pub theta_c: T,
}

/// Raw stick values in aileron, elevator, throttle order.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RcRaw<T> {
    /// Raw channel values.
    pub values: [T; 3],
}

/// The parts of the vehicle state the mapper pins angle modes to.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct VehicleState<T> {
    /// Current course.
    pub chi: T,
    /// Current altitude.
    pub h: T,
}

/// Struct representing the RC input mapper.
pub struct InputMapper<T: Number> {
    config: InputMapperConfig<T>,
    aileron: AileronInput,
    elevator: ElevatorInput,
    throttle: ThrottleInput,
    mixed: ControllerCommands<T>,
    roll_override: bool,
    pitch_override: bool,
    writer: ParamWriter,
}

impl<T: Number> InputMapper<T> {
    /// Creates a new mapper with every channel on the path follower.
    pub fn with_config(config: InputMapperConfig<T>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// Creates a new mapper with default settings.
    pub fn new() -> Self {
        Self::from_valid(InputMapperConfig::new())
    }

    fn from_valid(config: InputMapperConfig<T>) -> Self {
        Self {
            config,
            aileron: AileronInput::default(),
            elevator: ElevatorInput::default(),
            throttle: ThrottleInput::default(),
            mixed: ControllerCommands::default(),
            roll_override: false,
            pitch_override: false,
            writer: ParamWriter::new(),
        }
    }

    /// Replaces the configuration between ticks.
    pub fn set_config(&mut self, config: InputMapperConfig<T>) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Sets the aileron mode by name. An unknown name resets the channel to
    /// the path follower.
    pub fn set_aileron_input(&mut self, mode: &str) -> Result<(), ConfigError> {
        match mode.parse() {
            Ok(input) => {
                self.aileron = input;
                Ok(())
            }
            Err(err) => {
                error!("Invalid aileron input type. Setting to path_follower.");
                self.aileron = AileronInput::PathFollower;
                Err(err)
            }
        }
    }

    /// Sets the elevator mode by name. An unknown name resets the channel to
    /// the path follower.
    pub fn set_elevator_input(&mut self, mode: &str) -> Result<(), ConfigError> {
        match mode.parse() {
            Ok(input) => {
                self.elevator = input;
                Ok(())
            }
            Err(err) => {
                error!("Invalid elevator input type. Setting to path_follower.");
                self.elevator = ElevatorInput::PathFollower;
                Err(err)
            }
        }
    }

    /// Sets the throttle mode by name. An unknown name resets the channel to
    /// the path follower.
    pub fn set_throttle_input(&mut self, mode: &str) -> Result<(), ConfigError> {
        match mode.parse() {
            Ok(input) => {
                self.throttle = input;
                Ok(())
            }
            Err(err) => {
                error!("Invalid throttle input type. Setting to path_follower.");
                self.throttle = ThrottleInput::PathFollower;
                Err(err)
            }
        }
    }

    /// Current aileron mode.
    pub fn aileron_input(&self) -> AileronInput {
        self.aileron
    }

    /// Current elevator mode.
    pub fn elevator_input(&self) -> ElevatorInput {
        self.elevator
    }

    /// Current throttle mode.
    pub fn throttle_input(&self) -> ThrottleInput {
        self.throttle
    }

    /// Whether the autopilot has been asked to follow `phi_c` directly.
    pub fn roll_override(&self) -> bool {
        self.roll_override
    }

    /// Whether the autopilot has been asked to follow `theta_c` directly.
    pub fn pitch_override(&self) -> bool {
        self.pitch_override
    }

    /// Pitch target to pass as [`crate::Input::pitch_override`], if the
    /// override is on.
    pub fn pitch_target(&self) -> Option<T> {
        self.pitch_override.then_some(self.mixed.theta_c)
    }

    /// The writer carrying override changes to the autopilot.
    pub fn param_writer(&self) -> &ParamWriter {
        &self.writer
    }

    /// Mutable access to the writer, for the timer tick and responses.
    pub fn param_writer_mut(&mut self) -> &mut ParamWriter {
        &mut self.writer
    }

    /// Mixes stick input into `commands`. `elapsed` is the time since the
    /// previous call.
    pub fn mix(
        &mut self,
        commands: &ControllerCommands<T>,
        rc: &RcRaw<T>,
        state: &VehicleState<T>,
        elapsed: T,
    ) -> ControllerCommands<T> {
        let config = self.config;
        let [aileron, elevator, throttle] = rc.values.map(|raw| config.normalize(raw));

        match self.aileron {
            AileronInput::PathFollower => {
                self.set_roll_override(false);
                self.mixed.chi_c = commands.chi_c;
                self.mixed.phi_c = commands.phi_c;
            }
            AileronInput::RcCourse => {
                self.set_roll_override(false);
                self.mixed.chi_c = self.mixed.chi_c + aileron * config.rc_course_rate * elapsed;
            }
            AileronInput::RcRollAngle => {
                self.set_roll_override(true);
                self.mixed.phi_c = aileron * config.rc_roll_angle_min_max;
                self.mixed.chi_c = state.chi;
            }
        }

        match self.elevator {
            ElevatorInput::PathFollower => {
                self.set_pitch_override(false);
                self.mixed.h_c = commands.h_c;
                self.mixed.theta_c = commands.theta_c;
            }
            ElevatorInput::RcAltitude => {
                self.set_pitch_override(false);
                self.mixed.h_c = self.mixed.h_c + elevator * config.rc_altitude_rate * elapsed;
            }
            ElevatorInput::RcPitchAngle => {
                self.set_pitch_override(true);
                self.mixed.theta_c = elevator * config.rc_pitch_angle_min_max;
                self.mixed.h_c = state.h;
            }
        }

        match self.throttle {
            ThrottleInput::PathFollower => self.mixed.va_c = commands.va_c,
            ThrottleInput::RcAirspeed => {
                self.mixed.va_c = self.mixed.va_c + throttle * config.rc_airspeed_rate * elapsed;
            }
        }

        self.mixed
    }

    fn set_roll_override(&mut self, roll_override: bool) {
        if roll_override == self.roll_override {
            return;
        }
        let request = ParamRequest::new(OverrideParam::RollCommandOverride, roll_override);
        if self.writer.request(request) {
            self.roll_override = roll_override;
        }
    }

    fn set_pitch_override(&mut self, pitch_override: bool) {
        if pitch_override == self.pitch_override {
            return;
        }
        let request = ParamRequest::new(OverrideParam::PitchCommandOverride, pitch_override);
        if self.writer.request(request) {
            self.pitch_override = pitch_override;
        }
    }
}

impl<T: Number> Default for InputMapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn commands() -> ControllerCommands<f32> {
        ControllerCommands {
            va_c: 20.0,
            h_c: 100.0,
            chi_c: 1.0,
            phi_c: 0.0,
            theta_c: 0.0,
        }
    }

    fn state() -> VehicleState<f32> {
        VehicleState { chi: 0.5, h: 80.0 }
    }

    fn sticks(aileron: f32, elevator: f32, throttle: f32) -> RcRaw<f32> {
        RcRaw {
            values: [aileron, elevator, throttle],
        }
    }

    #[test]
    fn test_mapper_path_follower_passes_through() {
        let mut mapper = InputMapper::<f32>::new();
        let mixed = mapper.mix(&commands(), &sticks(2000.0, 1000.0, 2000.0), &state(), 0.1);

        assert_eq!(commands(), mixed);
        assert!(!mapper.roll_override());
        assert!(!mapper.pitch_override());
        assert!(!mapper.param_writer().is_pending());
        assert_eq!(None, mapper.pitch_target());
    }

    #[test]
    fn test_mapper_rate_modes_integrate() {
        let mut mapper = InputMapper::<f32>::new();
        let _ = mapper.mix(&commands(), &sticks(1500.0, 1500.0, 1500.0), &state(), 0.1);

        mapper.set_aileron_input("rc_course").unwrap();
        mapper.set_elevator_input("rc_altitude").unwrap();
        mapper.set_throttle_input("rc_airspeed").unwrap();

        // Full right, half up, quarter throttle.
        let rc = sticks(2000.0, 1750.0, 1625.0);
        let _ = mapper.mix(&commands(), &rc, &state(), 0.5);
        let mixed = mapper.mix(&commands(), &rc, &state(), 0.5);

        assert!(value_close(1.5, mixed.chi_c), "Course should move 0.5 rad/s.");
        assert!(value_close(101.5, mixed.h_c), "Altitude should move 1.5 m/s.");
        assert!(value_close(20.25, mixed.va_c), "Airspeed should move 0.25 m/s^2.");
        assert!(!mapper.roll_override());
        assert!(!mapper.pitch_override());
    }

    #[test]
    fn test_mapper_roll_angle_mode() {
        let mut mapper = InputMapper::<f32>::new();
        mapper.set_aileron_input("rc_roll_angle").unwrap();

        let mixed = mapper.mix(&commands(), &sticks(1000.0, 1500.0, 1500.0), &state(), 0.1);

        assert!(value_close(-0.5, mixed.phi_c), "Full left should command -0.5 rad.");
        assert!(value_close(0.5, mixed.chi_c), "Course should follow the vehicle.");
        assert!(mapper.roll_override());
        assert_eq!(
            Some(ParamRequest::new(OverrideParam::RollCommandOverride, true)),
            mapper.param_writer_mut().poll(true)
        );
    }

    #[test]
    fn test_mapper_pitch_angle_mode() {
        let mut mapper = InputMapper::<f32>::new();
        mapper.set_elevator_input("rc_pitch_angle").unwrap();

        let mixed = mapper.mix(&commands(), &sticks(1500.0, 1700.0, 1500.0), &state(), 0.1);

        assert!(value_close(0.2, mixed.theta_c), "Stick should set the pitch angle.");
        assert!(value_close(80.0, mixed.h_c), "Altitude should follow the vehicle.");
        assert!(mapper.pitch_override());
        assert_eq!(Some(mixed.theta_c), mapper.pitch_target());
    }

    #[test]
    fn test_mapper_override_dropped_while_pending() {
        let mut mapper = InputMapper::<f32>::new();
        mapper.set_aileron_input("rc_roll_angle").unwrap();
        mapper.set_elevator_input("rc_pitch_angle").unwrap();

        let _ = mapper.mix(&commands(), &sticks(1500.0, 1500.0, 1500.0), &state(), 0.1);
        assert!(mapper.roll_override());
        assert!(!mapper.pitch_override(), "Second request should be dropped.");

        // Once the first change completes, the next tick retries.
        let writer = mapper.param_writer_mut();
        assert!(writer.poll(true).is_some());
        assert_eq!(None, writer.poll(true));
        writer.response_received(true);

        let _ = mapper.mix(&commands(), &sticks(1500.0, 1500.0, 1500.0), &state(), 0.1);
        assert!(mapper.pitch_override());
        assert_eq!(
            Some(ParamRequest::new(OverrideParam::PitchCommandOverride, true)),
            mapper.param_writer_mut().poll(true)
        );
    }

    #[test]
    fn test_mapper_invalid_mode_resets_channel() {
        let mut mapper = InputMapper::<f32>::new();
        mapper.set_elevator_input("rc_altitude").unwrap();

        assert_eq!(
            Err(ConfigError::InvalidInputMode("elevator")),
            mapper.set_elevator_input("rc_throttle")
        );
        assert_eq!(ElevatorInput::PathFollower, mapper.elevator_input());

        assert_eq!(
            Err(ConfigError::InvalidInputMode("throttle")),
            mapper.set_throttle_input("rc_pitch_angle")
        );
        assert_eq!(ThrottleInput::PathFollower, mapper.throttle_input());
    }

    #[test]
    fn test_mapper_rejects_zero_half_range() {
        let mut config = InputMapperConfig::<f32>::new();
        config.rc_half_range = 0.0;
        assert_eq!(
            InputMapper::with_config(config).err(),
            Some(ConfigError::ZeroScale("rc_half_range"))
        );
    }
}
