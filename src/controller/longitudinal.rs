// src/controller/longitudinal.rs

//! A module specifying the shared interface for longitudinal controllers.
//! It includes the numeric bound used throughout the crate, the per-tick
//! input and output structures, and a trait describing one control law per
//! flight regime together with the hook run when that regime is left.

use num_traits::{FloatConst, FromPrimitive};
use piddiy::Number as PiddiyNumber;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Custom trait to encapsulate base number requirements.
pub trait Number: PiddiyNumber + FromPrimitive + FloatConst + Default {
    /// Absolute value.
    fn magnitude(self) -> Self {
        if self < Self::zero() {
            -self
        } else {
            self
        }
    }

    /// `true` for values that do not compare equal to themselves.
    #[allow(clippy::eq_op)]
    fn is_nan(self) -> bool {
        self != self
    }

    /// `false` for NaN and the infinities.
    fn is_finite(self) -> bool {
        !Number::is_nan(self - self)
    }

    /// Converts a literal into this number type.
    ///
    /// Every literal used by this crate is representable by the supported
    /// types, so the zero fallback is never taken for `f32` or `f64`.
    fn from_literal(value: f64) -> Self {
        Self::from_f64(value).unwrap_or_else(Self::zero)
    }

    /// Converts an angle in degrees to radians.
    fn to_radians(self) -> Self {
        self * Self::PI() / Self::from_literal(180.0)
    }
}

impl<T: PiddiyNumber + FromPrimitive + FloatConst + Default> Number for T {}

/// Discrete flight phase. Each regime has its own longitudinal control law
/// and integrator reset behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum FlightRegime {
    /// Ground roll and initial climb-out with a fixed pitch target.
    #[default]
    TakeOff,
    /// Climb toward the commanded altitude with a tight altitude step.
    Climb,
    /// Cruise at the commanded altitude.
    AltitudeHold,
}

/// Commanded and measured quantities consumed once per control tick.
/// All values are SI: m/s, m, rad, rad/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Input<T> {
    /// Commanded airspeed.
    pub va_c: T,
    /// Measured airspeed.
    pub va: T,
    /// Commanded altitude.
    pub h_c: T,
    /// Measured altitude.
    pub h: T,
    /// Measured pitch angle.
    pub theta: T,
    /// Measured pitch rate.
    pub q: T,
    /// Pitch target supplied by the input mapper while it holds the pitch
    /// override. Honored in altitude hold.
    pub pitch_override: Option<T>,
}

impl<T: Number> Input<T> {
    /// Creates an input without a pitch override.
    pub fn new(va_c: T, va: T, h_c: T, h: T, theta: T, q: T) -> Self {
        Self {
            va_c,
            va,
            h_c,
            h,
            theta,
            q,
            pitch_override: None,
        }
    }
}

/// Longitudinal commands produced by one control tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Output<T> {
    /// Throttle command.
    pub delta_t: T,
    /// Pitch angle target in radians.
    pub theta_c: T,
    /// Elevator deflection from the pitch-hold loop.
    pub delta_e: T,
    /// Regime whose control law produced these commands. A transition
    /// detected on the same tick is not reflected here; the new regime
    /// applies from the next tick.
    pub regime: FlightRegime,
}

/// A trait for longitudinal controllers that provide one control law per
/// flight regime. Transitions are decided by the caller, which must run the
/// matching exit hook before the first tick of the next regime.
pub trait LongitudinalControl<T: Number> {
    /// Control law while in the take-off regime.
    fn take_off(&mut self, input: &Input<T>) -> Output<T>;

    /// Control law while in the climb regime.
    fn climb(&mut self, input: &Input<T>) -> Output<T>;

    /// Control law while in the altitude-hold regime.
    fn altitude_hold(&mut self, input: &Input<T>) -> Output<T>;

    /// Runs when the take-off regime is left.
    fn take_off_exit(&mut self);

    /// Runs when the climb regime is left.
    fn climb_exit(&mut self);

    /// Runs when the altitude-hold regime is left.
    fn altitude_hold_exit(&mut self);

    /// Altitude band around the command, in meters, that separates climb
    /// from altitude hold.
    fn hold_band(&self) -> T;

    /// Runs the control law for `regime`.
    fn control(&mut self, regime: FlightRegime, input: &Input<T>) -> Output<T> {
        match regime {
            FlightRegime::TakeOff => self.take_off(input),
            FlightRegime::Climb => self.climb(input),
            FlightRegime::AltitudeHold => self.altitude_hold(input),
        }
    }

    /// Runs the exit hook for `regime`.
    fn exit(&mut self, regime: FlightRegime) {
        match regime {
            FlightRegime::TakeOff => self.take_off_exit(),
            FlightRegime::Climb => self.climb_exit(),
            FlightRegime::AltitudeHold => self.altitude_hold_exit(),
        }
    }
}
