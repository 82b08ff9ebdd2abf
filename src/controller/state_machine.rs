// src/controller/state_machine.rs

//! # Flight Regime State Machine
//!
//! Selects the longitudinal control law from the aircraft's altitude. The
//! aircraft starts in take-off and moves to climb once it clears the
//! take-off zone, then to altitude hold once it is within the hold band of
//! the commanded altitude. Dropping back into the take-off zone from either
//! airborne regime returns to take-off.
//!
//! Every tick runs the active regime's control law first and only then
//! evaluates transitions. When a transition fires, the exit hook of the
//! regime being left runs before the next tick.

use crate::{FlightRegime, Input, LongitudinalControl, Number, Output, RegimeConfig};
use core::marker::PhantomData;

/// Struct representing the regime state machine driving a longitudinal
/// controller.
pub struct RegimeStateMachine<T: Number, C: LongitudinalControl<T>> {
    controller: C,
    config: RegimeConfig<T>,
    regime: FlightRegime,
    _number: PhantomData<T>,
}

impl<T: Number, C: LongitudinalControl<T>> RegimeStateMachine<T, C> {
    /// Creates a new state machine in the take-off regime.
    pub fn with_config(controller: C, config: RegimeConfig<T>) -> Self {
        Self {
            controller,
            config,
            regime: FlightRegime::TakeOff,
            _number: PhantomData,
        }
    }

    /// Creates a new state machine with the default take-off zone.
    pub fn new(controller: C) -> Self {
        Self::with_config(controller, RegimeConfig::new())
    }

    /// The regime whose control law runs on the next tick.
    pub fn regime(&self) -> FlightRegime {
        self.regime
    }

    /// The driven controller.
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Mutable access to the driven controller, for configuration changes
    /// between ticks.
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// Replaces the transition configuration between ticks.
    pub fn set_config(&mut self, config: RegimeConfig<T>) {
        self.config = config;
    }

    /// Runs one control tick.
    pub fn control(&mut self, input: &Input<T>) -> Output<T> {
        let output = self.controller.control(self.regime, input);

        if let Some(next) = self.next_regime(input) {
            self.controller.exit(self.regime);
            match next {
                FlightRegime::TakeOff => info!("take off"),
                FlightRegime::Climb => info!("climb"),
                FlightRegime::AltitudeHold => info!("hold"),
            }
            self.regime = next;
        }

        output
    }

    fn next_regime(&self, input: &Input<T>) -> Option<FlightRegime> {
        let alt_toz = self.config.alt_toz;
        match self.regime {
            FlightRegime::TakeOff if input.h >= alt_toz => Some(FlightRegime::Climb),
            FlightRegime::Climb if input.h >= input.h_c - self.controller.hold_band() => {
                Some(FlightRegime::AltitudeHold)
            }
            FlightRegime::Climb | FlightRegime::AltitudeHold if input.h <= alt_toz => {
                Some(FlightRegime::TakeOff)
            }
            _ => None,
        }
    }
}
