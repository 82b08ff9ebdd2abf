// src/controller.rs

//! # Longitudinal Controllers
//!
//! This module provides the stateful pieces of the autopilot: the shared
//! numeric bound and control interface, the configuration structures, the
//! total energy controller, the pitch-hold inner loop and the flight-regime
//! state machine that drives them.

pub mod config;
pub use config::*;
pub mod longitudinal;
pub use longitudinal::*;
pub mod pitch_hold;
pub use pitch_hold::*;
pub mod state_machine;
pub use state_machine::*;
pub mod total_energy;
pub use total_energy::*;
