// src/pid.rs

//! # PID Control Module
//!
//! This module provides `piddiy` compute callbacks and control data
//! structures for the loops of the longitudinal autopilot. Each callback
//! returns the `(error, integral, derivative)` triple that `piddiy` weights
//! by the controller gains.

pub mod energy;
pub use energy::*;
pub mod pitch;
pub use pitch::*;
