// src/lib.rs

//! # Total Energy Longitudinal Autopilot
//!
//! This crate provides a `no_std`, no-alloc longitudinal autopilot core for
//! fixed-wing aircraft. Throttle governs the total energy error (kinetic plus
//! potential) and pitch governs how that energy is distributed between
//! airspeed and altitude. A small flight-regime state machine (take-off,
//! climb, altitude hold) selects the active control law and resets the
//! integrators whenever a regime is left.
//!
//! The controllers are generic over [`Number`], so they work with `f32` and
//! `f64` alike.

#![no_std]
#![deny(missing_docs)]

#[macro_use]
mod log;

pub mod controller;
pub mod energy;
pub mod input_mapper;
pub mod pid;
pub mod saturation;

#[doc(inline)]
pub use controller::*;

#[cfg(test)]
mod test_utils;
