// src/energy.rs

//! # Energy Calculator
//!
//! Converts commanded and measured airspeed and altitude into the kinetic
//! and potential energy errors driving the total energy control loops.

use crate::saturation::sat;
use crate::Number;

/// Reference kinetic energy in joules below which the normalized errors
/// are taken as zero.
const MIN_REFERENCE_ENERGY: f64 = 1e-6;

/// Energy errors for one control tick, in joules.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Energies<T> {
    /// Kinetic energy error. Positive when the aircraft must speed up.
    pub k_error: T,
    /// Kinetic energy at the commanded airspeed. Normalizes both loops.
    pub k_ref: T,
    /// Potential energy error, computed from a saturated altitude error.
    pub u_error: T,
}

impl<T: Number> Energies<T> {
    /// Computes the energy errors.
    ///
    /// - `va_c`, `va`: commanded and measured airspeed.
    /// - `h_c`, `h`: commanded and measured altitude.
    /// - `mass`, `gravity`: airframe mass and gravitational acceleration.
    /// - `max_energy`: altitude error magnitude at which the potential
    ///   energy error saturates.
    pub fn compute(va_c: T, va: T, h_c: T, h: T, mass: T, gravity: T, max_energy: T) -> Self {
        let half = T::from_literal(0.5);
        Self {
            k_error: half * mass * (va_c * va_c - va * va),
            k_ref: half * mass * va_c * va_c,
            u_error: mass * gravity * sat(h_c - h, max_energy, -max_energy),
        }
    }

    /// Total energy error normalized by the reference kinetic energy.
    pub fn total_error(&self) -> T {
        self.normalize(self.k_error + self.u_error)
    }

    /// Energy balance error normalized by the reference kinetic energy.
    /// Positive when altitude should be favored over airspeed.
    pub fn balance_error(&self) -> T {
        self.normalize(self.u_error - self.k_error)
    }

    // A (near) zero commanded airspeed leaves nothing to normalize by.
    fn normalize(&self, error: T) -> T {
        if !(self.k_ref > T::from_literal(MIN_REFERENCE_ENERGY)) {
            return T::zero();
        }
        let normalized = error / self.k_ref;
        if Number::is_finite(normalized) {
            normalized
        } else {
            T::zero()
        }
    }
}
