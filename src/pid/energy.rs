// src/pid/energy.rs

//! # Energy PI Control Module
//!
//! This module provides the compute functions and control data structure
//! for the two total energy loops. The throttle loop acts on the total
//! energy error and the pitch loop on the energy balance error. Both
//! integrate trapezoidally and have no derivative term.

use crate::energy::Energies;
use crate::Number;
use piddiy::PidController;

/// Control data for the energy loop compute callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyControlData<T> {
    /// Energy errors computed for this tick.
    pub energies: Energies<T>,
    /// The control tick period.
    pub dt: T,
    /// Flag to zero the integral after this step, used while on the ground.
    pub reset_integral: bool,
}

// Trapezoidal step using the error stored by the previous compute.
fn integrate<T: Number>(
    pid: &PidController<T, EnergyControlData<T>>,
    error: T,
    data: &EnergyControlData<T>,
) -> T {
    if data.reset_integral {
        T::zero()
    } else {
        let two = T::one() + T::one();
        pid.integral + (data.dt / two) * (error + pid.error)
    }
}

/// Total energy compute callback for the throttle loop.
pub fn compute_total_energy<T: Number>(
    pid: &mut PidController<T, EnergyControlData<T>>,
    data: EnergyControlData<T>,
) -> (T, T, T) {
    let error = data.energies.total_error();
    let integral = integrate(pid, error, &data);

    (error, integral, T::zero())
}

/// Energy balance compute callback for the pitch loop.
pub fn compute_energy_balance<T: Number>(
    pid: &mut PidController<T, EnergyControlData<T>>,
    data: EnergyControlData<T>,
) -> (T, T, T) {
    let error = data.energies.balance_error();
    let integral = integrate(pid, error, &data);

    (error, integral, T::zero())
}
