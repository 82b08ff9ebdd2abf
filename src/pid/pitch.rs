// src/pid/pitch.rs

//! # Pitch PID Control Module
//!
//! This module provides a compute function and control data structure
//! for the pitch-hold inner loop, which drives the elevator toward a
//! commanded pitch angle.

use crate::Number;
use piddiy::PidController;

/// Control data for the pitch-hold compute callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PitchControlData<T> {
    /// The measured pitch angle.
    pub theta: T,
    /// The measured pitch rate, used as the derivative signal.
    pub q: T,
    /// The loop period.
    pub dt: T,
}

/// Pitch-hold compute callback. The set point is the commanded pitch angle.
///
/// The derivative term is the negated pitch rate, so a positive `kd` damps
/// pitch motion without differentiating a stepping set point.
pub fn compute_pitch<T: Number>(
    pid: &mut PidController<T, PitchControlData<T>>,
    data: PitchControlData<T>,
) -> (T, T, T) {
    let two = T::one() + T::one();
    let error = pid.set_point - data.theta;
    let integral = pid.integral + (data.dt / two) * (error + pid.error);
    let derivative = -data.q;

    (error, integral, derivative)
}
