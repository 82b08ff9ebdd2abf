// src/test_utils.rs

//! This module contains utilities for testing.

use crate::{Input, TotalEnergyConfig};

/// A constant defining the tolerance within which floating-point values
/// are considered close enough to be equal.
pub const TEST_TOLERANCE: f32 = 1e-5;

/// Checks if two floating point numbers are close enough to be considered
/// equal.
///
/// # Arguments
/// * `target` - The target value.
/// * `value` - The value to compare against the target.
///
/// # Returns
/// `true` if the absolute difference between `target` and `value` is less than
/// `TEST_TOLERANCE`, otherwise `false`.
pub fn value_close(target: f32, value: f32) -> bool {
    value_close_within(target, value, TEST_TOLERANCE)
}

/// Checks if two floating point numbers are within `tolerance` of each other.
/// Used for quantities, like energies in joules, whose magnitude makes
/// `TEST_TOLERANCE` tighter than `f32` resolution.
pub fn value_close_within(target: f32, value: f32, tolerance: f32) -> bool {
    (target - value).abs() < tolerance
}

/// Checks if two floating point numbers are not close enough to be
/// considered equal.
///
/// # Arguments
/// * `target` - The target value.
/// * `value` - The value to compare against the target.
///
/// # Returns
/// `true` if the absolute difference between `target` and `value` exceeds
/// `TEST_TOLERANCE`, otherwise `false`.
pub fn value_not_close(target: f32, value: f32) -> bool {
    TEST_TOLERANCE <= (target - value).abs()
}

/// Checks if each of the components in a vector is close enough to
/// be considered equal.
///
/// # Arguments
/// * `target` - The target vector as a tuple of three `f32` values.
/// * `value` - The vector to compare against the target.
///
/// # Returns
/// `true` if each component of `target` and `value` is close as per `value_close`,
/// otherwise `false`.
pub fn vector_close(target: (f32, f32, f32), value: (f32, f32, f32)) -> bool {
    value_close(target.0, value.0)
        && value_close(target.1, value.1)
        && value_close(target.2, value.2)
}

/// Configuration used by the controller tests: default gains, 50 Hz ticks.
pub fn test_config() -> TotalEnergyConfig<f32> {
    let mut config = TotalEnergyConfig::new();
    config.frequency = 50.0;
    config
}

/// The reference flight condition: slightly slow and slightly low.
pub fn reference_input() -> Input<f32> {
    Input::new(20.0, 18.0, 100.0, 98.0, 0.05, 0.0)
}
