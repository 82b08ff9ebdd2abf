// src/saturation.rs

//! # Saturation and Command Shaping
//!
//! Bounded-output helpers shared by every control loop: a clamp that
//! tolerates a misconfigured bound, and the altitude-command shaper that
//! limits how far ahead of the aircraft the altitude target may sit.

use crate::Number;
use core::sync::atomic::{AtomicBool, Ordering};

static NEGATIVE_UPPER_LIMIT_WARNED: AtomicBool = AtomicBool::new(false);

/// Clamps `value` into `[low_limit, up_limit]`.
///
/// A negative upper limit usually means the caller swapped or mistyped its
/// bounds. That is logged once per process and the clamp is still applied as
/// given, upper limit first.
pub fn sat<T: Number>(value: T, up_limit: T, low_limit: T) -> T {
    if up_limit < T::zero() && !NEGATIVE_UPPER_LIMIT_WARNED.load(Ordering::Relaxed) {
        NEGATIVE_UPPER_LIMIT_WARNED.store(true, Ordering::Relaxed);
        warn!("Upper limit in saturation function is negative.");
    }

    if value > up_limit {
        up_limit
    } else if value < low_limit {
        low_limit
    } else {
        value
    }
}

#[cfg(test)]
fn negative_upper_limit_seen() -> bool {
    NEGATIVE_UPPER_LIMIT_WARNED.load(Ordering::Relaxed)
}

/// Limits the altitude command to at most `max_diff` meters from the
/// measured altitude `h`, keeping the direction of the step.
pub fn adjust_h_c<T: Number>(h_c: T, h: T, max_diff: T) -> T {
    let diff = h_c - h;
    if diff.magnitude() > max_diff {
        if diff < T::zero() {
            h - max_diff
        } else {
            h + max_diff
        }
    } else {
        h_c
    }
}
