// src/test_utils.rs

//! This module contains utilities for testing.

/// A constant defining the tolerance within which floating-point values
/// are considered close enough to be equal.
pub const TEST_TOLERANCE: f64 = 1e-9;

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
pub fn value_close(target: f64, value: f64) -> bool {
    (target - value).abs() < TEST_TOLERANCE
}

/// Checks if each component of two state vectors is close enough to be
/// considered equal. Vectors of different length are never close.
pub fn vector_close(target: &[f64], value: &[f64]) -> bool {
    target.len() == value.len()
        && target
            .iter()
            .zip(value)
            .all(|(&target, &value)| value_close(target, value))
}
