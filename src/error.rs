// src/error.rs

//! Error type for the fallible stepping API.
//!
//! The nominal `update`/`compute` methods never fail: singular
//! denominators surface as Inf/NaN and dimension mismatches as nalgebra
//! panics. The `try_*` variants run the same arithmetic but report those
//! conditions through [`DynamicsError`] and leave the state untouched.

use thiserror::Error;

/// Out-of-domain conditions detected by the `try_*` methods.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DynamicsError {
    /// The integration step was zero, negative, or NaN.
    #[error("time step must be positive, got {dt}")]
    NonPositiveTimestep {
        /// The rejected time step.
        dt: f64,
    },

    /// A denominator formed from physical parameters vanished.
    #[error("singular {term} denominator ({value})")]
    SingularDenominator {
        /// Which term of the equations of motion was singular.
        term: &'static str,
        /// Value of the denominator.
        value: f64,
    },

    /// A state or control vector had the wrong length.
    #[error("dimension mismatch: expected {expected} elements, got {actual}")]
    DimensionMismatch {
        /// Length the model expects.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// The step produced Inf or NaN.
    #[error("non-finite {what} after step")]
    NonFinite {
        /// Quantity that stopped being finite.
        what: &'static str,
    },
}

impl DynamicsError {
    /// Rejects `dt` unless it is strictly positive.
    pub(crate) fn check_dt(dt: f64) -> Result<(), Self> {
        if dt > 0.0 {
            Ok(())
        } else {
            Err(Self::NonPositiveTimestep { dt })
        }
    }

    /// Rejects a slice whose length differs from `expected`.
    pub(crate) const fn check_len(expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::DimensionMismatch { expected, actual })
        }
    }
}
