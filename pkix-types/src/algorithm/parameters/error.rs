//! Algorithm Parameters Error Types

use thiserror::Error;

/// Algorithm Parameters Error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Curve OID that is not one of the supported named curves
    #[error("unknown curve OID: {0}")]
    UnknownCurve(String),

    /// implicitCurve or specifiedCurve, which PKIX forbids
    #[error("ECParameters must be a namedCurve, got {0}")]
    NotNamedCurve(&'static str),

    /// Element type mismatch
    #[error("Expected {expected} but got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: String,
    },

    /// Invalid element count
    #[error("Expected {expected} elements but got {actual}")]
    InvalidElementCount { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
