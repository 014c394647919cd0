//! Import error taxonomy.
//!
//! Lower crates report through their own enums. Every one of them maps onto
//! exactly one variant here, so callers only match on the taxonomy.

use pkix_types::algorithm::parameters;
use thiserror::Error;

use crate::candidate::ObjectKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The caller broke the call contract.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// No candidate label of the requested kind is present.
    #[error("no {0} found in input")]
    NotFound(ObjectKind),

    /// Scratch storage for the decoded payload could not be reserved.
    #[error("cannot allocate {0} bytes")]
    OutOfMemory(usize),

    /// Missing password, unsupported encryption or failed decryption.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// The bytes do not have the expected shape.
    #[error("malformed structure: {0}")]
    MalformedStructure(String),

    /// Well formed, but the algorithm or curve is not recognized.
    #[error("wrong identifier: {0}")]
    WrongIdentifier(String),

    /// The algorithm family is compiled out.
    #[error("{0} support is not enabled")]
    NotImplemented(&'static str),
}

impl Error {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedStructure(msg.into())
    }

    pub(crate) fn decryption(msg: impl Into<String>) -> Self {
        Error::DecryptionFailed(msg.into())
    }
}

impl From<pem::error::Error> for Error {
    fn from(e: pem::error::Error) -> Self {
        Error::malformed(format!("pem: {e}"))
    }
}

impl From<der::error::Error> for Error {
    fn from(e: der::error::Error) -> Self {
        Error::malformed(format!("der: {e}"))
    }
}

impl From<asn1::error::Error> for Error {
    fn from(e: asn1::error::Error) -> Self {
        Error::malformed(format!("asn1: {e}"))
    }
}

impl From<parameters::Error> for Error {
    fn from(e: parameters::Error) -> Self {
        match e {
            parameters::Error::UnknownCurve(_) => Error::WrongIdentifier(e.to_string()),
            _ => Error::malformed(e.to_string()),
        }
    }
}

impl From<pkix_types::Error> for Error {
    fn from(e: pkix_types::Error) -> Self {
        match e {
            pkix_types::Error::Parameter(e) => e.into(),
            _ => Error::malformed(e.to_string()),
        }
    }
}

impl From<pkcs::pkcs1::Error> for Error {
    fn from(e: pkcs::pkcs1::Error) -> Self {
        Error::malformed(format!("PKCS#1: {e}"))
    }
}

impl From<pkcs::dsa::Error> for Error {
    fn from(e: pkcs::dsa::Error) -> Self {
        Error::malformed(format!("DSA: {e}"))
    }
}

impl From<pkcs::pkcs3::Error> for Error {
    fn from(e: pkcs::pkcs3::Error) -> Self {
        Error::malformed(format!("PKCS#3: {e}"))
    }
}

impl From<pkcs::sec1::Error> for Error {
    fn from(e: pkcs::sec1::Error) -> Self {
        match e {
            pkcs::sec1::Error::Parameter(e) => e.into(),
            _ => Error::malformed(format!("SEC1: {e}")),
        }
    }
}

impl From<pkcs::pkcs8::Error> for Error {
    fn from(e: pkcs::pkcs8::Error) -> Self {
        match e {
            pkcs::pkcs8::Error::PkixTypes(e) => e.into(),
            _ => Error::malformed(format!("PKCS#8: {e}")),
        }
    }
}

impl From<pkcs::pkcs5::Error> for Error {
    fn from(e: pkcs::pkcs5::Error) -> Self {
        use pkcs::pkcs5::Error as Pkcs5;

        match e {
            Pkcs5::PKIXTypes(e) => e.into(),
            Pkcs5::MissingParameters(_)
            | Pkcs5::ExpectedSequence(_)
            | Pkcs5::InvalidElementCount { .. }
            | Pkcs5::ExpectedOctetString(_)
            | Pkcs5::ExpectedInteger(_) => Error::malformed(format!("PKCS#5: {e}")),
            _ => Error::decryption(format!("PKCS#5: {e}")),
        }
    }
}

impl From<pkcs::rfc1423::Error> for Error {
    fn from(e: pkcs::rfc1423::Error) -> Self {
        Error::decryption(format!("RFC 1423: {e}"))
    }
}

impl From<pkcs::cipher::Error> for Error {
    fn from(e: pkcs::cipher::Error) -> Self {
        Error::decryption(e.to_string())
    }
}
