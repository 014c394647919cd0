use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported encryption scheme: {0}")]
    UnsupportedScheme(String),

    #[error("unsupported key derivation function: {0}")]
    UnsupportedKdf(String),

    #[error("unsupported pseudo-random function: {0}")]
    UnsupportedPrf(String),

    #[error("unsupported cipher: {0}")]
    UnsupportedCipher(String),

    #[error("missing parameters for {0}")]
    MissingParameters(&'static str),

    #[error("expected SEQUENCE for {0}")]
    ExpectedSequence(&'static str),

    #[error("expected {expected} elements, got {actual}")]
    InvalidElementCount {
        expected: &'static str,
        actual: usize,
    },

    #[error("expected OCTET STRING for {0}")]
    ExpectedOctetString(&'static str),

    #[error("expected INTEGER for {0}")]
    ExpectedInteger(&'static str),

    #[error("iteration count out of range")]
    InvalidIterationCount,

    #[error("iteration count {0} exceeds the supported maximum")]
    IterationCountTooLarge(u32),

    #[error("key length {actual} does not match cipher key length {expected}")]
    KeyLengthMismatch { expected: usize, actual: usize },

    #[error("key derivation failed")]
    KeyDerivation,

    #[error(transparent)]
    PKIXTypes(#[from] pkix_types::Error),

    #[error("cipher error: {0}")]
    Cipher(#[from] crate::cipher::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
