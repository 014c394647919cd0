//! ECPrivateKey errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// `[0] parameters` did not name a usable curve.
    #[error("ECParameters: {0}")]
    Parameter(#[from] pkix_types::algorithm::parameters::Error),

    #[error("ECPrivateKey is not a SEQUENCE")]
    ExpectedSequence,

    #[error("{0} is not an INTEGER")]
    ExpectedInteger(&'static str),

    #[error("privateKey is not an OCTET STRING")]
    ExpectedOctetString,

    #[error("[1] publicKey is not a BIT STRING")]
    ExpectedBitString,

    #[error("ECPrivateKey is missing {0}")]
    InsufficientElements(&'static str),

    /// ecPrivkeyVer1 is the only version.
    #[error("ECPrivateKey version {0} is not ecPrivkeyVer1")]
    InvalidVersion(String),

    #[error("ASN.1 error: {0}")]
    Asn1(#[from] asn1::error::Error),
}
