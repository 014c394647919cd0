//! Errors raised while reading PrivateKeyInfo and EncryptedPrivateKeyInfo.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Only v1 (0) and v2 (1) are defined.
    #[error("unsupported PrivateKeyInfo version {0}")]
    InvalidVersion(String),

    #[error("PKCS#8 structure is not a SEQUENCE")]
    ExpectedSequence,

    #[error("PKCS#8 structure has {actual} fields, want {expected}")]
    InvalidElementCount {
        expected: &'static str,
        actual: usize,
    },

    #[error("{field} is not an OCTET STRING")]
    ExpectedOctetString { field: &'static str },

    #[error("PrivateKeyInfo version is not an INTEGER")]
    ExpectedVersionInteger,

    /// The decrypted or embedded key holds no DER element.
    #[error("no DER element in key payload")]
    EmptyAsn1Object,

    #[error("[1] publicKey is not a BIT STRING")]
    ExpectedBitString,

    #[error("ASN.1 error: {0}")]
    Asn1(#[from] asn1::error::Error),

    #[error("algorithm identifier: {0}")]
    PkixTypes(#[from] pkix_types::Error),
}
