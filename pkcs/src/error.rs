use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("ASN.1 error: {0}")]
    Asn1(#[from] asn1::error::Error),

    #[error("DER error: {0}")]
    Der(#[from] der::error::Error),

    #[error("cipher error: {0}")]
    Cipher(#[from] crate::cipher::Error),

    #[error("DSA error: {0}")]
    Dsa(#[from] crate::dsa::Error),

    #[error("PKCS#1 error: {0}")]
    Pkcs1(#[from] crate::pkcs1::Error),

    #[error("PKCS#3 error: {0}")]
    Pkcs3(#[from] crate::pkcs3::Error),

    #[error("PKCS#5 error: {0}")]
    Pkcs5(#[from] crate::pkcs5::Error),

    #[error("PKCS#8 error: {0}")]
    Pkcs8(#[from] crate::pkcs8::Error),

    #[error("RFC 1423 error: {0}")]
    Rfc1423(#[from] crate::rfc1423::Error),

    #[error("SEC1 error: {0}")]
    Sec1(#[from] crate::sec1::Error),

    #[error(transparent)]
    PKIXTypes(#[from] pkix_types::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
