use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("AlgorithmIdentifier is not a SEQUENCE")]
    AlgorithmIdentifierExpectedSequence,
    #[error("AlgorithmIdentifier has no algorithm")]
    AlgorithmIdentifierEmpty,
    #[error("AlgorithmIdentifier algorithm is not an OBJECT IDENTIFIER")]
    AlgorithmIdentifierExpectedOid,
    #[error("AlgorithmIdentifier has {0} elements, at most 2 allowed")]
    AlgorithmIdentifierTooManyElements(usize),
    /// NULL parameters carry nothing to convert.
    #[error("NULL algorithm parameters have no typed form")]
    NullParameterNotSupported,

    #[error("SubjectPublicKeyInfo: {0}")]
    InvalidSubjectPublicKeyInfo(String),
    /// The public key BIT STRING does not end on an octet boundary.
    #[error("subjectPublicKey has {0} unused bits")]
    UnalignedPublicKey(u8),

    #[error(transparent)]
    Parameter(#[from] crate::algorithm::parameters::Error),

    #[error("ASN.1 error: {0}")]
    ASN1Error(#[from] asn1::error::Error),
}
