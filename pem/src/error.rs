use base64::DecodeError;
use thiserror::Error;

/// Failures while locating a block, splitting it into header and body, or
/// decoding its base64 payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("no -----BEGIN line")]
    MissingPreEncapsulationBoundary,

    /// A BEGIN line with no matching END line after it.
    #[error("no -----END line")]
    MissingPostEncapsulationBoundary,

    #[error("empty block body")]
    MissingData,

    #[error("unrecognized label")]
    InvalidLabel,

    #[error("BEGIN and END labels differ")]
    LabelMissMatch,

    #[error("malformed boundary line")]
    InvalidEncapsulationBoundary,

    #[error("block body is not ASCII")]
    NonAsciiText,

    /// A `Proc-Type` or `DEK-Info` line that does not parse.
    #[error("bad encapsulated header: {0}")]
    InvalidHeader(String),

    #[error("bad base64 line")]
    InvalidBase64Line,

    /// Padding somewhere other than the last line.
    #[error("bad final base64 line")]
    InvalidBase64Finl,

    #[error("payload needs {0} bytes of output")]
    OutputTooSmall(usize),

    #[error("base64: {0}")]
    Base64Decode(DecodeError),
}
