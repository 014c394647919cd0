use std::num::ParseIntError;

use thiserror::Error;

/// Raised while turning DER TLVs into typed elements.
#[derive(Debug, Error)]
pub enum Error {
    #[error("BOOLEAN content is not one octet")]
    InvalidBoolean,

    #[error("INTEGER has no content octets")]
    IntegerNoData,

    #[error("NULL has content octets")]
    NullWithContent,

    #[error("{0}")]
    ParseInt(#[from] ParseIntError),

    #[error("OBJECT IDENTIFIER has no content octets")]
    ObjectIdentifierNoData,
    #[error("OBJECT IDENTIFIER ends inside a subidentifier")]
    ObjectIdentifierIncompleteEncoding,
    #[error("OBJECT IDENTIFIER arc does not fit in u64")]
    ObjectIdentifierOverflow,
    #[error("OBJECT IDENTIFIER needs two or more arcs")]
    ObjectIdentifierTooFewComponents,

    #[error("BIT STRING has no unused-bits octet")]
    BitStringNoData,
    #[error("BIT STRING declares {0} unused bits")]
    BitStringUnusedBitsOutOfRange(u8),

    #[error("[{slot}]: {msg}")]
    InvalidContextSpecific { slot: u8, msg: String },

    #[error("DER: {0}")]
    FailedToDecodeDer(#[source] der::error::Error),
}
