//! Private key and parameter structures found in PEM blocks.
//!
//! Each module decodes one family from an ASN.1 [`asn1::Element`] through
//! the [`tsumiki::decoder::Decoder`] trait. [`rfc1423`] and [`pkcs5`] undo
//! the two password encryptions OpenSSL writes.

pub mod cipher;
pub mod dsa;
pub mod error;
pub mod pkcs1;
pub mod pkcs3;
pub mod pkcs5;
pub mod pkcs8;
pub mod rfc1423;
pub mod sec1;

pub use error::{Error, Result};
