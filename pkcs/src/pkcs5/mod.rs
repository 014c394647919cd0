//! PKCS#5: Password-Based Cryptography Specification
//!
//! Implements the decryption side of PBES2 from
//! [RFC 8018](https://datatracker.ietf.org/doc/html/rfc8018) as used by
//! `ENCRYPTED PRIVATE KEY` blocks: PBKDF2 with an HMAC-SHA PRF, and
//! AES-CBC as the encryption scheme.

pub mod error;
mod pbes2;

pub use error::{Error, Result};
pub use pbes2::{EncryptionScheme, MAX_ITERATION_COUNT, Pbes2Params, Pbkdf2Params, Prf};
