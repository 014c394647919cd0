//! PKCS#1: RSA Cryptography Specifications
//!
//! The `RSAPrivateKey` and `RSAPublicKey` structures of
//! [RFC 8017 Appendix A.1](https://datatracker.ietf.org/doc/html/rfc8017#appendix-A.1),
//! carried by legacy `RSA PRIVATE KEY` and `RSA PUBLIC KEY` blocks and
//! inside PKCS#8 and SubjectPublicKeyInfo for rsaEncryption.

pub mod error;
mod types;

pub use error::{Error, Result};
pub use types::{RSAPrivateKey, RSAPublicKey, Version};
