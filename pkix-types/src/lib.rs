//! PKIX (Public Key Infrastructure using X.509) Common Types
//!
//! Types shared by the key containers of RFC 5280, RFC 5480, RFC 5958 and
//! RFC 8410: algorithm identifiers, their parameters and
//! `SubjectPublicKeyInfo`.

pub mod algorithm;
pub mod error;
pub mod subject_public_key_info;

pub use algorithm::{AlgorithmIdentifier, AlgorithmParameters};
pub use error::{Error, Result};
pub use subject_public_key_info::SubjectPublicKeyInfo;
