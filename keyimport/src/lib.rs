//! # keyimport
//!
//! Import keys, certificates, CRLs, certificate requests and domain
//! parameters from PEM text.
//!
//! Every entry point runs the same pipeline. The candidate labels of the
//! requested object are tried in a fixed precedence order and the first
//! block found is committed to. Its payload is decoded into exact-size
//! scratch storage, decrypted when the block says so, parsed and checked.
//! The result is either a complete record or an [`Error`].
//!
//! ```no_run
//! let pem = std::fs::read("key.pem")?;
//! let key = keyimport::import_rsa_private_key(&pem, Some(b"secret".as_slice()))?;
//! println!("{} bit RSA key", key.bits());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Algorithm families can be compiled out through the `rsa`, `dsa`, `ec`,
//! `eddsa` and `dh` features. Their entry points then fail with
//! [`Error::NotImplemented`]. Without `encrypted-keys` every encrypted block
//! fails with [`Error::DecryptionFailed`].

#![forbid(unsafe_code)]

mod buffer;
mod candidate;
mod cascade;
pub mod error;
mod gate;
pub mod key;
mod object;
mod probe;

#[cfg(test)]
mod fixtures;

pub use candidate::{CandidateEntry, DecodeKind, ObjectKind};
pub use error::{Error, Result};
pub use gate::{Decryptor, HeaderDecryptor, Pbes2Decryptor};
pub use key::{
    DhParameters, DsaDomainParameters, DsaPrivateKey, DsaPublicKey, EcDomainParameters,
    EcPrivateKey, EcPublicKey, EddsaCurve, EddsaPrivateKey, EddsaPublicKey, RsaPrivateKey,
    RsaPublicKey,
};
pub use object::DerObject;
pub use probe::{KeyType, classify_private_key, classify_public_key};

use cascade::Adapter;

fn import<A: Adapter>(adapter: &A, input: &[u8], password: Option<&[u8]>) -> Result<A::Output> {
    cascade::run(adapter, input, password).map(|(output, _)| output)
}

fn enabled(on: bool, family: &'static str) -> Result<()> {
    if on {
        Ok(())
    } else {
        Err(Error::NotImplemented(family))
    }
}

/// First `CERTIFICATE` block of `input`.
pub fn import_certificate(input: &[u8]) -> Result<DerObject> {
    import(&object::CertificateAdapter, input, None)
}

/// First `X509 CRL` block of `input`.
pub fn import_crl(input: &[u8]) -> Result<DerObject> {
    import(&object::CrlAdapter, input, None)
}

/// First `CERTIFICATE REQUEST` block of `input`.
pub fn import_csr(input: &[u8]) -> Result<DerObject> {
    import(&object::CsrAdapter, input, None)
}

pub fn import_dh_parameters(input: &[u8]) -> Result<DhParameters> {
    enabled(cfg!(feature = "dh"), "DH")?;
    import(&key::dh::ParametersAdapter, input, None)
}

pub fn import_rsa_public_key(input: &[u8]) -> Result<RsaPublicKey> {
    enabled(cfg!(feature = "rsa"), "RSA")?;
    import(&key::rsa::PublicKeyAdapter, input, None)
}

/// RSA private key from `RSA PRIVATE KEY`, `PRIVATE KEY` or
/// `ENCRYPTED PRIVATE KEY`, in that order.
///
/// `password` is only consulted when the committed block is encrypted.
pub fn import_rsa_private_key(input: &[u8], password: Option<&[u8]>) -> Result<RsaPrivateKey> {
    enabled(cfg!(feature = "rsa"), "RSA")?;
    import(&key::rsa::PrivateKeyAdapter, input, password)
}

pub fn import_dsa_public_key(input: &[u8]) -> Result<DsaPublicKey> {
    enabled(cfg!(feature = "dsa"), "DSA")?;
    import(&key::dsa::PublicKeyAdapter, input, None)
}

pub fn import_dsa_private_key(input: &[u8], password: Option<&[u8]>) -> Result<DsaPrivateKey> {
    enabled(cfg!(feature = "dsa"), "DSA")?;
    import(&key::dsa::PrivateKeyAdapter, input, password)
}

/// Named curve from `EC PARAMETERS`, or from the first EC key found.
///
/// No password is taken, so an encrypted `EC PRIVATE KEY` fails with
/// [`Error::DecryptionFailed`].
pub fn import_ec_parameters(input: &[u8]) -> Result<EcDomainParameters> {
    enabled(cfg!(feature = "ec"), "EC")?;
    import(&key::ec::ParametersAdapter, input, None)
}

pub fn import_ec_public_key(input: &[u8]) -> Result<EcPublicKey> {
    enabled(cfg!(feature = "ec"), "EC")?;
    import(&key::ec::PublicKeyAdapter, input, None)
}

pub fn import_ec_private_key(input: &[u8], password: Option<&[u8]>) -> Result<EcPrivateKey> {
    enabled(cfg!(feature = "ec"), "EC")?;
    import(&key::ec::PrivateKeyAdapter, input, password)
}

pub fn import_eddsa_public_key(input: &[u8]) -> Result<EddsaPublicKey> {
    enabled(cfg!(feature = "eddsa"), "EdDSA")?;
    import(&key::eddsa::PublicKeyAdapter, input, None)
}

pub fn import_eddsa_private_key(
    input: &[u8],
    password: Option<&[u8]>,
) -> Result<EddsaPrivateKey> {
    enabled(cfg!(feature = "eddsa"), "EdDSA")?;
    import(&key::eddsa::PrivateKeyAdapter, input, password)
}

/// Walks the `CERTIFICATE` blocks of a chain in textual order.
///
/// Iteration ends when no further block is found. The first error is
/// yielded and ends iteration too.
#[derive(Debug, Clone)]
pub struct CertificateIter<'a> {
    input: &'a [u8],
    done: bool,
}

impl<'a> CertificateIter<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, done: false }
    }
}

impl Iterator for CertificateIter<'_> {
    type Item = Result<DerObject>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match import_certificate(self.input) {
            Ok(cert) if cert.consumed == 0 => {
                self.done = true;
                Some(Err(Error::InvalidParameter("certificate block consumed no input")))
            }
            Ok(cert) => {
                self.input = self.input.get(cert.consumed..).unwrap_or_default();
                Some(Ok(cert))
            }
            Err(Error::NotFound(_)) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Iterate over every certificate of `input`.
pub fn certificates(input: &[u8]) -> CertificateIter<'_> {
    CertificateIter::new(input)
}
