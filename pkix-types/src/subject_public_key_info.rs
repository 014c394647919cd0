//! Subject Public Key Info
//!
//! RFC 5280 Section 4.1.2.7
//!
//! ```asn1
//! SubjectPublicKeyInfo  ::=  SEQUENCE  {
//!     algorithm            AlgorithmIdentifier,
//!     subjectPublicKey     BIT STRING
//! }
//! ```
//!
//! Carried by `PUBLIC KEY` blocks (RFC 7468 Section 13) and X.509 certificates.

use asn1::{BitString, Element};
use tsumiki::decoder::{DecodableFrom, Decoder};

use crate::algorithm::AlgorithmIdentifier;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPublicKeyInfo {
    algorithm: AlgorithmIdentifier,
    subject_public_key: BitString,
}

impl SubjectPublicKeyInfo {
    pub fn new(algorithm: AlgorithmIdentifier, subject_public_key: BitString) -> Self {
        Self {
            algorithm,
            subject_public_key,
        }
    }

    pub fn algorithm(&self) -> &AlgorithmIdentifier {
        &self.algorithm
    }

    pub fn subject_public_key(&self) -> &BitString {
        &self.subject_public_key
    }

    /// Key material as whole octets. Every key format read from a
    /// `PUBLIC KEY` block (DER for RSA and DSA, SEC1 points, raw EdDSA keys)
    /// is octet aligned.
    pub fn key_octets(&self) -> Result<&[u8]> {
        match self.subject_public_key.unused_bits() {
            0 => Ok(self.subject_public_key.as_bytes()),
            n => Err(Error::UnalignedPublicKey(n)),
        }
    }
}

impl DecodableFrom<Element> for SubjectPublicKeyInfo {}

impl Decoder<Element, SubjectPublicKeyInfo> for Element {
    type Error = Error;

    fn decode(&self) -> Result<SubjectPublicKeyInfo> {
        let invalid = |msg: String| Error::InvalidSubjectPublicKeyInfo(msg);

        let Element::Sequence(fields) = self else {
            return Err(invalid("not a SEQUENCE".into()));
        };
        let [algorithm, Element::BitString(subject_public_key)] = fields.as_slice() else {
            return Err(invalid(format!(
                "want AlgorithmIdentifier and BIT STRING, got {} fields",
                fields.len()
            )));
        };

        Ok(SubjectPublicKeyInfo::new(
            algorithm.decode()?,
            subject_public_key.clone(),
        ))
    }
}
