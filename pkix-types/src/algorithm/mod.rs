//! AlgorithmIdentifier (RFC 5280 Section 4.1.1.2) and the object
//! identifiers a key import has to recognize.
//!
//! ```asn1
//! AlgorithmIdentifier ::= SEQUENCE {
//!     algorithm   OBJECT IDENTIFIER,
//!     parameters  ANY DEFINED BY algorithm OPTIONAL
//! }
//! ```

use asn1::{Element, ObjectIdentifier};
use tsumiki::decoder::{DecodableFrom, Decoder};

use crate::error::{Error, Result};

pub mod parameters;

pub use parameters::{AlgorithmParameter, RawAlgorithmParameter};

/// Present parameters. An absent field is `None` on the identifier, so
/// RSA's explicit NULL and EdDSA's omission stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmParameters {
    Null,
    Other(RawAlgorithmParameter),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmIdentifier {
    pub algorithm: ObjectIdentifier,
    pub parameters: Option<AlgorithmParameters>,
}

impl AlgorithmIdentifier {
    // Public key algorithms (RFC 3279, RFC 4055, RFC 5480, RFC 8410)
    pub const OID_RSA_ENCRYPTION: &'static str = "1.2.840.113549.1.1.1";
    pub const OID_RSASSA_PSS: &'static str = "1.2.840.113549.1.1.10";
    pub const OID_ID_DSA: &'static str = "1.2.840.10040.4.1";
    pub const OID_EC_PUBLIC_KEY: &'static str = "1.2.840.10045.2.1";
    pub const OID_X25519: &'static str = "1.3.101.110";
    pub const OID_X448: &'static str = "1.3.101.111";
    pub const OID_ED25519: &'static str = "1.3.101.112";
    pub const OID_ED448: &'static str = "1.3.101.113";

    // PKCS#5 v2 (RFC 8018)
    pub const OID_PBES2: &'static str = "1.2.840.113549.1.5.13";
    pub const OID_PBKDF2: &'static str = "1.2.840.113549.1.5.12";
    pub const OID_HMAC_WITH_SHA1: &'static str = "1.2.840.113549.2.7";
    pub const OID_HMAC_WITH_SHA224: &'static str = "1.2.840.113549.2.8";
    pub const OID_HMAC_WITH_SHA256: &'static str = "1.2.840.113549.2.9";
    pub const OID_HMAC_WITH_SHA384: &'static str = "1.2.840.113549.2.10";
    pub const OID_HMAC_WITH_SHA512: &'static str = "1.2.840.113549.2.11";
    pub const OID_AES128_CBC: &'static str = "2.16.840.1.101.3.4.1.2";
    pub const OID_AES192_CBC: &'static str = "2.16.840.1.101.3.4.1.22";
    pub const OID_AES256_CBC: &'static str = "2.16.840.1.101.3.4.1.42";

    pub fn new(algorithm: ObjectIdentifier) -> Self {
        Self {
            algorithm,
            parameters: None,
        }
    }

    pub fn new_with_params(algorithm: ObjectIdentifier, parameters: AlgorithmParameters) -> Self {
        Self {
            algorithm,
            parameters: Some(parameters),
        }
    }

    pub fn algorithm(&self) -> &ObjectIdentifier {
        &self.algorithm
    }

    pub fn parameters(&self) -> &Option<AlgorithmParameters> {
        &self.parameters
    }

    /// Parameters read as `P`. Absent parameters are `Ok(None)`.
    pub fn parameter<P: AlgorithmParameter>(&self) -> Result<Option<P>> {
        match &self.parameters {
            None => Ok(None),
            Some(AlgorithmParameters::Null) => Err(Error::NullParameterNotSupported),
            Some(AlgorithmParameters::Other(raw)) => Ok(Some(P::parse(raw)?)),
        }
    }

    pub fn is(&self, oid: &str) -> bool {
        self.algorithm == oid
    }
}

impl DecodableFrom<Element> for AlgorithmIdentifier {}

impl Decoder<Element, AlgorithmIdentifier> for Element {
    type Error = Error;

    fn decode(&self) -> Result<AlgorithmIdentifier> {
        let Element::Sequence(fields) = self else {
            return Err(Error::AlgorithmIdentifierExpectedSequence);
        };
        let (algorithm, parameters) = match fields.as_slice() {
            [] => return Err(Error::AlgorithmIdentifierEmpty),
            [oid] => (oid, None),
            [oid, Element::Null] => (oid, Some(AlgorithmParameters::Null)),
            [oid, raw] => (
                oid,
                Some(AlgorithmParameters::Other(RawAlgorithmParameter::new(
                    raw.clone(),
                ))),
            ),
            _ => return Err(Error::AlgorithmIdentifierTooManyElements(fields.len())),
        };
        let Element::ObjectIdentifier(algorithm) = algorithm else {
            return Err(Error::AlgorithmIdentifierExpectedOid);
        };

        Ok(AlgorithmIdentifier {
            algorithm: algorithm.clone(),
            parameters,
        })
    }
}
