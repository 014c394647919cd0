//! EdDSA keys (RFC 8410).

use std::fmt;

use asn1::{BitString, Element};
use log::debug;
use pkcs::pkcs8::OneAsymmetricKey;
use pkix_types::{AlgorithmIdentifier, SubjectPublicKeyInfo};
use zeroize::Zeroizing;

use super::octets;
use crate::buffer::DecodedContainer;
use crate::candidate::{DecodeKind, ObjectKind};
use crate::cascade::{Adapter, unexpected};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EddsaCurve {
    Ed25519,
    Ed448,
}

impl EddsaCurve {
    /// Length of both the private seed and the public key.
    pub const fn key_len(&self) -> usize {
        match self {
            EddsaCurve::Ed25519 => 32,
            EddsaCurve::Ed448 => 57,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            EddsaCurve::Ed25519 => "Ed25519",
            EddsaCurve::Ed448 => "Ed448",
        }
    }

    fn check_len(&self, key: &[u8], field: &'static str) -> Result<()> {
        if key.len() != self.key_len() {
            debug!("{} {field} is {} bytes", self.name(), key.len());
            return Err(Error::malformed(format!(
                "{} {field} must be {} bytes, got {}",
                self.name(),
                self.key_len(),
                key.len()
            )));
        }
        Ok(())
    }
}

impl TryFrom<&AlgorithmIdentifier> for EddsaCurve {
    type Error = Error;

    fn try_from(algorithm: &AlgorithmIdentifier) -> Result<Self> {
        let curve = if algorithm.is(AlgorithmIdentifier::OID_ED25519) {
            EddsaCurve::Ed25519
        } else if algorithm.is(AlgorithmIdentifier::OID_ED448) {
            EddsaCurve::Ed448
        } else {
            debug!("not an EdDSA algorithm: {}", algorithm.algorithm());
            return Err(Error::WrongIdentifier(format!(
                "not an EdDSA algorithm: {}",
                algorithm.algorithm()
            )));
        };
        // RFC 8410: parameters MUST be absent.
        if algorithm.parameters().is_some() {
            return Err(Error::malformed(format!(
                "{} algorithm with parameters",
                curve.name()
            )));
        }
        Ok(curve)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EddsaPublicKey {
    /// `None` only in the default value.
    pub curve: Option<EddsaCurve>,
    pub q: Vec<u8>,
}

impl TryFrom<&SubjectPublicKeyInfo> for EddsaPublicKey {
    type Error = Error;

    fn try_from(spki: &SubjectPublicKeyInfo) -> Result<Self> {
        let curve = EddsaCurve::try_from(spki.algorithm())?;
        let q = public_key(curve, spki.subject_public_key())?;
        Ok(Self {
            curve: Some(curve),
            q,
        })
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct EddsaPrivateKey {
    pub curve: Option<EddsaCurve>,
    pub d: Zeroizing<Vec<u8>>,
    /// Public key of a version 2 OneAsymmetricKey.
    pub q: Option<Vec<u8>>,
}

impl EddsaPrivateKey {
    pub fn public_key(&self) -> Option<EddsaPublicKey> {
        self.q.as_ref().map(|q| EddsaPublicKey {
            curve: self.curve,
            q: q.clone(),
        })
    }
}

impl fmt::Debug for EddsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EddsaPrivateKey")
            .field("curve", &self.curve)
            .field("q", &self.q)
            .finish_non_exhaustive()
    }
}

impl TryFrom<&OneAsymmetricKey> for EddsaPrivateKey {
    type Error = Error;

    fn try_from(info: &OneAsymmetricKey) -> Result<Self> {
        let curve = EddsaCurve::try_from(&info.private_key_algorithm)?;

        // CurvePrivateKey ::= OCTET STRING
        let Element::OctetString(d) = info.private_key_element()? else {
            return Err(Error::malformed("EdDSA private key is not an OCTET STRING"));
        };
        let d = Zeroizing::new(d.into_bytes());
        curve.check_len(&d, "private key")?;

        let q = info
            .public_key
            .as_ref()
            .map(|bits| public_key(curve, bits))
            .transpose()?;

        Ok(Self {
            curve: Some(curve),
            d,
            q,
        })
    }
}

fn public_key(curve: EddsaCurve, bits: &BitString) -> Result<Vec<u8>> {
    let q = octets(bits, "public key")?;
    curve.check_len(q, "public key")?;
    Ok(q.to_vec())
}

pub(crate) struct PublicKeyAdapter;

impl Adapter for PublicKeyAdapter {
    type Output = EddsaPublicKey;

    const KIND: ObjectKind = ObjectKind::EddsaPublicKey;

    fn adapt(&self, kind: DecodeKind, container: &DecodedContainer) -> Result<EddsaPublicKey> {
        match kind {
            DecodeKind::SubjectPublicKeyInfo => {
                let spki: SubjectPublicKeyInfo = container.parse()?;
                EddsaPublicKey::try_from(&spki)
            }
            other => Err(unexpected(Self::KIND, other)),
        }
    }
}

pub(crate) struct PrivateKeyAdapter;

impl Adapter for PrivateKeyAdapter {
    type Output = EddsaPrivateKey;

    const KIND: ObjectKind = ObjectKind::EddsaPrivateKey;

    fn adapt(&self, kind: DecodeKind, container: &DecodedContainer) -> Result<EddsaPrivateKey> {
        match kind {
            DecodeKind::Pkcs8PrivateKeyInfo | DecodeKind::Pkcs8EncryptedPrivateKeyInfo => {
                let info: OneAsymmetricKey = container.parse()?;
                EddsaPrivateKey::try_from(&info)
            }
            other => Err(unexpected(Self::KIND, other)),
        }
    }
}
