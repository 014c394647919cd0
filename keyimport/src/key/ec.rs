//! Elliptic curve keys and domain parameters over named curves.

use std::fmt;

use log::debug;
use pkcs::pkcs8::OneAsymmetricKey;
use pkcs::sec1::ECPrivateKey;
use pkix_types::algorithm::parameters::{EcParameters, NamedCurve};
use pkix_types::{AlgorithmIdentifier, SubjectPublicKeyInfo};
use tsumiki::decoder::Decoder;
use zeroize::Zeroizing;

use super::{octets, require_algorithm};
use crate::buffer::DecodedContainer;
use crate::candidate::{DecodeKind, ObjectKind};
use crate::cascade::{Adapter, unexpected};
use crate::error::{Error, Result};

const EC_ALGORITHMS: &[&str] = &[AlgorithmIdentifier::OID_EC_PUBLIC_KEY];

/// Named curve of a key. `None` only in the default value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EcDomainParameters {
    pub curve: Option<NamedCurve>,
}

impl From<NamedCurve> for EcDomainParameters {
    fn from(curve: NamedCurve) -> Self {
        Self { curve: Some(curve) }
    }
}

impl From<&EcParameters> for EcDomainParameters {
    fn from(params: &EcParameters) -> Self {
        params.named_curve().into()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EcPublicKey {
    pub params: EcDomainParameters,
    /// Encoded point, `04 || X || Y` or compressed.
    pub q: Vec<u8>,
}

impl TryFrom<&SubjectPublicKeyInfo> for EcPublicKey {
    type Error = Error;

    fn try_from(spki: &SubjectPublicKeyInfo) -> Result<Self> {
        let curve = curve_of(spki.algorithm())?
            .ok_or_else(|| Error::malformed("id-ecPublicKey without curve parameters"))?;
        let q = spki.key_octets()?;
        check_point(curve, q)?;
        Ok(Self {
            params: curve.into(),
            q: q.to_vec(),
        })
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct EcPrivateKey {
    pub params: EcDomainParameters,
    pub d: Zeroizing<Vec<u8>>,
    /// Public point when the container carries one.
    pub q: Option<Vec<u8>>,
}

impl fmt::Debug for EcPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcPrivateKey")
            .field("params", &self.params)
            .field("q", &self.q)
            .finish_non_exhaustive()
    }
}

impl EcPrivateKey {
    /// Build from a SEC1 structure. Curve parameters found outside it, in a
    /// PKCS#8 AlgorithmIdentifier, take precedence over the inner ones.
    fn from_sec1(key: &ECPrivateKey, outer: Option<NamedCurve>) -> Result<Self> {
        let curve = match (outer, key.named_curve()) {
            (Some(outer), Some(inner)) if outer != inner => {
                debug!("curve mismatch: {} outside, {} inside", outer.name(), inner.name());
                return Err(Error::malformed("conflicting curve parameters"));
            }
            (Some(curve), _) | (None, Some(curve)) => curve,
            (None, None) => return Err(Error::malformed("EC private key without curve")),
        };

        let d = key.private_key.as_bytes();
        if d.is_empty() {
            return Err(Error::malformed("empty EC private key"));
        }

        let q = key
            .public_key
            .as_ref()
            .map(|bits| -> Result<Vec<u8>> {
                let q = octets(bits, "publicKey")?;
                check_point(curve, q)?;
                Ok(q.to_vec())
            })
            .transpose()?;

        Ok(Self {
            params: curve.into(),
            d: Zeroizing::new(d.to_vec()),
            q,
        })
    }

    /// The public key, if the private key container carried the point.
    pub fn public_key(&self) -> Option<EcPublicKey> {
        self.q.as_ref().map(|q| EcPublicKey {
            params: self.params,
            q: q.clone(),
        })
    }
}

impl TryFrom<&ECPrivateKey> for EcPrivateKey {
    type Error = Error;

    fn try_from(key: &ECPrivateKey) -> Result<Self> {
        Self::from_sec1(key, None)
    }
}

impl TryFrom<&OneAsymmetricKey> for EcPrivateKey {
    type Error = Error;

    fn try_from(info: &OneAsymmetricKey) -> Result<Self> {
        let outer = curve_of(&info.private_key_algorithm)?;
        let key: ECPrivateKey = info.private_key_element()?.decode()?;
        Self::from_sec1(&key, outer)
    }
}

/// Curve named by an id-ecPublicKey AlgorithmIdentifier, if any.
fn curve_of(algorithm: &AlgorithmIdentifier) -> Result<Option<NamedCurve>> {
    require_algorithm(algorithm, EC_ALGORITHMS)?;
    Ok(algorithm
        .parameter::<EcParameters>()?
        .map(|params| params.named_curve()))
}

/// The encoded point must be non-empty and sized for the curve.
fn check_point(curve: NamedCurve, q: &[u8]) -> Result<()> {
    let size = curve.field_size();
    let expected = match q.first() {
        None => return Err(Error::malformed("empty EC public point")),
        Some(0x04) => 1 + 2 * size,
        Some(0x02 | 0x03) => 1 + size,
        Some(other) => {
            return Err(Error::malformed(format!(
                "unknown EC point encoding {other:#04x}"
            )));
        }
    };
    if q.len() != expected {
        debug!(
            "{} point is {} bytes, expected {expected}",
            curve.name(),
            q.len()
        );
        return Err(Error::malformed(format!(
            "{} point must be {expected} bytes, got {}",
            curve.name(),
            q.len()
        )));
    }
    Ok(())
}

pub(crate) struct ParametersAdapter;

impl Adapter for ParametersAdapter {
    type Output = EcDomainParameters;

    const KIND: ObjectKind = ObjectKind::EcParameters;

    fn adapt(&self, kind: DecodeKind, container: &DecodedContainer) -> Result<EcDomainParameters> {
        match kind {
            DecodeKind::RawAsn1Sequence => {
                let params: EcParameters = container.parse()?;
                Ok((&params).into())
            }
            DecodeKind::RawLegacyStructure => {
                let key: ECPrivateKey = container.parse()?;
                key.named_curve()
                    .map(EcDomainParameters::from)
                    .ok_or_else(|| Error::malformed("EC private key without curve"))
            }
            DecodeKind::Pkcs8PrivateKeyInfo => {
                let info: OneAsymmetricKey = container.parse()?;
                Ok(EcPrivateKey::try_from(&info)?.params)
            }
            DecodeKind::SubjectPublicKeyInfo => {
                let spki: SubjectPublicKeyInfo = container.parse()?;
                Ok(EcPublicKey::try_from(&spki)?.params)
            }
            other => Err(unexpected(Self::KIND, other)),
        }
    }
}

pub(crate) struct PublicKeyAdapter;

impl Adapter for PublicKeyAdapter {
    type Output = EcPublicKey;

    const KIND: ObjectKind = ObjectKind::EcPublicKey;

    fn adapt(&self, kind: DecodeKind, container: &DecodedContainer) -> Result<EcPublicKey> {
        match kind {
            DecodeKind::SubjectPublicKeyInfo => {
                let spki: SubjectPublicKeyInfo = container.parse()?;
                EcPublicKey::try_from(&spki)
            }
            other => Err(unexpected(Self::KIND, other)),
        }
    }
}

pub(crate) struct PrivateKeyAdapter;

impl Adapter for PrivateKeyAdapter {
    type Output = EcPrivateKey;

    const KIND: ObjectKind = ObjectKind::EcPrivateKey;

    fn adapt(&self, kind: DecodeKind, container: &DecodedContainer) -> Result<EcPrivateKey> {
        match kind {
            DecodeKind::RawLegacyStructure => {
                let key: ECPrivateKey = container.parse()?;
                EcPrivateKey::try_from(&key)
            }
            DecodeKind::Pkcs8PrivateKeyInfo | DecodeKind::Pkcs8EncryptedPrivateKeyInfo => {
                let info: OneAsymmetricKey = container.parse()?;
                EcPrivateKey::try_from(&info)
            }
            other => Err(unexpected(Self::KIND, other)),
        }
    }
}
