//! DSA keys.
//!
//! The legacy `DSA PRIVATE KEY` structure carries every value. PKCS#8 keeps
//! the domain parameters in the AlgorithmIdentifier and only `x` in the
//! privateKey field, so `y = g^x mod p` is recomputed. The public value of an
//! SPKI is an INTEGER wrapped in the BIT STRING.

use std::fmt;

use asn1::Element;
use log::debug;
use num_bigint::BigUint;
use pkcs::dsa::DSAPrivateKey;
use pkcs::pkcs8::OneAsymmetricKey;
use pkix_types::algorithm::parameters::DsaParameters;
use pkix_types::{AlgorithmIdentifier, SubjectPublicKeyInfo};

use super::{positive, require_algorithm};
use crate::buffer::{DecodedContainer, parse_element};
use crate::candidate::{DecodeKind, ObjectKind};
use crate::cascade::{Adapter, unexpected};
use crate::error::{Error, Result};

const DSA_ALGORITHMS: &[&str] = &[AlgorithmIdentifier::OID_ID_DSA];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DsaDomainParameters {
    pub p: BigUint,
    pub q: BigUint,
    pub g: BigUint,
}

impl DsaDomainParameters {
    fn new(p: &asn1::Integer, q: &asn1::Integer, g: &asn1::Integer) -> Result<Self> {
        let params = Self {
            p: positive(p, "p")?,
            q: positive(q, "q")?,
            g: positive(g, "g")?,
        };
        if params.g >= params.p {
            debug!("rejecting DSA generator not below p");
            return Err(Error::malformed("DSA generator is not below p"));
        }
        Ok(params)
    }

    /// Dss-Parms from an AlgorithmIdentifier. They are mandatory for keys.
    fn from_algorithm(algorithm: &AlgorithmIdentifier) -> Result<Self> {
        require_algorithm(algorithm, DSA_ALGORITHMS)?;
        let params = algorithm
            .parameter::<DsaParameters>()?
            .ok_or_else(|| Error::malformed("id-dsa without Dss-Parms"))?;
        Self::new(&params.p, &params.q, &params.g)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DsaPublicKey {
    pub params: DsaDomainParameters,
    pub y: BigUint,
}

impl TryFrom<&SubjectPublicKeyInfo> for DsaPublicKey {
    type Error = Error;

    fn try_from(spki: &SubjectPublicKeyInfo) -> Result<Self> {
        let params = DsaDomainParameters::from_algorithm(spki.algorithm())?;
        let element = parse_element(spki.key_octets()?)?;
        let Element::Integer(y) = element else {
            return Err(Error::malformed("DSA public key is not an INTEGER"));
        };
        Ok(Self {
            y: positive(&y, "y")?,
            params,
        })
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct DsaPrivateKey {
    pub params: DsaDomainParameters,
    pub x: BigUint,
    pub y: BigUint,
}

impl DsaPrivateKey {
    pub fn public_key(&self) -> DsaPublicKey {
        DsaPublicKey {
            params: self.params.clone(),
            y: self.y.clone(),
        }
    }
}

impl fmt::Debug for DsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DsaPrivateKey")
            .field("params", &self.params)
            .field("y", &self.y)
            .finish_non_exhaustive()
    }
}

impl TryFrom<&DSAPrivateKey> for DsaPrivateKey {
    type Error = Error;

    fn try_from(key: &DSAPrivateKey) -> Result<Self> {
        let params = DsaDomainParameters::new(&key.p, &key.q, &key.g)?;
        let x = positive(&key.x, "x")?;
        if x >= params.q {
            return Err(Error::malformed("DSA private value is not below q"));
        }
        Ok(Self {
            y: positive(&key.y, "y")?,
            x,
            params,
        })
    }
}

impl TryFrom<&OneAsymmetricKey> for DsaPrivateKey {
    type Error = Error;

    fn try_from(info: &OneAsymmetricKey) -> Result<Self> {
        let params = DsaDomainParameters::from_algorithm(&info.private_key_algorithm)?;
        let Element::Integer(x) = info.private_key_element()? else {
            return Err(Error::malformed("DSA private key is not an INTEGER"));
        };
        let x = positive(&x, "x")?;
        if x >= params.q {
            return Err(Error::malformed("DSA private value is not below q"));
        }
        Ok(Self {
            y: params.g.modpow(&x, &params.p),
            x,
            params,
        })
    }
}

pub(crate) struct PublicKeyAdapter;

impl Adapter for PublicKeyAdapter {
    type Output = DsaPublicKey;

    const KIND: ObjectKind = ObjectKind::DsaPublicKey;

    fn adapt(&self, kind: DecodeKind, container: &DecodedContainer) -> Result<DsaPublicKey> {
        match kind {
            DecodeKind::SubjectPublicKeyInfo => {
                let spki: SubjectPublicKeyInfo = container.parse()?;
                DsaPublicKey::try_from(&spki)
            }
            other => Err(unexpected(Self::KIND, other)),
        }
    }
}

pub(crate) struct PrivateKeyAdapter;

impl Adapter for PrivateKeyAdapter {
    type Output = DsaPrivateKey;

    const KIND: ObjectKind = ObjectKind::DsaPrivateKey;

    fn adapt(&self, kind: DecodeKind, container: &DecodedContainer) -> Result<DsaPrivateKey> {
        match kind {
            DecodeKind::RawLegacyStructure => {
                let key: DSAPrivateKey = container.parse()?;
                DsaPrivateKey::try_from(&key)
            }
            DecodeKind::Pkcs8PrivateKeyInfo | DecodeKind::Pkcs8EncryptedPrivateKeyInfo => {
                let info: OneAsymmetricKey = container.parse()?;
                DsaPrivateKey::try_from(&info)
            }
            other => Err(unexpected(Self::KIND, other)),
        }
    }
}
