//! RSA keys.
//!
//! Read from PKCS#1 (`RSA PUBLIC KEY`, `RSA PRIVATE KEY`), PKCS#8 and
//! SubjectPublicKeyInfo.

use std::fmt;

use num_bigint::BigUint;
use pkcs::pkcs1;
use pkcs::pkcs8::OneAsymmetricKey;
use pkix_types::{AlgorithmIdentifier, SubjectPublicKeyInfo};
use tsumiki::decoder::Decoder;

use super::{positive, require_algorithm, unsigned};
use crate::buffer::{DecodedContainer, parse_element};
use crate::candidate::{DecodeKind, ObjectKind};
use crate::cascade::{Adapter, unexpected};
use crate::error::Result;

const RSA_ALGORITHMS: &[&str] = &[
    AlgorithmIdentifier::OID_RSA_ENCRYPTION,
    AlgorithmIdentifier::OID_RSASSA_PSS,
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub n: BigUint,
    pub e: BigUint,
}

impl RsaPublicKey {
    /// Modulus length in bits.
    pub fn bits(&self) -> u64 {
        self.n.bits()
    }
}

impl TryFrom<&pkcs1::RSAPublicKey> for RsaPublicKey {
    type Error = crate::error::Error;

    fn try_from(key: &pkcs1::RSAPublicKey) -> Result<Self> {
        Ok(Self {
            n: positive(&key.modulus, "modulus")?,
            e: positive(&key.public_exponent, "publicExponent")?,
        })
    }
}

impl TryFrom<&SubjectPublicKeyInfo> for RsaPublicKey {
    type Error = crate::error::Error;

    fn try_from(spki: &SubjectPublicKeyInfo) -> Result<Self> {
        require_algorithm(spki.algorithm(), RSA_ALGORITHMS)?;
        let element = parse_element(spki.key_octets()?)?;
        let key: pkcs1::RSAPublicKey = element.decode()?;
        Self::try_from(&key)
    }
}

/// RSA private key with its CRT components.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
    pub p: BigUint,
    pub q: BigUint,
    pub dp: BigUint,
    pub dq: BigUint,
    pub qinv: BigUint,
}

impl RsaPrivateKey {
    pub fn bits(&self) -> u64 {
        self.n.bits()
    }

    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }
}

// Private components stay out of logs.
impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("n", &self.n)
            .field("e", &self.e)
            .finish_non_exhaustive()
    }
}

impl TryFrom<&pkcs1::RSAPrivateKey> for RsaPrivateKey {
    type Error = crate::error::Error;

    fn try_from(key: &pkcs1::RSAPrivateKey) -> Result<Self> {
        Ok(Self {
            n: positive(&key.modulus, "modulus")?,
            e: positive(&key.public_exponent, "publicExponent")?,
            d: positive(&key.private_exponent, "privateExponent")?,
            p: unsigned(&key.prime1, "prime1")?,
            q: unsigned(&key.prime2, "prime2")?,
            dp: unsigned(&key.exponent1, "exponent1")?,
            dq: unsigned(&key.exponent2, "exponent2")?,
            qinv: unsigned(&key.coefficient, "coefficient")?,
        })
    }
}

impl TryFrom<&OneAsymmetricKey> for RsaPrivateKey {
    type Error = crate::error::Error;

    fn try_from(info: &OneAsymmetricKey) -> Result<Self> {
        require_algorithm(&info.private_key_algorithm, RSA_ALGORITHMS)?;
        let key: pkcs1::RSAPrivateKey = info.private_key_element()?.decode()?;
        Self::try_from(&key)
    }
}

pub(crate) struct PublicKeyAdapter;

impl Adapter for PublicKeyAdapter {
    type Output = RsaPublicKey;

    const KIND: ObjectKind = ObjectKind::RsaPublicKey;

    fn adapt(&self, kind: DecodeKind, container: &DecodedContainer) -> Result<RsaPublicKey> {
        match kind {
            DecodeKind::RawLegacyStructure => {
                let key: pkcs1::RSAPublicKey = container.parse()?;
                RsaPublicKey::try_from(&key)
            }
            DecodeKind::SubjectPublicKeyInfo => {
                let spki: SubjectPublicKeyInfo = container.parse()?;
                RsaPublicKey::try_from(&spki)
            }
            other => Err(unexpected(Self::KIND, other)),
        }
    }
}

pub(crate) struct PrivateKeyAdapter;

impl Adapter for PrivateKeyAdapter {
    type Output = RsaPrivateKey;

    const KIND: ObjectKind = ObjectKind::RsaPrivateKey;

    fn adapt(&self, kind: DecodeKind, container: &DecodedContainer) -> Result<RsaPrivateKey> {
        match kind {
            DecodeKind::RawLegacyStructure => {
                let key: pkcs1::RSAPrivateKey = container.parse()?;
                RsaPrivateKey::try_from(&key)
            }
            // The gate leaves a PrivateKeyInfo behind for both PKCS#8 labels.
            DecodeKind::Pkcs8PrivateKeyInfo | DecodeKind::Pkcs8EncryptedPrivateKeyInfo => {
                let info: OneAsymmetricKey = container.parse()?;
                RsaPrivateKey::try_from(&info)
            }
            other => Err(unexpected(Self::KIND, other)),
        }
    }
}
