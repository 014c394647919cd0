//! Key type probe.
//!
//! A read-only cascade: legacy labels name their algorithm, generic labels
//! are parsed just far enough to read the algorithm identifier.

use std::fmt::{Display, Formatter};

use asn1::ObjectIdentifier;
use log::debug;
use pkcs::pkcs8::OneAsymmetricKey;
use pkix_types::{AlgorithmIdentifier, SubjectPublicKeyInfo};

use crate::candidate::{DecodeKind, ObjectKind};
use crate::cascade;
use crate::error::{Error, Result};
use crate::gate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Rsa,
    Dsa,
    Ec,
    EdDsa,
    Unknown,
}

impl KeyType {
    pub fn from_oid(oid: &ObjectIdentifier) -> Self {
        match oid.to_string().as_str() {
            AlgorithmIdentifier::OID_RSA_ENCRYPTION | AlgorithmIdentifier::OID_RSASSA_PSS => {
                KeyType::Rsa
            }
            AlgorithmIdentifier::OID_ID_DSA => KeyType::Dsa,
            AlgorithmIdentifier::OID_EC_PUBLIC_KEY => KeyType::Ec,
            AlgorithmIdentifier::OID_ED25519 | AlgorithmIdentifier::OID_ED448 => KeyType::EdDsa,
            _ => KeyType::Unknown,
        }
    }

    fn from_legacy_label(label: pem::Label) -> Self {
        match label {
            pem::Label::RSAPublicKey | pem::Label::RSAPrivateKey => KeyType::Rsa,
            pem::Label::DSAPrivateKey => KeyType::Dsa,
            pem::Label::ECPrivateKey => KeyType::Ec,
            _ => KeyType::Unknown,
        }
    }
}

impl Display for KeyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            KeyType::Rsa => "RSA",
            KeyType::Dsa => "DSA",
            KeyType::Ec => "EC",
            KeyType::EdDsa => "EdDSA",
            KeyType::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

fn known(algorithm: &AlgorithmIdentifier) -> Result<KeyType> {
    match KeyType::from_oid(algorithm.algorithm()) {
        KeyType::Unknown => {
            debug!("unclassified key algorithm {}", algorithm.algorithm());
            Err(Error::WrongIdentifier(format!(
                "unclassified key algorithm {}",
                algorithm.algorithm()
            )))
        }
        key_type => Ok(key_type),
    }
}

fn classify(kind: ObjectKind, input: &[u8]) -> Result<KeyType> {
    let committed = cascade::commit(kind, input)?;
    let entry = committed.entry;
    match entry.kind {
        DecodeKind::RawLegacyStructure => Ok(KeyType::from_legacy_label(entry.label)),
        DecodeKind::SubjectPublicKeyInfo => {
            let spki: SubjectPublicKeyInfo = committed.acquire()?.parse()?;
            known(spki.algorithm())
        }
        DecodeKind::Pkcs8PrivateKeyInfo => {
            // No password: a header-encrypted block cannot be classified.
            let container = gate::open(entry.kind, committed.acquire()?, None)?;
            let info: OneAsymmetricKey = container.parse()?;
            known(&info.private_key_algorithm)
        }
        other => Err(cascade::unexpected(kind, other)),
    }
}

/// Algorithm of the first public key in `input`.
pub fn classify_public_key(input: &[u8]) -> Result<KeyType> {
    classify(ObjectKind::AnyPublicKey, input)
}

/// Algorithm of the first private key in `input`. Encrypted PKCS#8 blocks
/// are not considered.
pub fn classify_private_key(input: &[u8]) -> Result<KeyType> {
    classify(ObjectKind::AnyPrivateKey, input)
}
