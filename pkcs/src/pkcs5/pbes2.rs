use asn1::{Element, Integer};
use hmac::Hmac;
use pkix_types::{AlgorithmIdentifier, AlgorithmParameters};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use tsumiki::decoder::{DecodableFrom, Decoder};
use zeroize::Zeroizing;

use super::error::{Error, Result};
use crate::cipher::AesCbc;

/*
RFC 8018 Appendix A.2 / A.4

PBES2-params ::= SEQUENCE {
    keyDerivationFunc AlgorithmIdentifier {{PBES2-KDFs}},
    encryptionScheme  AlgorithmIdentifier {{PBES2-Encs}}
}

PBKDF2-params ::= SEQUENCE {
    salt CHOICE {
        specified OCTET STRING,
        otherSource AlgorithmIdentifier {{PBKDF2-SaltSources}}
    },
    iterationCount INTEGER (1..MAX),
    keyLength INTEGER (1..MAX) OPTIONAL,
    prf AlgorithmIdentifier {{PBKDF2-PRFs}} DEFAULT algid-hmacWithSHA1
}
*/

/// Pseudo-random function of PBKDF2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Prf {
    #[default]
    HmacWithSha1,
    HmacWithSha224,
    HmacWithSha256,
    HmacWithSha384,
    HmacWithSha512,
}

impl TryFrom<&AlgorithmIdentifier> for Prf {
    type Error = Error;

    fn try_from(alg: &AlgorithmIdentifier) -> Result<Self> {
        let oid = alg.algorithm().to_string();
        match oid.as_str() {
            AlgorithmIdentifier::OID_HMAC_WITH_SHA1 => Ok(Prf::HmacWithSha1),
            AlgorithmIdentifier::OID_HMAC_WITH_SHA224 => Ok(Prf::HmacWithSha224),
            AlgorithmIdentifier::OID_HMAC_WITH_SHA256 => Ok(Prf::HmacWithSha256),
            AlgorithmIdentifier::OID_HMAC_WITH_SHA384 => Ok(Prf::HmacWithSha384),
            AlgorithmIdentifier::OID_HMAC_WITH_SHA512 => Ok(Prf::HmacWithSha512),
            _ => Err(Error::UnsupportedPrf(oid)),
        }
    }
}

/// Largest accepted `iterationCount`. Key derivation cost grows linearly
/// with the count, which an attacker controls through a few encoded bytes.
/// Real tools write far less (OpenSSL defaults to 2048).
pub const MAX_ITERATION_COUNT: u32 = 10_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pbkdf2Params {
    pub salt: Vec<u8>,
    pub iteration_count: u32,
    pub key_length: Option<usize>,
    pub prf: Prf,
}

impl Pbkdf2Params {
    /// Run PBKDF2 and return a key of `key_len` bytes.
    pub fn derive_key(&self, password: &[u8], key_len: usize) -> Result<Zeroizing<Vec<u8>>> {
        if let Some(len) = self.key_length {
            if len != key_len {
                return Err(Error::KeyLengthMismatch {
                    expected: key_len,
                    actual: len,
                });
            }
        }

        let mut key = Zeroizing::new(vec![0u8; key_len]);
        let (salt, rounds, out) = (self.salt.as_slice(), self.iteration_count, key.as_mut_slice());
        let derived = match self.prf {
            Prf::HmacWithSha1 => pbkdf2::pbkdf2::<Hmac<Sha1>>(password, salt, rounds, out),
            Prf::HmacWithSha224 => pbkdf2::pbkdf2::<Hmac<Sha224>>(password, salt, rounds, out),
            Prf::HmacWithSha256 => pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, rounds, out),
            Prf::HmacWithSha384 => pbkdf2::pbkdf2::<Hmac<Sha384>>(password, salt, rounds, out),
            Prf::HmacWithSha512 => pbkdf2::pbkdf2::<Hmac<Sha512>>(password, salt, rounds, out),
        };
        derived.map_err(|_| Error::KeyDerivation)?;
        Ok(key)
    }
}

impl DecodableFrom<Element> for Pbkdf2Params {}

impl Decoder<Element, Pbkdf2Params> for Element {
    type Error = Error;

    fn decode(&self) -> Result<Pbkdf2Params> {
        let Element::Sequence(elements) = self else {
            return Err(Error::ExpectedSequence("PBKDF2-params"));
        };
        if !(2..=4).contains(&elements.len()) {
            return Err(Error::InvalidElementCount {
                expected: "2 to 4",
                actual: elements.len(),
            });
        }

        let Element::OctetString(salt) = &elements[0] else {
            return Err(Error::ExpectedOctetString("salt"));
        };
        let Element::Integer(iterations) = &elements[1] else {
            return Err(Error::ExpectedInteger("iterationCount"));
        };
        let iteration_count = iterations
            .to_u32()
            .filter(|n| *n > 0)
            .ok_or(Error::InvalidIterationCount)?;
        if iteration_count > MAX_ITERATION_COUNT {
            return Err(Error::IterationCountTooLarge(iteration_count));
        }

        // keyLength and prf are both optional; tell them apart by type.
        let mut key_length = None;
        let mut prf = Prf::default();
        for element in &elements[2..] {
            match element {
                Element::Integer(len) if key_length.is_none() => {
                    key_length = Some(key_length_from(len)?);
                }
                Element::Sequence(_) => {
                    let alg: AlgorithmIdentifier = element.decode()?;
                    prf = Prf::try_from(&alg)?;
                }
                _ => {
                    return Err(Error::ExpectedSequence("prf"));
                }
            }
        }

        Ok(Pbkdf2Params {
            salt: salt.as_bytes().to_vec(),
            iteration_count,
            key_length,
            prf,
        })
    }
}

fn key_length_from(len: &Integer) -> Result<usize> {
    len.to_u32()
        .map(|n| n as usize)
        .ok_or(Error::ExpectedInteger("keyLength"))
}

/// AES-CBC encryption scheme with its IV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionScheme {
    pub cipher: AesCbc,
    pub iv: Vec<u8>,
}

impl TryFrom<&AlgorithmIdentifier> for EncryptionScheme {
    type Error = Error;

    fn try_from(alg: &AlgorithmIdentifier) -> Result<Self> {
        let oid = alg.algorithm().to_string();
        let cipher = match oid.as_str() {
            AlgorithmIdentifier::OID_AES128_CBC => AesCbc::Aes128,
            AlgorithmIdentifier::OID_AES192_CBC => AesCbc::Aes192,
            AlgorithmIdentifier::OID_AES256_CBC => AesCbc::Aes256,
            _ => return Err(Error::UnsupportedCipher(oid)),
        };
        let Some(AlgorithmParameters::Other(raw)) = alg.parameters() else {
            return Err(Error::MissingParameters("encryptionScheme"));
        };
        let Element::OctetString(iv) = raw.element() else {
            return Err(Error::ExpectedOctetString("iv"));
        };
        Ok(EncryptionScheme {
            cipher,
            iv: iv.as_bytes().to_vec(),
        })
    }
}

/// PBES2 parameters of an `EncryptedPrivateKeyInfo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pbes2Params {
    pub kdf: Pbkdf2Params,
    pub encryption_scheme: EncryptionScheme,
}

impl Pbes2Params {
    /// Derive the key from `password` and decrypt `buf` in place.
    ///
    /// Returns the plaintext length.
    pub fn decrypt_in_place(&self, password: &[u8], buf: &mut [u8]) -> Result<usize> {
        let cipher = self.encryption_scheme.cipher;
        let key = self.kdf.derive_key(password, cipher.key_len())?;
        Ok(cipher.decrypt_in_place(&key, &self.encryption_scheme.iv, buf)?)
    }
}

impl DecodableFrom<Element> for Pbes2Params {}

impl Decoder<Element, Pbes2Params> for Element {
    type Error = Error;

    fn decode(&self) -> Result<Pbes2Params> {
        let Element::Sequence(elements) = self else {
            return Err(Error::ExpectedSequence("PBES2-params"));
        };
        let [kdf, encryption_scheme] = elements.as_slice() else {
            return Err(Error::InvalidElementCount {
                expected: "2",
                actual: elements.len(),
            });
        };

        let kdf: AlgorithmIdentifier = kdf.decode()?;
        if !kdf.is(AlgorithmIdentifier::OID_PBKDF2) {
            return Err(Error::UnsupportedKdf(kdf.algorithm().to_string()));
        }
        let Some(AlgorithmParameters::Other(kdf_params)) = kdf.parameters() else {
            return Err(Error::MissingParameters("keyDerivationFunc"));
        };

        let encryption_scheme: AlgorithmIdentifier = encryption_scheme.decode()?;
        Ok(Pbes2Params {
            kdf: kdf_params.element().decode()?,
            encryption_scheme: EncryptionScheme::try_from(&encryption_scheme)?,
        })
    }
}

impl TryFrom<&AlgorithmIdentifier> for Pbes2Params {
    type Error = Error;

    fn try_from(alg: &AlgorithmIdentifier) -> Result<Self> {
        if !alg.is(AlgorithmIdentifier::OID_PBES2) {
            return Err(Error::UnsupportedScheme(alg.algorithm().to_string()));
        }
        match alg.parameters() {
            Some(AlgorithmParameters::Other(raw)) => raw.element().decode(),
            _ => Err(Error::MissingParameters("PBES2")),
        }
    }
}
