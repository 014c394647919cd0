use asn1::{ASN1Object, BitString, Element, OctetString};
use tsumiki::decoder::{DecodableFrom, Decoder};

use super::Result;
use super::error::Error;
use pkix_types::AlgorithmIdentifier;

/*
RFC 5958 - Asymmetric Key Packages

OneAsymmetricKey ::= SEQUENCE {
    version                   Version,
    privateKeyAlgorithm       PrivateKeyAlgorithmIdentifier,
    privateKey                PrivateKey,
    attributes            [0] Attributes OPTIONAL,
    ...,
    [[2: publicKey        [1] PublicKey OPTIONAL ]],
    ...
}

PrivateKeyInfo ::= OneAsymmetricKey

Version ::= INTEGER { v1(0), v2(1) } (v1, ..., v2)

PrivateKeyAlgorithmIdentifier ::= AlgorithmIdentifier

PrivateKey ::= OCTET STRING

PublicKey ::= BIT STRING

Attributes ::= SET OF Attribute
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    V1 = 0,
    /// Allows the `[1] publicKey` field.
    V2 = 1,
}

impl DecodableFrom<Element> for Version {}

impl Decoder<Element, Version> for Element {
    type Error = Error;

    fn decode(&self) -> Result<Version> {
        let Element::Integer(int) = self else {
            return Err(Error::ExpectedVersionInteger);
        };
        match int.to_u64() {
            Some(0) => Ok(Version::V1),
            Some(1) => Ok(Version::V2),
            _ => Err(Error::InvalidVersion(int.to_string())),
        }
    }
}

/// A decoded `PRIVATE KEY` payload, or the plaintext of an encrypted one.
///
/// `[1] publicKey` is only defined for v2. Decoding takes it from either
/// version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneAsymmetricKey {
    pub version: Version,
    pub private_key_algorithm: AlgorithmIdentifier,
    /// Algorithm specific encoding, see [`OneAsymmetricKey::private_key_element`].
    pub private_key: OctetString,
    /// `[0] attributes`, left undecoded.
    pub attributes: Option<Element>,
    pub public_key: Option<BitString>,
}

pub type PrivateKeyInfo = OneAsymmetricKey;

impl OneAsymmetricKey {
    /// Parse the algorithm-specific structure held in the privateKey OCTET STRING.
    ///
    /// RSA keys nest an RSAPrivateKey, EC keys an ECPrivateKey and EdDSA keys
    /// a `CurvePrivateKey ::= OCTET STRING`.
    pub fn private_key_element(&self) -> Result<Element> {
        let obj = ASN1Object::try_from(&self.private_key)?;
        let [element] = obj.elements() else {
            return Err(Error::InvalidElementCount {
                expected: "1",
                actual: obj.elements().len(),
            });
        };
        Ok(element.clone())
    }
}

impl DecodableFrom<Element> for OneAsymmetricKey {}

impl Decoder<Element, OneAsymmetricKey> for Element {
    type Error = Error;

    fn decode(&self) -> Result<OneAsymmetricKey> {
        let Element::Sequence(elements) = self else {
            return Err(Error::ExpectedSequence);
        };
        if !(3..=5).contains(&elements.len()) {
            return Err(Error::InvalidElementCount {
                expected: "3 to 5",
                actual: elements.len(),
            });
        }

        let version: Version = elements[0].decode()?;

        let private_key_algorithm: AlgorithmIdentifier = elements[1].decode()?;

        let Element::OctetString(private_key) = &elements[2] else {
            return Err(Error::ExpectedOctetString {
                field: "privateKey",
            });
        };

        let mut attributes = None;
        let mut public_key = None;
        for element in &elements[3..] {
            match element {
                Element::ContextSpecific {
                    slot: 0, element, ..
                } => attributes = Some(element.as_ref().clone()),
                Element::ContextSpecific {
                    slot: 1, element, ..
                } => {
                    public_key = Some(match element.as_ref() {
                        Element::BitString(bits) => bits.clone(),
                        // IMPLICIT [1] keeps the BIT STRING content primitive.
                        Element::OctetString(raw) => BitString::try_from(raw.as_bytes())?,
                        _ => return Err(Error::ExpectedBitString),
                    });
                }
                _ => {}
            }
        }

        Ok(OneAsymmetricKey {
            version,
            private_key_algorithm,
            private_key: private_key.clone(),
            attributes,
            public_key,
        })
    }
}

impl DecodableFrom<ASN1Object> for OneAsymmetricKey {}

impl Decoder<ASN1Object, OneAsymmetricKey> for ASN1Object {
    type Error = Error;

    fn decode(&self) -> Result<OneAsymmetricKey> {
        self.elements()
            .first()
            .ok_or(Error::EmptyAsn1Object)?
            .decode()
    }
}
