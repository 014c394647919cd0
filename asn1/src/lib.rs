use std::{fmt::Display, str::FromStr};

use der::{Der, PrimitiveTag, Tag, Tlv};
use error::Error;
use num_bigint::{BigInt, BigUint};
use num_traits::{ToPrimitive, Zero};
use tsumiki::decoder::{DecodableFrom, Decoder};

pub mod error;

#[derive(Debug, Clone)]
pub struct ASN1Object {
    elements: Vec<Element>,
}

impl ASN1Object {
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn new(elements: Vec<Element>) -> Self {
        ASN1Object { elements }
    }
}

impl DecodableFrom<Der> for ASN1Object {}

impl Decoder<Der, ASN1Object> for Der {
    type Error = Error;

    fn decode(&self) -> Result<ASN1Object, Error> {
        let elements = self
            .elements()
            .iter()
            .map(Element::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ASN1Object { elements })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Boolean(bool),
    Integer(Integer),
    BitString(BitString),
    OctetString(OctetString),
    Null,
    ObjectIdentifier(ObjectIdentifier),
    Sequence(Vec<Element>),
    Set(Vec<Element>),
    ContextSpecific {
        slot: u8,
        constructed: bool,
        element: Box<Element>,
    },
    // strings, times and other tags are carried through untouched
    Unimplemented(Tlv),
}

impl TryFrom<&Tlv> for Element {
    type Error = Error;

    fn try_from(tlv: &Tlv) -> Result<Self, Self::Error> {
        match tlv.tag() {
            Tag::Primitive(primitive_tag, _) => match primitive_tag {
                PrimitiveTag::Boolean => match tlv.data() {
                    Some([0x00]) => Ok(Element::Boolean(false)),
                    Some([0xff]) => Ok(Element::Boolean(true)),
                    _ => Err(Error::InvalidBoolean),
                },
                PrimitiveTag::Integer => match tlv.data() {
                    Some(data) if !data.is_empty() => Ok(Element::Integer(Integer::from(data))),
                    _ => Err(Error::IntegerNoData),
                },
                PrimitiveTag::BitString => {
                    let data = tlv.data().ok_or(Error::BitStringNoData)?;
                    Ok(Element::BitString(BitString::try_from(data)?))
                }
                PrimitiveTag::OctetString => Ok(Element::OctetString(OctetString::from(
                    tlv.data().unwrap_or_default(),
                ))),
                PrimitiveTag::Null => match tlv.data() {
                    Some([]) => Ok(Element::Null),
                    _ => Err(Error::NullWithContent),
                },
                PrimitiveTag::ObjectIdentifier => {
                    let data = tlv.data().ok_or(Error::ObjectIdentifierNoData)?;
                    Ok(Element::ObjectIdentifier(ObjectIdentifier::try_from(data)?))
                }
                PrimitiveTag::Sequence => Ok(Element::Sequence(children(tlv)?)),
                PrimitiveTag::Set => Ok(Element::Set(children(tlv)?)),
                _ => Ok(Element::Unimplemented(tlv.clone())),
            },
            Tag::ContextSpecific { slot, constructed } => {
                if *constructed {
                    // EXPLICIT tagging wraps exactly one element. An IMPLICIT
                    // SET OF / SEQUENCE OF keeps its children as a sequence.
                    let mut elements = children(tlv)?;
                    let element = if elements.len() == 1 {
                        elements.remove(0)
                    } else {
                        Element::Sequence(elements)
                    };
                    Ok(Element::ContextSpecific {
                        slot: *slot,
                        constructed: true,
                        element: Box::new(element),
                    })
                } else {
                    // Primitive: IMPLICIT tagging
                    // Store raw data as OctetString - the upper layer decoder interprets based on schema
                    let data = tlv.data().ok_or_else(|| Error::InvalidContextSpecific {
                        slot: *slot,
                        msg: "context-specific primitive has no data".to_string(),
                    })?;
                    Ok(Element::ContextSpecific {
                        slot: *slot,
                        constructed: false,
                        element: Box::new(Element::OctetString(OctetString::from(data))),
                    })
                }
            }
        }
    }
}

fn children(tlv: &Tlv) -> Result<Vec<Element>, Error> {
    tlv.tlvs()
        .unwrap_or_default()
        .iter()
        .map(Element::try_from)
        .collect()
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Boolean(b) => write!(f, "Boolean({})", b),
            Element::Integer(i) => write!(f, "Integer({})", i),
            Element::BitString(bs) => write!(f, "BitString({} bits)", bs.bit_len()),
            Element::OctetString(os) => write!(f, "OctetString({} bytes)", os.as_bytes().len()),
            Element::Null => write!(f, "Null"),
            Element::ObjectIdentifier(oid) => write!(f, "ObjectIdentifier({})", oid),
            Element::Sequence(seq) => write!(f, "Sequence(len={})", seq.len()),
            Element::Set(set) => write!(f, "Set(len={})", set.len()),
            Element::ContextSpecific {
                slot,
                constructed,
                element,
            } => write!(
                f,
                "ContextSpecific(slot: {}, constructed: {}, element: {})",
                slot, constructed, element
            ),
            Element::Unimplemented(tlv) => write!(f, "Unimplemented({:?})", tlv.tag()),
        }
    }
}

// ASN1 integer is possible to be a positive and negative value.
// This can be arbitrary sized values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Integer {
    inner: BigInt,
}

impl Integer {
    pub fn as_bigint(&self) -> &BigInt {
        &self.inner
    }

    /// The magnitude of a non-negative integer. `None` when negative.
    pub fn to_biguint(&self) -> Option<BigUint> {
        self.inner.to_biguint()
    }

    pub fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }

    pub fn to_u32(&self) -> Option<u32> {
        self.inner.to_u32()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.inner.to_u64()
    }
}

impl From<&[u8]> for Integer {
    fn from(value: &[u8]) -> Self {
        Integer {
            inner: BigInt::from_signed_bytes_be(value),
        }
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Integer {
            inner: BigInt::from(value),
        }
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    inner: Vec<u64>,
}

impl ObjectIdentifier {
    pub fn components(&self) -> &[u64] {
        &self.inner
    }
}

impl TryFrom<&[u8]> for ObjectIdentifier {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(Error::ObjectIdentifierNoData);
        }

        let mut arcs = Vec::new();
        let mut val = 0u64;
        let mut pending = false;
        for &b in value {
            if val > (u64::MAX >> 7) {
                return Err(Error::ObjectIdentifierOverflow);
            }
            val = (val << 7) | (b as u64 & 0x7f);
            pending = b & 0x80 != 0;
            if !pending {
                arcs.push(val);
                val = 0;
            }
        }
        if pending {
            return Err(Error::ObjectIdentifierIncompleteEncoding);
        }

        // The first subidentifier packs the first two arcs.
        let first = arcs[0];
        let (a, b) = match first {
            0..40 => (0, first),
            40..80 => (1, first - 40),
            _ => (2, first - 80),
        };
        let mut inner = Vec::with_capacity(arcs.len() + 1);
        inner.push(a);
        inner.push(b);
        inner.extend_from_slice(&arcs[1..]);
        Ok(ObjectIdentifier { inner })
    }
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self
            .inner
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", s)
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .split('.')
            .map(|s| s.parse::<u64>())
            .collect::<Result<Vec<u64>, _>>()?;
        if inner.len() < 2 {
            return Err(Error::ObjectIdentifierTooFewComponents);
        }
        Ok(ObjectIdentifier { inner })
    }
}

impl PartialEq<&str> for ObjectIdentifier {
    fn eq(&self, other: &&str) -> bool {
        let mut parts = other.split('.');
        self.inner
            .iter()
            .all(|n| parts.next().and_then(|p| p.parse::<u64>().ok()) == Some(*n))
            && parts.next().is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    unused: u8,
    data: Vec<u8>,
}

impl BitString {
    pub fn new(unused: u8, data: Vec<u8>) -> Self {
        BitString { unused, data }
    }

    pub fn unused_bits(&self) -> u8 {
        self.unused
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn bit_len(&self) -> usize {
        if self.data.is_empty() {
            0
        } else {
            self.data.len() * 8 - self.unused as usize
        }
    }
}

impl AsRef<[u8]> for BitString {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl TryFrom<&[u8]> for BitString {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        match value.split_first() {
            Some((&unused, data)) => {
                if unused > 7 || (data.is_empty() && unused != 0) {
                    return Err(Error::BitStringUnusedBitsOutOfRange(unused));
                }
                Ok(BitString {
                    unused,
                    data: data.to_vec(),
                })
            }
            None => Err(Error::BitStringNoData),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OctetString {
    inner: Vec<u8>,
}

impl OctetString {
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.inner
    }
}

impl TryFrom<&OctetString> for ASN1Object {
    type Error = Error;

    fn try_from(value: &OctetString) -> Result<Self, Self::Error> {
        let der: Der = value.as_bytes().decode().map_err(Error::FailedToDecodeDer)?;
        der.decode()
    }
}

impl AsRef<[u8]> for OctetString {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(value: Vec<u8>) -> Self {
        OctetString { inner: value }
    }
}

impl From<&[u8]> for OctetString {
    fn from(value: &[u8]) -> Self {
        OctetString {
            inner: value.to_vec(),
        }
    }
}
