//! Distinguished Encoding Rules (X.690) TLV walker.
//!
//! Only the definite length form is accepted. Constructed universal types
//! (SEQUENCE, SET) and constructed context-specific tags are parsed
//! recursively, everything else keeps its raw content octets.

use nom::{IResult, Parser};
use pem::Pem;
use tsumiki::decoder::{DecodableFrom, Decoder};

use error::Error;

pub mod error;

pub const TAG_CONSTRUCTED: u8 = 0x20;
const CLASS_MASK: u8 = 0xc0;
const CLASS_UNIVERSAL: u8 = 0x00;
const CLASS_CONTEXT_SPECIFIC: u8 = 0x80;
const TAG_NUMBER_MASK: u8 = 0x1f;

// Nesting deeper than this is not produced by any key or certificate encoder.
const MAX_DEPTH: usize = 32;

#[derive(Debug, Clone)]
pub struct Der {
    elements: Vec<Tlv>,
}

impl Der {
    pub fn new(elements: Vec<Tlv>) -> Self {
        Der { elements }
    }

    pub fn elements(&self) -> &[Tlv] {
        &self.elements
    }

    fn parse(input: &[u8]) -> Result<Der, Error> {
        if input.is_empty() {
            return Err(Error::Empty);
        }
        let mut elements = Vec::new();
        let mut rest = input;
        while !rest.is_empty() {
            let (r, tlv) = Tlv::parse(rest, 0)?;
            rest = r;
            elements.push(tlv);
        }
        Ok(Der { elements })
    }
}

impl DecodableFrom<Vec<u8>> for Der {}

impl Decoder<Vec<u8>, Der> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<Der, Self::Error> {
        Der::parse(self)
    }
}

impl DecodableFrom<&[u8]> for Der {}

impl Decoder<&[u8], Der> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Der, Self::Error> {
        Der::parse(self)
    }
}

impl DecodableFrom<Pem> for Der {}

impl Decoder<Pem, Der> for Pem {
    type Error = Error;

    fn decode(&self) -> Result<Der, Self::Error> {
        let bytes: Vec<u8> = self.decode()?;
        Der::parse(&bytes)
    }
}

/// Universal class tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrimitiveTag {
    Boolean,
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    UTF8String,
    Sequence,
    Set,
    PrintableString,
    IA5String,
    UTCTime,
    GeneralizedTime,
    Unimplemented(u8),
}

impl From<u8> for PrimitiveTag {
    fn from(value: u8) -> Self {
        match value {
            0x01 => Self::Boolean,
            0x02 => Self::Integer,
            0x03 => Self::BitString,
            0x04 => Self::OctetString,
            0x05 => Self::Null,
            0x06 => Self::ObjectIdentifier,
            0x0c => Self::UTF8String,
            0x30 => Self::Sequence,
            0x31 => Self::Set,
            0x13 => Self::PrintableString,
            0x16 => Self::IA5String,
            0x17 => Self::UTCTime,
            0x18 => Self::GeneralizedTime,
            _ => Self::Unimplemented(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Universal (or unsupported class) tag together with the raw identifier octet.
    Primitive(PrimitiveTag, u8),
    /// `[slot]` tag, either IMPLICIT primitive or EXPLICIT/IMPLICIT constructed.
    ContextSpecific { slot: u8, constructed: bool },
}

impl Tag {
    fn is_nested(&self) -> bool {
        match self {
            Tag::Primitive(t, _) => matches!(t, PrimitiveTag::Sequence | PrimitiveTag::Set),
            Tag::ContextSpecific { constructed, .. } => *constructed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    tag: Tag,
    length: usize,
    value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Tlv(Vec<Tlv>),
    Data(Vec<u8>),
}

impl Tlv {
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Content octets of a primitive TLV.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.value {
            Value::Data(d) => Some(d),
            Value::Tlv(_) => None,
        }
    }

    /// Children of a constructed TLV.
    pub fn tlvs(&self) -> Option<&[Tlv]> {
        match &self.value {
            Value::Tlv(t) => Some(t),
            Value::Data(_) => None,
        }
    }

    fn parse(input: &[u8], depth: usize) -> IResult<&[u8], Tlv> {
        if depth > MAX_DEPTH {
            return Err(failure(input, nom::error::ErrorKind::TooLarge));
        }
        let (input, tag) = parse_tag(input)?;
        let (input, length) = parse_length(input)?;
        let (input, data) = nom::bytes::complete::take(length).parse(input)?;

        if tag.is_nested() {
            // parse TLV recursively.
            let mut tlvs = Vec::new();
            let mut data = data;
            while !data.is_empty() {
                let (rest, v) = Self::parse(data, depth + 1)?;
                data = rest;
                tlvs.push(v);
            }
            return Ok((
                input,
                Tlv {
                    tag,
                    length,
                    value: Value::Tlv(tlvs),
                },
            ));
        }

        Ok((
            input,
            Tlv {
                tag,
                length,
                value: Value::Data(data.to_vec()),
            },
        ))
    }
}

fn failure(input: &[u8], kind: nom::error::ErrorKind) -> nom::Err<nom::error::Error<&[u8]>> {
    nom::Err::Failure(nom::error::Error::new(input, kind))
}

fn parse_tag(input: &[u8]) -> IResult<&[u8], Tag> {
    let (rest, n) = nom::number::complete::be_u8(input)?;
    if n & TAG_NUMBER_MASK == TAG_NUMBER_MASK {
        // high tag number form is never used by the structures handled here
        return Err(failure(input, nom::error::ErrorKind::Tag));
    }
    let tag = match n & CLASS_MASK {
        CLASS_CONTEXT_SPECIFIC => Tag::ContextSpecific {
            slot: n & TAG_NUMBER_MASK,
            constructed: n & TAG_CONSTRUCTED == TAG_CONSTRUCTED,
        },
        CLASS_UNIVERSAL => Tag::Primitive(PrimitiveTag::from(n), n),
        _ => Tag::Primitive(PrimitiveTag::Unimplemented(n), n),
    };
    Ok((rest, tag))
}

fn parse_length(input: &[u8]) -> IResult<&[u8], usize> {
    let (rest, n) = nom::number::complete::be_u8(input)?;
    if n & 0x80 == 0 {
        // short form: 0-127
        return Ok((rest, n as usize));
    }
    // long form
    // First 1 bit is a marker for long form.
    // Other bits represent bytes length of the length field.
    let count = (n & 0x7f) as usize;
    if count == 0 || count > std::mem::size_of::<usize>() {
        // 0x80 is the indefinite form, which DER forbids
        return Err(failure(input, nom::error::ErrorKind::LengthValue));
    }
    let (rest, bs) = nom::bytes::complete::take(count).parse(rest)?;
    let length = bs.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize);
    Ok((rest, length))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tsumiki::decoder::Decoder;

    use super::*;

    #[rstest(input, expected,
        case(vec![0x02], Tag::Primitive(PrimitiveTag::Integer, 0x02)),
        case(vec![0x30, 0x01], Tag::Primitive(PrimitiveTag::Sequence, 0x30)),
        case(vec![0xa0], Tag::ContextSpecific { slot: 0, constructed: true }),
        case(vec![0x81], Tag::ContextSpecific { slot: 1, constructed: false }),
        case(vec![0x41], Tag::Primitive(PrimitiveTag::Unimplemented(0x41), 0x41)),
    )]
    fn test_parse_tag(input: Vec<u8>, expected: Tag) {
        let (_, actual) = parse_tag(&input).unwrap();
        assert_eq!(expected, actual);
    }

    #[rstest(input, expected,
        case(vec![0x02], 0x02),
        case(vec![0x7f], 0x7f),
        case(vec![0x81, 0x80], 0x80),
        case(vec![0x82, 0x02, 0x10], 256 * 0x02 + 0x10),
        case(vec![0x83, 0x01, 0x00, 0x00], 256 * 256),
        case(vec![0x82, 0xff, 0xff], 256 * 0xff + 0xff),
    )]
    fn test_parse_length(input: Vec<u8>, expected: usize) {
        let (_, actual) = parse_length(&input).unwrap();
        assert_eq!(expected, actual);
    }

    #[rstest]
    #[case::indefinite(vec![0x80])]
    #[case::truncated(vec![0x82, 0x01])]
    fn test_parse_length_rejects(#[case] input: Vec<u8>) {
        assert!(parse_length(&input).is_err());
    }

    #[rstest(input, tag, data,
        case(vec![0x02, 0x01, 0x01], PrimitiveTag::Integer, vec![0x01]),
        case(vec![0x05, 0x00], PrimitiveTag::Null, vec![]),
        case(vec![0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01], PrimitiveTag::ObjectIdentifier, vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01]),
        case(vec![0x04, 0x04, 0x03, 0x02, 0x06, 0xa0], PrimitiveTag::OctetString, vec![0x03, 0x02, 0x06, 0xa0]),
        case(vec![0x03, 0x04, 0x06, 0x6e, 0x5d, 0xc0], PrimitiveTag::BitString, vec![0x06, 0x6e, 0x5d, 0xc0]),
    )]
    fn test_tlv_parse_primitive(input: Vec<u8>, tag: PrimitiveTag, data: Vec<u8>) {
        let (rest, actual) = Tlv::parse(&input, 0).unwrap();
        assert!(rest.is_empty());
        assert!(matches!(actual.tag(), Tag::Primitive(t, _) if *t == tag));
        assert_eq!(actual.length(), data.len());
        assert_eq!(actual.data(), Some(data.as_slice()));
    }

    #[test]
    fn test_tlv_parse_structured() {
        // SEQUENCE { INTEGER 7, [0] { INTEGER 8 }, [1] 0x09 }
        let input = vec![
            0x30, 0x0b, 0x02, 0x01, 0x07, 0xa0, 0x03, 0x02, 0x01, 0x08, 0x81, 0x01, 0x09,
        ];
        let (rest, tlv) = Tlv::parse(&input, 0).unwrap();
        assert!(rest.is_empty());
        assert_eq!(tlv.length(), input.len() - 2);
        let children = tlv.tlvs().unwrap();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].data(), Some([0x07].as_slice()));
        assert_eq!(
            *children[1].tag(),
            Tag::ContextSpecific { slot: 0, constructed: true }
        );
        assert_eq!(children[1].tlvs().map(|t| t.len()), Some(1));
        assert_eq!(
            *children[2].tag(),
            Tag::ContextSpecific { slot: 1, constructed: false }
        );
        assert_eq!(children[2].data(), Some([0x09].as_slice()));
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::short_content(vec![0x30, 0x05, 0x02, 0x01])]
    #[case::child_overruns(vec![0x30, 0x03, 0x02, 0x05, 0x01])]
    #[case::high_tag_number(vec![0x1f, 0x81, 0x00])]
    fn test_der_decode_rejects(#[case] input: Vec<u8>) {
        let der: Result<Der, Error> = input.decode();
        assert!(der.is_err());
    }

    #[test]
    fn test_der_decode_depth_limit() {
        let mut input = vec![0x05, 0x00];
        for _ in 0..(MAX_DEPTH + 2) {
            let mut wrapped = vec![0x30, input.len() as u8];
            wrapped.extend(input);
            input = wrapped;
        }
        let der: Result<Der, Error> = input.as_slice().decode();
        assert!(der.is_err());
    }

    #[test]
    fn test_der_decode_multiple_top_level() {
        let input: &[u8] = &[0x02, 0x01, 0x01, 0x05, 0x00];
        let der: Der = input.decode().unwrap();
        assert_eq!(der.elements().len(), 2);
    }

    #[test]
    fn test_der_from_pem() {
        let pem: Pem = "-----BEGIN DH PARAMETERS-----\nMAYCAQcCAQI=\n-----END DH PARAMETERS-----\n"
            .parse()
            .unwrap();
        let der: Der = pem.decode().unwrap();
        let seq = der.elements()[0].tlvs().unwrap();
        assert_eq!(seq[0].data(), Some([0x07].as_slice()));
        assert_eq!(seq[1].data(), Some([0x02].as_slice()));
    }
}
