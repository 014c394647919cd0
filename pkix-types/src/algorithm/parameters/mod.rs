//! Algorithm Parameters
//!
//! Typed views over the `parameters` field of an AlgorithmIdentifier:
//! - [RFC 3279](https://datatracker.ietf.org/doc/html/rfc3279) - DSA
//! - [RFC 5480](https://datatracker.ietf.org/doc/html/rfc5480) - Elliptic Curve Cryptography

use asn1::Element;

pub mod dsa;
pub mod ec;
pub mod error;

pub use dsa::DsaParameters;
pub use ec::{EcParameters, NamedCurve};
pub use error::{Error, Result};

/// Parse a typed parameter from the raw element.
pub trait AlgorithmParameter: Sized {
    fn parse(raw: &RawAlgorithmParameter) -> Result<Self>;
}

/// Raw algorithm parameter wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAlgorithmParameter {
    element: Element,
}

impl RawAlgorithmParameter {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl From<Element> for RawAlgorithmParameter {
    fn from(element: Element) -> Self {
        Self::new(element)
    }
}

pub(crate) fn element_kind(element: &Element) -> &'static str {
    match element {
        Element::Boolean(_) => "BOOLEAN",
        Element::Integer(_) => "INTEGER",
        Element::BitString(_) => "BIT STRING",
        Element::OctetString(_) => "OCTET STRING",
        Element::Null => "NULL",
        Element::ObjectIdentifier(_) => "OBJECT IDENTIFIER",
        Element::Sequence(_) => "SEQUENCE",
        Element::Set(_) => "SET",
        Element::ContextSpecific { .. } => "context-specific",
        Element::Unimplemented(_) => "unsupported tag",
    }
}
