//! PKCS#3: Diffie-Hellman Key-Agreement Standard
//!
//! ```asn1
//! DHParameter ::= SEQUENCE {
//!     prime               INTEGER,  -- p
//!     base                INTEGER,  -- g
//!     privateValueLength  INTEGER OPTIONAL
//! }
//! ```
//!
//! Carried by `DH PARAMETERS` blocks.

use asn1::{Element, Integer};
use thiserror::Error;
use tsumiki::decoder::{DecodableFrom, Decoder};

#[derive(Debug, Error)]
pub enum Error {
    #[error("expected SEQUENCE for DHParameter")]
    ExpectedSequence,

    #[error("expected 2 or 3 elements, got {0}")]
    InvalidElementCount(usize),

    #[error("expected INTEGER for {0}")]
    ExpectedInteger(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DHParameter {
    pub prime: Integer,
    pub base: Integer,
    pub private_value_length: Option<Integer>,
}

impl DecodableFrom<Element> for DHParameter {}

impl Decoder<Element, DHParameter> for Element {
    type Error = Error;

    fn decode(&self) -> Result<DHParameter> {
        let Element::Sequence(elements) = self else {
            return Err(Error::ExpectedSequence);
        };

        let integer = |element: &Element, field: &'static str| match element {
            Element::Integer(int) => Ok(int.clone()),
            _ => Err(Error::ExpectedInteger(field)),
        };

        match elements.as_slice() {
            [prime, base] => Ok(DHParameter {
                prime: integer(prime, "prime")?,
                base: integer(base, "base")?,
                private_value_length: None,
            }),
            [prime, base, length] => Ok(DHParameter {
                prime: integer(prime, "prime")?,
                base: integer(base, "base")?,
                private_value_length: Some(integer(length, "privateValueLength")?),
            }),
            _ => Err(Error::InvalidElementCount(elements.len())),
        }
    }
}
