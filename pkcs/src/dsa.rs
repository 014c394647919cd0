//! OpenSSL legacy DSA private key
//!
//! `DSA PRIVATE KEY` blocks have no RFC behind them. OpenSSL writes the
//! domain parameters, the public value and the private value in one
//! sequence:
//!
//! ```asn1
//! DSAPrivateKey ::= SEQUENCE {
//!     version  INTEGER,  -- 0
//!     p        INTEGER,
//!     q        INTEGER,
//!     g        INTEGER,
//!     y        INTEGER,  -- public value
//!     x        INTEGER   -- private value
//! }
//! ```

use asn1::{Element, Integer};
use thiserror::Error;
use tsumiki::decoder::{DecodableFrom, Decoder};

#[derive(Debug, Error)]
pub enum Error {
    #[error("expected SEQUENCE for DSAPrivateKey")]
    ExpectedSequence,

    #[error("expected 6 elements, got {0}")]
    InvalidElementCount(usize),

    #[error("expected INTEGER for {0}")]
    ExpectedInteger(&'static str),

    #[error("invalid version: {0}, expected 0")]
    InvalidVersion(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DSAPrivateKey {
    pub p: Integer,
    pub q: Integer,
    pub g: Integer,
    pub y: Integer,
    pub x: Integer,
}

impl DecodableFrom<Element> for DSAPrivateKey {}

impl Decoder<Element, DSAPrivateKey> for Element {
    type Error = Error;

    fn decode(&self) -> Result<DSAPrivateKey> {
        let Element::Sequence(elements) = self else {
            return Err(Error::ExpectedSequence);
        };
        let [version, p, q, g, y, x] = elements.as_slice() else {
            return Err(Error::InvalidElementCount(elements.len()));
        };

        let integer = |element: &Element, field: &'static str| match element {
            Element::Integer(int) => Ok(int.clone()),
            _ => Err(Error::ExpectedInteger(field)),
        };

        let version = integer(version, "version")?;
        if !version.is_zero() {
            return Err(Error::InvalidVersion(version.to_string()));
        }

        Ok(DSAPrivateKey {
            p: integer(p, "p")?,
            q: integer(q, "q")?,
            g: integer(g, "g")?,
            y: integer(y, "y")?,
            x: integer(x, "x")?,
        })
    }
}
