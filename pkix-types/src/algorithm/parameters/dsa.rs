//! DSA Parameters
//!
//! Defined in [RFC 3279 Section 2.3.2](https://datatracker.ietf.org/doc/html/rfc3279#section-2.3.2)

use asn1::{Element, Integer};

use super::{AlgorithmParameter, Error, RawAlgorithmParameter, Result, element_kind};

/// DSA Parameters
///
/// [RFC 3279 Section 2.3.2](https://datatracker.ietf.org/doc/html/rfc3279#section-2.3.2):
/// ```asn1
/// Dss-Parms ::= SEQUENCE {
///     p   INTEGER,
///     q   INTEGER,
///     g   INTEGER
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaParameters {
    /// Prime modulus p
    pub p: Integer,
    /// Prime divisor q (q divides p-1)
    pub q: Integer,
    /// Generator g
    pub g: Integer,
}

impl AlgorithmParameter for DsaParameters {
    fn parse(raw: &RawAlgorithmParameter) -> Result<Self> {
        let Element::Sequence(elements) = raw.element() else {
            return Err(Error::TypeMismatch {
                expected: "SEQUENCE (Dss-Parms)",
                actual: element_kind(raw.element()).to_string(),
            });
        };
        let [p, q, g] = elements.as_slice() else {
            return Err(Error::InvalidElementCount {
                expected: 3,
                actual: elements.len(),
            });
        };
        Ok(Self {
            p: integer(p, "INTEGER (p)")?,
            q: integer(q, "INTEGER (q)")?,
            g: integer(g, "INTEGER (g)")?,
        })
    }
}

fn integer(element: &Element, expected: &'static str) -> Result<Integer> {
    match element {
        Element::Integer(i) => Ok(i.clone()),
        other => Err(Error::TypeMismatch {
            expected,
            actual: element_kind(other).to_string(),
        }),
    }
}
