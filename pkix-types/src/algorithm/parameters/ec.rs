//! Elliptic Curve Parameters
//!
//! Defined in [RFC 5480 Section 2.1.1](https://datatracker.ietf.org/doc/html/rfc5480#section-2.1.1)

use asn1::{Element, ObjectIdentifier};
use tsumiki::decoder::{DecodableFrom, Decoder};

use super::{AlgorithmParameter, Error, RawAlgorithmParameter, Result, element_kind};

/// Supported named curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedCurve {
    /// secp192r1 (prime192v1, P-192)
    Secp192r1,
    /// secp224r1 (P-224)
    Secp224r1,
    /// secp256r1 (prime256v1, P-256)
    Secp256r1,
    /// secp384r1 (P-384)
    Secp384r1,
    /// secp521r1 (P-521)
    Secp521r1,
    Secp256k1,
    BrainpoolP256r1,
    BrainpoolP384r1,
    BrainpoolP512r1,
    Sect163k1,
    Sect163r2,
    Sect233k1,
    Sect233r1,
    Sect283k1,
    Sect283r1,
    Sect409k1,
    Sect409r1,
    Sect571k1,
    Sect571r1,
}

impl NamedCurve {
    // Elliptic curve OID constants (RFC 5480 Section 2.1.1.1, RFC 5639)
    pub const OID_SECP192R1: &'static str = "1.2.840.10045.3.1.1";
    pub const OID_SECP224R1: &'static str = "1.3.132.0.33";
    pub const OID_SECP256R1: &'static str = "1.2.840.10045.3.1.7";
    pub const OID_SECP384R1: &'static str = "1.3.132.0.34";
    pub const OID_SECP521R1: &'static str = "1.3.132.0.35";
    pub const OID_SECP256K1: &'static str = "1.3.132.0.10";
    pub const OID_BRAINPOOLP256R1: &'static str = "1.3.36.3.3.2.8.1.1.7";
    pub const OID_BRAINPOOLP384R1: &'static str = "1.3.36.3.3.2.8.1.1.11";
    pub const OID_BRAINPOOLP512R1: &'static str = "1.3.36.3.3.2.8.1.1.13";
    pub const OID_SECT163K1: &'static str = "1.3.132.0.1";
    pub const OID_SECT163R2: &'static str = "1.3.132.0.15";
    pub const OID_SECT233K1: &'static str = "1.3.132.0.26";
    pub const OID_SECT233R1: &'static str = "1.3.132.0.27";
    pub const OID_SECT283K1: &'static str = "1.3.132.0.16";
    pub const OID_SECT283R1: &'static str = "1.3.132.0.17";
    pub const OID_SECT409K1: &'static str = "1.3.132.0.36";
    pub const OID_SECT409R1: &'static str = "1.3.132.0.37";
    pub const OID_SECT571K1: &'static str = "1.3.132.0.38";
    pub const OID_SECT571R1: &'static str = "1.3.132.0.39";

    const ALL: [NamedCurve; 19] = [
        Self::Secp192r1,
        Self::Secp224r1,
        Self::Secp256r1,
        Self::Secp384r1,
        Self::Secp521r1,
        Self::Secp256k1,
        Self::BrainpoolP256r1,
        Self::BrainpoolP384r1,
        Self::BrainpoolP512r1,
        Self::Sect163k1,
        Self::Sect163r2,
        Self::Sect233k1,
        Self::Sect233r1,
        Self::Sect283k1,
        Self::Sect283r1,
        Self::Sect409k1,
        Self::Sect409r1,
        Self::Sect571k1,
        Self::Sect571r1,
    ];

    pub const fn oid_str(&self) -> &'static str {
        match self {
            Self::Secp192r1 => Self::OID_SECP192R1,
            Self::Secp224r1 => Self::OID_SECP224R1,
            Self::Secp256r1 => Self::OID_SECP256R1,
            Self::Secp384r1 => Self::OID_SECP384R1,
            Self::Secp521r1 => Self::OID_SECP521R1,
            Self::Secp256k1 => Self::OID_SECP256K1,
            Self::BrainpoolP256r1 => Self::OID_BRAINPOOLP256R1,
            Self::BrainpoolP384r1 => Self::OID_BRAINPOOLP384R1,
            Self::BrainpoolP512r1 => Self::OID_BRAINPOOLP512R1,
            Self::Sect163k1 => Self::OID_SECT163K1,
            Self::Sect163r2 => Self::OID_SECT163R2,
            Self::Sect233k1 => Self::OID_SECT233K1,
            Self::Sect233r1 => Self::OID_SECT233R1,
            Self::Sect283k1 => Self::OID_SECT283K1,
            Self::Sect283r1 => Self::OID_SECT283R1,
            Self::Sect409k1 => Self::OID_SECT409K1,
            Self::Sect409r1 => Self::OID_SECT409R1,
            Self::Sect571k1 => Self::OID_SECT571K1,
            Self::Sect571r1 => Self::OID_SECT571R1,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Secp192r1 => "secp192r1",
            Self::Secp224r1 => "secp224r1",
            Self::Secp256r1 => "secp256r1",
            Self::Secp384r1 => "secp384r1",
            Self::Secp521r1 => "secp521r1",
            Self::Secp256k1 => "secp256k1",
            Self::BrainpoolP256r1 => "brainpoolP256r1",
            Self::BrainpoolP384r1 => "brainpoolP384r1",
            Self::BrainpoolP512r1 => "brainpoolP512r1",
            Self::Sect163k1 => "sect163k1",
            Self::Sect163r2 => "sect163r2",
            Self::Sect233k1 => "sect233k1",
            Self::Sect233r1 => "sect233r1",
            Self::Sect283k1 => "sect283k1",
            Self::Sect283r1 => "sect283r1",
            Self::Sect409k1 => "sect409k1",
            Self::Sect409r1 => "sect409r1",
            Self::Sect571k1 => "sect571k1",
            Self::Sect571r1 => "sect571r1",
        }
    }

    /// Length in bytes of one field element, i.e. of each coordinate in an
    /// encoded point.
    pub const fn field_size(&self) -> usize {
        match self {
            Self::Secp192r1 => 24,
            Self::Secp224r1 => 28,
            Self::Secp256r1 | Self::Secp256k1 | Self::BrainpoolP256r1 => 32,
            Self::Secp384r1 | Self::BrainpoolP384r1 => 48,
            Self::Secp521r1 => 66,
            Self::BrainpoolP512r1 => 64,
            Self::Sect163k1 | Self::Sect163r2 => 21,
            Self::Sect233k1 | Self::Sect233r1 => 30,
            Self::Sect283k1 | Self::Sect283r1 => 36,
            Self::Sect409k1 | Self::Sect409r1 => 52,
            Self::Sect571k1 | Self::Sect571r1 => 72,
        }
    }
}

impl TryFrom<&ObjectIdentifier> for NamedCurve {
    type Error = Error;

    fn try_from(oid: &ObjectIdentifier) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|curve| *oid == curve.oid_str())
            .ok_or_else(|| Error::UnknownCurve(oid.to_string()))
    }
}

/// ECParameters for Elliptic Curve algorithms
///
/// [RFC 5480 Section 2.1.1](https://datatracker.ietf.org/doc/html/rfc5480#section-2.1.1):
/// ```asn1
/// ECParameters ::= CHOICE {
///     namedCurve    OBJECT IDENTIFIER,
///     -- implicitCurve  NULL,              -- MUST NOT be used in PKIX
///     -- specifiedCurve SpecifiedECDomain  -- MUST NOT be used in PKIX
/// }
/// ```
///
/// This implementation only supports namedCurve as required by PKIX.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcParameters {
    pub named_curve: NamedCurve,
}

impl EcParameters {
    pub fn new(named_curve: NamedCurve) -> Self {
        Self { named_curve }
    }

    pub fn named_curve(&self) -> NamedCurve {
        self.named_curve
    }
}

impl AlgorithmParameter for EcParameters {
    fn parse(raw: &RawAlgorithmParameter) -> Result<Self> {
        raw.element().decode()
    }
}

// `EC PARAMETERS` blocks carry a bare ECParameters, so it decodes from an Element too.
impl DecodableFrom<Element> for EcParameters {}

impl Decoder<Element, EcParameters> for Element {
    type Error = Error;

    fn decode(&self) -> Result<EcParameters> {
        match self {
            Element::ObjectIdentifier(oid) => Ok(EcParameters::new(NamedCurve::try_from(oid)?)),
            Element::Null => Err(Error::NotNamedCurve("implicitCurve")),
            Element::Sequence(_) => Err(Error::NotNamedCurve("specifiedCurve")),
            other => Err(Error::TypeMismatch {
                expected: "OBJECT IDENTIFIER (namedCurve)",
                actual: element_kind(other).to_string(),
            }),
        }
    }
}
