//! Algorithm importers.
//!
//! Each submodule owns the records of one algorithm family, the checks that
//! turn a parsed structure into a record, and the cascade adapters for its
//! object kinds.

use asn1::Integer;
use log::debug;
use num_bigint::BigUint;
use num_traits::Zero;
use pkix_types::AlgorithmIdentifier;

use crate::error::{Error, Result};

pub mod dh;
pub mod dsa;
pub mod ec;
pub mod eddsa;
pub mod rsa;

pub use dh::DhParameters;
pub use dsa::{DsaDomainParameters, DsaPrivateKey, DsaPublicKey};
pub use ec::{EcDomainParameters, EcPrivateKey, EcPublicKey};
pub use eddsa::{EddsaCurve, EddsaPrivateKey, EddsaPublicKey};
pub use rsa::{RsaPrivateKey, RsaPublicKey};

/// Magnitude of a non-negative INTEGER.
pub(crate) fn unsigned(int: &Integer, field: &'static str) -> Result<BigUint> {
    int.to_biguint().ok_or_else(|| {
        debug!("rejecting negative {field}");
        Error::malformed(format!("{field} is negative"))
    })
}

/// Magnitude of a strictly positive INTEGER.
pub(crate) fn positive(int: &Integer, field: &'static str) -> Result<BigUint> {
    let value = unsigned(int, field)?;
    if value.is_zero() {
        debug!("rejecting zero {field}");
        return Err(Error::malformed(format!("{field} is zero")));
    }
    Ok(value)
}

/// Fail with `WrongIdentifier` unless the algorithm is one of `accepted`.
pub(crate) fn require_algorithm(algorithm: &AlgorithmIdentifier, accepted: &[&str]) -> Result<()> {
    if accepted.iter().any(|oid| algorithm.is(oid)) {
        Ok(())
    } else {
        debug!("unexpected key algorithm {}", algorithm.algorithm());
        Err(Error::WrongIdentifier(format!(
            "unexpected key algorithm {}",
            algorithm.algorithm()
        )))
    }
}

/// Content of a BIT STRING that must have no unused bits.
pub(crate) fn octets<'a>(bits: &'a asn1::BitString, field: &'static str) -> Result<&'a [u8]> {
    if bits.unused_bits() != 0 {
        return Err(Error::malformed(format!(
            "{field} has {} unused bits",
            bits.unused_bits()
        )));
    }
    Ok(bits.as_bytes())
}
