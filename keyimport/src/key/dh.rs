//! Diffie-Hellman domain parameters (PKCS#3).

use log::debug;
use num_bigint::BigUint;
use pkcs::pkcs3::DHParameter;

use super::positive;
use crate::buffer::DecodedContainer;
use crate::candidate::{DecodeKind, ObjectKind};
use crate::cascade::{Adapter, unexpected};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DhParameters {
    pub p: BigUint,
    pub g: BigUint,
    /// Suggested private value length in bits.
    pub private_value_length: Option<u32>,
}

impl DhParameters {
    pub fn bits(&self) -> u64 {
        self.p.bits()
    }
}

impl TryFrom<&DHParameter> for DhParameters {
    type Error = Error;

    fn try_from(params: &DHParameter) -> Result<Self> {
        let p = positive(&params.prime, "prime")?;
        let g = positive(&params.base, "base")?;
        if g >= p {
            debug!("rejecting DH generator not below p");
            return Err(Error::malformed("DH generator is not below p"));
        }
        let private_value_length = params
            .private_value_length
            .as_ref()
            .map(|len| {
                len.to_u32()
                    .ok_or_else(|| Error::malformed("privateValueLength out of range"))
            })
            .transpose()?;
        Ok(Self {
            p,
            g,
            private_value_length,
        })
    }
}

pub(crate) struct ParametersAdapter;

impl Adapter for ParametersAdapter {
    type Output = DhParameters;

    const KIND: ObjectKind = ObjectKind::DhParameters;

    fn adapt(&self, kind: DecodeKind, container: &DecodedContainer) -> Result<DhParameters> {
        match kind {
            DecodeKind::RawAsn1Sequence => {
                let params: DHParameter = container.parse()?;
                DhParameters::try_from(&params)
            }
            other => Err(unexpected(Self::KIND, other)),
        }
    }
}
