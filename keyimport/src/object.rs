//! Certificates, CRLs and certificate requests.
//!
//! These are handed back as DER without interpretation. The payload only has
//! to frame as one DER SEQUENCE.

use asn1::Element;

use crate::buffer::DecodedContainer;
use crate::candidate::{DecodeKind, ObjectKind};
use crate::cascade::{Adapter, unexpected};
use crate::error::{Error, Result};

/// DER bytes of one object and the input bytes it took up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerObject {
    pub der: Vec<u8>,
    /// Offset just past the end boundary of the block. Re-slice the input
    /// here to read the next object.
    pub consumed: usize,
}

fn der_object(object: ObjectKind, kind: DecodeKind, container: &DecodedContainer) -> Result<DerObject> {
    if kind != DecodeKind::RawLegacyStructure {
        return Err(unexpected(object, kind));
    }
    let Element::Sequence(_) = container.element()? else {
        return Err(Error::malformed(format!("{object} is not a SEQUENCE")));
    };
    Ok(DerObject {
        der: container.as_bytes().to_vec(),
        consumed: container.consumed(),
    })
}

pub(crate) struct CertificateAdapter;

impl Adapter for CertificateAdapter {
    type Output = DerObject;

    const KIND: ObjectKind = ObjectKind::Certificate;

    fn adapt(&self, kind: DecodeKind, container: &DecodedContainer) -> Result<DerObject> {
        der_object(Self::KIND, kind, container)
    }
}

pub(crate) struct CrlAdapter;

impl Adapter for CrlAdapter {
    type Output = DerObject;

    const KIND: ObjectKind = ObjectKind::Crl;

    fn adapt(&self, kind: DecodeKind, container: &DecodedContainer) -> Result<DerObject> {
        der_object(Self::KIND, kind, container)
    }
}

pub(crate) struct CsrAdapter;

impl Adapter for CsrAdapter {
    type Output = DerObject;

    const KIND: ObjectKind = ObjectKind::Csr;

    fn adapt(&self, kind: DecodeKind, container: &DecodedContainer) -> Result<DerObject> {
        der_object(Self::KIND, kind, container)
    }
}
