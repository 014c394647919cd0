//! Two-phase payload acquisition.
//!
//! The size probe reports the exact payload length, storage for exactly that
//! many bytes is reserved, then the block is decoded into it. The storage is
//! a `Zeroizing` vector, so it is wiped whenever the container goes out of
//! scope.

use asn1::{ASN1Object, Element};
use der::Der;
use pem::{Header, Pem};
use tsumiki::decoder::{DecodableFrom, Decoder};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Decoded payload of one committed block.
#[derive(Debug)]
pub(crate) struct DecodedContainer {
    buf: Zeroizing<Vec<u8>>,
    len: usize,
    header: Header,
    consumed: usize,
    decrypted: bool,
}

impl DecodedContainer {
    /// Reserve `len` bytes, as reported by [`Pem::decoded_len`], and decode
    /// `pem` into them.
    pub(crate) fn acquire(pem: &Pem, len: usize, consumed: usize) -> Result<Self> {
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(len)
            .map_err(|_| Error::OutOfMemory(len))?;
        storage.resize(len, 0);
        let mut buf = Zeroizing::new(storage);

        let written = pem.decode_into(&mut buf)?;
        if written != len {
            return Err(Error::malformed(format!(
                "payload decoded to {written} bytes, expected {len}"
            )));
        }

        Ok(Self {
            buf,
            len,
            header: pem.header().clone(),
            consumed,
            decrypted: false,
        })
    }

    /// Container whose payload came out of a structure-embedded decryption.
    pub(crate) fn from_plaintext(buf: Zeroizing<Vec<u8>>, consumed: usize) -> Self {
        let len = buf.len();
        Self {
            buf,
            len,
            header: Header::default(),
            consumed,
            decrypted: true,
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.buf[..self.len]
    }

    pub(crate) fn header(&self) -> &Header {
        &self.header
    }

    /// Bytes of the input up to and including the end boundary.
    pub(crate) fn consumed(&self) -> usize {
        self.consumed
    }

    /// Shorten the logical payload after in-place decryption.
    pub(crate) fn set_decrypted_len(&mut self, len: usize) {
        self.len = len.min(self.len);
        self.decrypted = true;
    }

    /// The single top-level DER element of the payload.
    ///
    /// Plaintext that does not even frame as DER is reported as a decryption
    /// failure: padding occasionally checks out under a wrong password.
    pub(crate) fn element(&self) -> Result<Element> {
        parse_element(self.as_bytes()).map_err(|e| match e {
            Error::MalformedStructure(msg) if self.decrypted => {
                Error::decryption(format!("plaintext is not DER: {msg}"))
            }
            other => other,
        })
    }

    /// Parse the payload as `T`.
    pub(crate) fn parse<T>(&self) -> Result<T>
    where
        T: DecodableFrom<Element>,
        Element: Decoder<Element, T>,
        Error: From<<Element as Decoder<Element, T>>::Error>,
    {
        let element = self.element()?;
        Decoder::<Element, T>::decode(&element).map_err(Error::from)
    }
}

/// Parse `bytes` as exactly one DER element.
pub(crate) fn parse_element(bytes: &[u8]) -> Result<Element> {
    let der: Der = bytes.decode()?;
    let obj: ASN1Object = der.decode()?;
    match obj.elements() {
        [element] => Ok(element.clone()),
        elements => Err(Error::malformed(format!(
            "expected one top-level element, got {}",
            elements.len()
        ))),
    }
}
