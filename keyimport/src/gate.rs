//! Decryption gate.
//!
//! Legacy labels and `PRIVATE KEY` carry their cipher and IV in the
//! `Proc-Type`/`DEK-Info` headers and are decrypted before any structural
//! parsing. `ENCRYPTED PRIVATE KEY` embeds its parameters in the
//! EncryptedPrivateKeyInfo, so that structure is parsed first and its
//! encryptedData is decrypted afterwards. Every other kind passes through.

use log::debug;
use pem::DekInfo;
use pkcs::pkcs5::Pbes2Params;
use pkcs::pkcs8::EncryptedPrivateKeyInfo;
use zeroize::Zeroizing;

use crate::buffer::DecodedContainer;
use crate::candidate::DecodeKind;
use crate::error::{Error, Result};

/// In-place decryption of a payload. Returns the plaintext length.
pub trait Decryptor {
    fn decrypt(&self, password: &[u8], buf: &mut [u8]) -> Result<usize>;
}

/// RFC 1423 style encryption described by a `DEK-Info` header.
#[derive(Debug, Clone)]
pub struct HeaderDecryptor {
    dek_info: DekInfo,
}

impl HeaderDecryptor {
    pub fn new(dek_info: DekInfo) -> Self {
        Self { dek_info }
    }
}

impl Decryptor for HeaderDecryptor {
    fn decrypt(&self, password: &[u8], buf: &mut [u8]) -> Result<usize> {
        Ok(pkcs::rfc1423::decrypt_in_place(&self.dek_info, password, buf)?)
    }
}

/// PBES2 parameters taken from an EncryptedPrivateKeyInfo.
#[derive(Debug, Clone)]
pub struct Pbes2Decryptor {
    params: Pbes2Params,
}

impl Pbes2Decryptor {
    pub fn new(params: Pbes2Params) -> Self {
        Self { params }
    }
}

impl TryFrom<&EncryptedPrivateKeyInfo> for Pbes2Decryptor {
    type Error = Error;

    fn try_from(info: &EncryptedPrivateKeyInfo) -> Result<Self> {
        Ok(Self::new(info.pbes2_params()?))
    }
}

impl Decryptor for Pbes2Decryptor {
    fn decrypt(&self, password: &[u8], buf: &mut [u8]) -> Result<usize> {
        Ok(self.params.decrypt_in_place(password, buf)?)
    }
}

/// An empty password is a real password and goes to the cipher.
fn require_password(password: Option<&[u8]>) -> Result<&[u8]> {
    password.ok_or_else(|| Error::decryption("payload is encrypted but no password was given"))
}

/// Reads the encryption headers of a block flagged as encrypted.
#[cfg(feature = "encrypted-keys")]
fn header_dek_info(header: &pem::Header) -> Result<DekInfo> {
    let unreadable = |e: pem::error::Error| Error::decryption(format!("encryption header: {e}"));
    header.proc_type().map_err(unreadable)?;
    header
        .dek_info()
        .map_err(unreadable)?
        .ok_or_else(|| Error::decryption("Proc-Type is ENCRYPTED but DEK-Info is missing"))
}

/// Run the decryption the committed candidate calls for.
pub(crate) fn open(
    kind: DecodeKind,
    container: DecodedContainer,
    password: Option<&[u8]>,
) -> Result<DecodedContainer> {
    match kind {
        DecodeKind::RawLegacyStructure | DecodeKind::Pkcs8PrivateKeyInfo => {
            if container.header().is_encrypted() {
                open_with_header(container, password)
            } else {
                Ok(container)
            }
        }
        DecodeKind::Pkcs8EncryptedPrivateKeyInfo => open_embedded(container, password),
        DecodeKind::SubjectPublicKeyInfo | DecodeKind::RawAsn1Sequence => Ok(container),
    }
}

#[cfg(feature = "encrypted-keys")]
fn open_with_header(
    mut container: DecodedContainer,
    password: Option<&[u8]>,
) -> Result<DecodedContainer> {
    let dek_info = header_dek_info(container.header())?;
    let password = require_password(password)?;

    debug!("decrypting payload with DEK-Info cipher {}", dek_info.algorithm());
    let decryptor = HeaderDecryptor::new(dek_info);
    let len = decryptor.decrypt(password, container.as_mut_bytes())?;
    container.set_decrypted_len(len);
    Ok(container)
}

#[cfg(feature = "encrypted-keys")]
fn open_embedded(container: DecodedContainer, password: Option<&[u8]>) -> Result<DecodedContainer> {
    let info: EncryptedPrivateKeyInfo = container.parse()?;
    let decryptor = Pbes2Decryptor::try_from(&info)?;
    let password = require_password(password)?;

    debug!(
        "decrypting EncryptedPrivateKeyInfo with PBES2 ({} iterations)",
        decryptor.params.kdf.iteration_count
    );
    let mut buf = Zeroizing::new(info.encrypted_data.into_bytes());
    let len = decryptor.decrypt(password, &mut buf)?;
    buf.truncate(len);
    Ok(DecodedContainer::from_plaintext(buf, container.consumed()))
}

#[cfg(not(feature = "encrypted-keys"))]
fn open_with_header(_: DecodedContainer, _: Option<&[u8]>) -> Result<DecodedContainer> {
    debug!("encrypted payload found but encrypted-keys is disabled");
    Err(Error::decryption("encrypted keys are not supported in this build"))
}

#[cfg(not(feature = "encrypted-keys"))]
fn open_embedded(_: DecodedContainer, _: Option<&[u8]>) -> Result<DecodedContainer> {
    debug!("encrypted payload found but encrypted-keys is disabled");
    Err(Error::decryption("encrypted keys are not supported in this build"))
}
