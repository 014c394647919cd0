//! RFC 1423 style PEM encryption
//!
//! Legacy `RSA PRIVATE KEY`, `DSA PRIVATE KEY` and `EC PRIVATE KEY` blocks
//! written by OpenSSL may be encrypted in place:
//!
//! ```text
//! Proc-Type: 4,ENCRYPTED
//! DEK-Info: AES-128-CBC,7A47CE6162BD53D7F572583069F9B808
//! ```
//!
//! The key is derived with OpenSSL's `EVP_BytesToKey` (MD5, one iteration,
//! salt = first 8 bytes of the IV).

use md5::{Digest, Md5};
use pem::DekInfo;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::cipher::{self, AesCbc};

const SALT_LEN: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("unsupported DEK-Info cipher: {0}")]
    UnsupportedCipher(String),

    #[error("DEK-Info IV must be {expected} bytes, got {actual}")]
    InvalidIv { expected: usize, actual: usize },

    #[error("cipher error: {0}")]
    Cipher(#[from] cipher::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Map a `DEK-Info` cipher name onto a supported cipher.
pub fn cipher_from_name(name: &str) -> Result<AesCbc> {
    match name {
        "AES-128-CBC" => Ok(AesCbc::Aes128),
        "AES-192-CBC" => Ok(AesCbc::Aes192),
        "AES-256-CBC" => Ok(AesCbc::Aes256),
        other => Err(Error::UnsupportedCipher(other.to_string())),
    }
}

/// `EVP_BytesToKey` with MD5 and a single iteration.
///
/// `D_1 = MD5(password || salt)`, `D_i = MD5(D_{i-1} || password || salt)`,
/// concatenated until `key_len` bytes are available.
pub fn bytes_to_key(password: &[u8], salt: &[u8], key_len: usize) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(Vec::with_capacity(key_len + 16));
    let mut prev: Option<Zeroizing<Vec<u8>>> = None;
    while key.len() < key_len {
        let mut hasher = Md5::new();
        if let Some(prev) = &prev {
            hasher.update(prev.as_slice());
        }
        hasher.update(password);
        hasher.update(salt);
        let digest = Zeroizing::new(hasher.finalize().to_vec());
        key.extend_from_slice(&digest);
        prev = Some(digest);
    }
    key.truncate(key_len);
    key
}

/// Decrypt an encrypted PEM payload in place.
///
/// Returns the plaintext length.
pub fn decrypt_in_place(dek_info: &DekInfo, password: &[u8], buf: &mut [u8]) -> Result<usize> {
    let cipher = cipher_from_name(dek_info.algorithm())?;
    let iv = dek_info.parameters();
    if iv.len() != cipher.iv_len() {
        return Err(Error::InvalidIv {
            expected: cipher.iv_len(),
            actual: iv.len(),
        });
    }

    let key = bytes_to_key(password, &iv[..SALT_LEN], cipher.key_len());
    Ok(cipher.decrypt_in_place(&key, iv, buf)?)
}
