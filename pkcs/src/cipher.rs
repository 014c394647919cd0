//! AES-CBC decryption shared by the PBES2 and RFC 1423 schemes.
//!
//! Both schemes pad the plaintext with PKCS#7 before encryption, so
//! [`AesCbc::decrypt_in_place`] strips the padding and returns the
//! plaintext length.

use aes::cipher::consts::U16;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockSizeUser, KeyInit};
use aes::{Aes128Dec, Aes192Dec, Aes256Dec};
use thiserror::Error;

pub const BLOCK_SIZE: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid key length: {0}")]
    InvalidKeyLength(usize),

    #[error("invalid IV length: {0}, expected {BLOCK_SIZE}")]
    InvalidIvLength(usize),

    #[error("ciphertext length {0} is not a positive multiple of {BLOCK_SIZE}")]
    InvalidDataLength(usize),

    #[error("bad padding")]
    BadPadding,
}

pub type Result<T> = std::result::Result<T, Error>;

/// AES in CBC mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AesCbc {
    Aes128,
    Aes192,
    Aes256,
}

impl AesCbc {
    pub const fn key_len(&self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    pub const fn iv_len(&self) -> usize {
        BLOCK_SIZE
    }

    /// Decrypt `buf` in place and remove the PKCS#7 padding.
    ///
    /// Returns the plaintext length, which is the prefix of `buf` holding the
    /// plaintext. The bytes past that length are padding.
    pub fn decrypt_in_place(&self, key: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<usize> {
        if key.len() != self.key_len() {
            return Err(Error::InvalidKeyLength(key.len()));
        }
        let iv: [u8; BLOCK_SIZE] = iv
            .try_into()
            .map_err(|_| Error::InvalidIvLength(iv.len()))?;
        if buf.is_empty() || buf.len() % BLOCK_SIZE != 0 {
            return Err(Error::InvalidDataLength(buf.len()));
        }

        let invalid_key = |_| Error::InvalidKeyLength(key.len());
        match self {
            Self::Aes128 => cbc_decrypt(&Aes128Dec::new_from_slice(key).map_err(invalid_key)?, iv, buf),
            Self::Aes192 => cbc_decrypt(&Aes192Dec::new_from_slice(key).map_err(invalid_key)?, iv, buf),
            Self::Aes256 => cbc_decrypt(&Aes256Dec::new_from_slice(key).map_err(invalid_key)?, iv, buf),
        }

        unpad(buf)
    }
}

fn cbc_decrypt<C>(cipher: &C, iv: [u8; BLOCK_SIZE], buf: &mut [u8])
where
    C: BlockDecrypt + BlockSizeUser<BlockSize = U16>,
{
    let mut chain = iv;
    for block in buf.chunks_exact_mut(BLOCK_SIZE) {
        let mut ciphertext = [0u8; BLOCK_SIZE];
        ciphertext.copy_from_slice(block);
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
        block
            .iter_mut()
            .zip(chain.iter())
            .for_each(|(b, c)| *b ^= c);
        chain = ciphertext;
    }
}

fn unpad(buf: &[u8]) -> Result<usize> {
    let pad = match buf.last() {
        Some(&n) if (1..=BLOCK_SIZE).contains(&(n as usize)) => n as usize,
        _ => return Err(Error::BadPadding),
    };
    let len = buf.len() - pad;
    if buf[len..].iter().any(|&b| b as usize != pad) {
        return Err(Error::BadPadding);
    }
    Ok(len)
}
