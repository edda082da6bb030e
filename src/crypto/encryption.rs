//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce from the
//! OS RNG and prepends it to the ciphertext.  `decrypt` splits the nonce
//! back out before decrypting.  No associated data is used.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use super::kdf::EncryptionKey;
use crate::errors::{KeyStashError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// An AEAD cipher that holds at most one key.
///
/// Encrypting or decrypting before `set_key` fails with `NoKey`.
#[derive(Default)]
pub struct AeadCipher {
    key: Option<EncryptionKey>,
}

impl AeadCipher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cipher that already holds `key`.
    pub fn with_key(key: EncryptionKey) -> Self {
        Self { key: Some(key) }
    }

    /// Replace the current key.  The previous key is zeroized on drop.
    pub fn set_key(&mut self, key: EncryptionKey) {
        self.key = Some(key);
    }

    pub fn clear_key(&mut self) {
        self.key = None;
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    fn cipher(&self) -> Result<Aes256Gcm> {
        let key = self.key.as_ref().ok_or(KeyStashError::NoKey)?;
        Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| KeyStashError::EncryptionFailed(format!("invalid key length: {e}")))
    }

    /// Encrypt `plaintext`, returning `nonce || ciphertext`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher = self.cipher()?;

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let ciphertext = cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| KeyStashError::EncryptionFailed(format!("encryption error: {e}")))?;

        let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        output.extend_from_slice(&nonce);
        output.extend_from_slice(&ciphertext);
        Ok(output)
    }

    /// Decrypt data that was produced by `encrypt`.
    ///
    /// Truncated input and a bad authentication tag both yield the same
    /// `DecryptionFailed` error.
    pub fn decrypt(&self, ciphertext_with_nonce: &[u8]) -> Result<Vec<u8>> {
        let cipher = self.cipher()?;

        if ciphertext_with_nonce.len() < NONCE_LEN {
            return Err(KeyStashError::DecryptionFailed);
        }

        let (nonce_bytes, ciphertext) = ciphertext_with_nonce.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| KeyStashError::DecryptionFailed)
    }
}
