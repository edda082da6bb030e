//! Cryptographic primitives for KeyStash.
//!
//! This module provides:
//! - Master-password key derivation, Argon2id or legacy digest (`kdf`)
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - SHA-256 content addresses and password verifiers (`digest`)

pub mod digest;
pub mod encryption;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{AeadCipher, KeyDerivation, ...};
pub use digest::{account_salt, content_address, password_verifier};
pub use encryption::{AeadCipher, NONCE_LEN};
pub use kdf::{Argon2Params, EncryptionKey, KdfAlgorithm, KeyDerivation, KEY_LEN};
