//! Master-password key derivation.
//!
//! Two constructions are available:
//!
//! - **Argon2id** (default): memory-hard, slow on purpose.  The installation
//!   salt is first hashed with SHA-256 so that any non-empty salt, however
//!   short, meets Argon2's minimum salt length.
//! - **Legacy digest**: `SHA-256(hex(SHA-512(password || salt)))`, two fast
//!   digests in sequence.  Kept for stores created with it; it offers no
//!   resistance to offline brute force.
//!
//! Both produce a 32-byte key, the size AES-256-GCM requires.

use std::fmt;

use argon2::{Algorithm, Argon2, Params, Version};
use sha2::{Digest, Sha256, Sha512};
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{KeyStashError, Result};

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Configurable Argon2id parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Which construction turns a password into a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfAlgorithm {
    Argon2id(Argon2Params),
    LegacyDigest,
}

impl Default for KdfAlgorithm {
    fn default() -> Self {
        Self::Argon2id(Argon2Params::default())
    }
}

/// A 32-byte symmetric key, zeroized on drop.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct EncryptionKey {
    bytes: [u8; KEY_LEN],
}

impl EncryptionKey {
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl PartialEq for EncryptionKey {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;
        self.bytes.ct_eq(&other.bytes).into()
    }
}

impl Eq for EncryptionKey {}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derives encryption keys with a fixed algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyDerivation {
    algorithm: KdfAlgorithm,
}

impl KeyDerivation {
    pub fn new(algorithm: KdfAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> KdfAlgorithm {
        self.algorithm
    }

    /// Derive a key from `password` and `salt`.
    ///
    /// Deterministic: the same inputs always yield the same key.  Both
    /// inputs must be non-empty.
    pub fn derive(&self, password: &[u8], salt: &[u8]) -> Result<EncryptionKey> {
        if password.is_empty() {
            return Err(KeyStashError::EmptyInput("password"));
        }
        if salt.is_empty() {
            return Err(KeyStashError::EmptyInput("salt"));
        }

        match self.algorithm {
            KdfAlgorithm::Argon2id(params) => derive_argon2id(password, salt, &params),
            KdfAlgorithm::LegacyDigest => Ok(derive_legacy(password, salt)),
        }
    }
}

fn derive_argon2id(
    password: &[u8],
    salt: &[u8],
    argon2_params: &Argon2Params,
) -> Result<EncryptionKey> {
    validate_params(argon2_params)?;

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| KeyStashError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let salt_digest = Sha256::digest(salt);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(password, &salt_digest, &mut key)
        .map_err(|e| KeyStashError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    let derived = EncryptionKey::new(key);
    key.zeroize();
    Ok(derived)
}

fn derive_legacy(password: &[u8], salt: &[u8]) -> EncryptionKey {
    let mut mixer = Sha512::new();
    mixer.update(password);
    mixer.update(salt);
    let mixed = Zeroizing::new(hex::encode(mixer.finalize()));

    let mut key: [u8; KEY_LEN] = Sha256::digest(mixed.as_bytes()).into();
    let derived = EncryptionKey::new(key);
    key.zeroize();
    derived
}

/// Reject Argon2 parameters below the safe minimums.
pub fn validate_params(argon2_params: &Argon2Params) -> Result<()> {
    if argon2_params.memory_kib < MIN_MEMORY_KIB {
        return Err(KeyStashError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            argon2_params.memory_kib
        )));
    }
    if argon2_params.iterations < 1 {
        return Err(KeyStashError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if argon2_params.parallelism < 1 {
        return Err(KeyStashError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }
    Ok(())
}
