//! SHA-256 digests used for addressing and password verification.
//!
//! Every digest here is rendered as lowercase hex so it can be used
//! directly as a filename or compared as text.

use sha2::{Digest, Sha256};

use super::kdf::{EncryptionKey, KdfAlgorithm};

/// Domain tag mixed into key-based verifiers so a verifier is never
/// equal to any other digest of the same key.
const VERIFIER_DOMAIN: &[u8] = b"keystash-verifier";

/// Domain tag for the installation salt, keeping it distinct from the
/// account's directory address.
const SALT_DOMAIN: &[u8] = b"keystash-salt:";

/// Length of a content address in hex characters.
pub const ADDRESS_LEN: usize = 64;

/// Compute the content address of an entry name.
pub fn content_address(name: &str) -> String {
    hex::encode(Sha256::digest(name.as_bytes()))
}

/// Returns `true` if `s` has the shape of a content address.
pub fn is_content_address(s: &str) -> bool {
    s.len() == ADDRESS_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Compute the stored password verifier.
///
/// For the legacy digest KDF this is the plain `SHA-256(password || salt)`.
/// For Argon2id it is a digest of the derived key, so checking a guess
/// costs a full key derivation.
pub fn password_verifier(
    algorithm: KdfAlgorithm,
    password: &[u8],
    salt: &[u8],
    key: &EncryptionKey,
) -> String {
    let mut hasher = Sha256::new();
    match algorithm {
        KdfAlgorithm::LegacyDigest => {
            hasher.update(password);
            hasher.update(salt);
        }
        KdfAlgorithm::Argon2id(_) => {
            hasher.update(VERIFIER_DOMAIN);
            hasher.update(key.as_bytes());
        }
    }
    hex::encode(hasher.finalize())
}

/// The per-installation salt, derived from the OS account name.
pub fn account_salt(account: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(SALT_DOMAIN);
    hasher.update(account.as_bytes());
    hex::encode(hasher.finalize())
}
