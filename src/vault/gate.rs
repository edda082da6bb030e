//! Master-password gate.
//!
//! Persists a one-way verifier of the master password in the reserved
//! `.verifier` file and checks later attempts against it.  The password
//! itself is never written anywhere.
//!
//! `verify` returns a plain `bool`: a missing or unreadable verifier is
//! indistinguishable from a wrong password to the caller.

use std::fs;
use std::path::{Path, PathBuf};

use subtle::ConstantTimeEq;
use tracing::debug;

use super::format::{atomic_write, clear_entries, VERIFIER_FILE};
use crate::crypto::digest::password_verifier;
use crate::crypto::{EncryptionKey, KeyDerivation};
use crate::errors::{KeyStashError, Result};

pub struct MasterPasswordGate {
    dir: PathBuf,
    path: PathBuf,
    kdf: KeyDerivation,
}

impl MasterPasswordGate {
    pub fn new(store_dir: &Path, kdf: KeyDerivation) -> Self {
        Self {
            dir: store_dir.to_path_buf(),
            path: store_dir.join(VERIFIER_FILE),
            kdf,
        }
    }

    /// `true` iff the verifier file exists and is a regular file.
    pub fn is_initialized(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|m| m.is_file())
    }

    /// Write the verifier for `password`, replacing any previous one.
    ///
    /// Callers are expected to confirm the password first; see
    /// `initialize_confirmed`.
    pub fn initialize(&self, password: &[u8], salt: &[u8]) -> Result<EncryptionKey> {
        let key = self.kdf.derive(password, salt)?;
        let verifier = password_verifier(self.kdf.algorithm(), password, salt, &key);
        atomic_write(&self.path, verifier.as_bytes())?;
        debug!(path = %self.path.display(), "verifier written");
        Ok(key)
    }

    /// Check that `password` and `confirmation` match before writing
    /// anything.  A mismatch leaves any existing verifier untouched.
    pub fn initialize_confirmed(
        &self,
        password: &[u8],
        confirmation: &[u8],
        salt: &[u8],
    ) -> Result<EncryptionKey> {
        if !bool::from(password.ct_eq(confirmation)) {
            return Err(KeyStashError::PasswordMismatch);
        }
        self.initialize(password, salt)
    }

    /// Replace the master password and discard everything sealed under
    /// the old one.
    ///
    /// Entries and the registry cannot be read with the new key, so they
    /// are removed before the new verifier is written.  A mismatched
    /// confirmation touches nothing.  Returns the new key and the number
    /// of entries removed.
    pub fn reset_confirmed(
        &self,
        password: &[u8],
        confirmation: &[u8],
        salt: &[u8],
    ) -> Result<(EncryptionKey, usize)> {
        if !bool::from(password.ct_eq(confirmation)) {
            return Err(KeyStashError::PasswordMismatch);
        }
        // Derive first so a KDF failure leaves the store intact.
        let key = self.kdf.derive(password, salt)?;
        let removed = clear_entries(&self.dir)?;
        let verifier = password_verifier(self.kdf.algorithm(), password, salt, &key);
        atomic_write(&self.path, verifier.as_bytes())?;
        debug!(path = %self.path.display(), removed, "store reset");
        Ok((key, removed))
    }

    /// `true` if `password` matches the stored verifier.  Never errors.
    pub fn verify(&self, password: &[u8], salt: &[u8]) -> bool {
        self.check(password, salt).is_some()
    }

    /// Verify `password` and hand back the derived key so it is only
    /// derived once per invocation.
    pub fn unlock(&self, password: &[u8], salt: &[u8]) -> Result<EncryptionKey> {
        self.check(password, salt).ok_or(KeyStashError::WrongPassword)
    }

    fn check(&self, password: &[u8], salt: &[u8]) -> Option<EncryptionKey> {
        let stored = match fs::read(&self.path) {
            Ok(stored) => stored,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "verifier unavailable");
                return None;
            }
        };

        let key = self.kdf.derive(password, salt).ok()?;
        let expected = password_verifier(self.kdf.algorithm(), password, salt, &key);

        if bool::from(expected.as_bytes().ct_eq(&stored)) {
            Some(key)
        } else {
            None
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
