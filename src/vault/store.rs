//! High-level entry operations used by CLI commands.
//!
//! `EntryStore` maps an entry name to one encrypted file named by the
//! name's content address, and keeps the registry of names current.
//! Add and edit share one write path: the ciphertext replaces whatever
//! was at the address.
//!
//! Writing an entry and updating the registry are two separate atomic
//! file replaces.  If the registry update fails, the entry write has
//! already landed; the error is still returned to the caller.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::format::{atomic_write, Address};
use super::payload::Payload;
use super::registry::{Registry, RegistryRecord};
use crate::crypto::{AeadCipher, EncryptionKey};
use crate::errors::{KeyStashError, Result};

/// Longest accepted entry name, in bytes.
const MAX_NAME_LEN: usize = 1024;

/// The main store handle.  Build one with `EntryStore::new` and a keyed
/// cipher (or call `set_key` before the first operation).
pub struct EntryStore {
    /// Directory holding entry files, the registry, and the verifier.
    dir: PathBuf,

    /// Cipher used for entries and the registry alike.
    cipher: AeadCipher,

    registry: Registry,
}

impl EntryStore {
    pub fn new(dir: &Path, cipher: AeadCipher) -> Self {
        Self {
            dir: dir.to_path_buf(),
            cipher,
            registry: Registry::new(dir),
        }
    }

    /// Open a store directory with an already-derived key.
    pub fn with_key(dir: &Path, key: EncryptionKey) -> Self {
        Self::new(dir, AeadCipher::with_key(key))
    }

    pub fn set_key(&mut self, key: EncryptionKey) {
        self.cipher.set_key(key);
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Decrypt and return the bytes stored under `name`.
    pub fn get(&self, name: &str) -> Result<Vec<u8>> {
        validate_name(name)?;
        let address = Address::of(name);

        let blob = match fs::read(address.path_in(&self.dir)) {
            Ok(blob) => blob,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(KeyStashError::EntryNotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        debug!(%address, len = blob.len(), "read entry");
        self.cipher.decrypt(&blob)
    }

    /// Encrypt `payload` and store it under `name`, replacing any
    /// existing entry, then record the name in the registry.
    pub fn add(&self, name: &str, payload: &[u8]) -> Result<()> {
        validate_name(name)?;
        let address = Address::of(name);

        let blob = self.cipher.encrypt(payload)?;
        atomic_write(&address.path_in(&self.dir), &blob)?;
        debug!(%address, len = blob.len(), "wrote entry");

        if let Err(e) = self.registry.append(&self.cipher, name) {
            warn!(%address, error = %e, "entry written but registry update failed");
            return Err(e);
        }
        Ok(())
    }

    /// Same write path as `add`.
    pub fn edit(&self, name: &str, payload: &[u8]) -> Result<()> {
        self.add(name, payload)
    }

    /// Remove the entry file and its registry record.
    pub fn delete(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        let address = Address::of(name);

        match fs::remove_file(address.path_in(&self.dir)) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(KeyStashError::EntryNotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        }
        debug!(%address, "deleted entry");

        if let Err(e) = self.registry.remove(&self.cipher, name) {
            warn!(%address, error = %e, "entry deleted but registry update failed");
            return Err(e);
        }
        Ok(())
    }

    /// Returns `true` if an entry file exists for `name`.
    ///
    /// No decryption is performed.
    pub fn contains(&self, name: &str) -> bool {
        validate_name(name).is_ok() && Address::of(name).path_in(&self.dir).is_file()
    }

    /// Known entry records, in the order they were added.
    pub fn list(&self) -> Result<Vec<RegistryRecord>> {
        self.registry.list(&self.cipher)
    }

    // ------------------------------------------------------------------
    // Typed payloads
    // ------------------------------------------------------------------

    pub fn get_payload(&self, name: &str) -> Result<Payload> {
        let bytes = zeroize::Zeroizing::new(self.get(name)?);
        Payload::from_bytes(&bytes)
    }

    pub fn put_payload(&self, name: &str, payload: &Payload) -> Result<()> {
        let bytes = zeroize::Zeroizing::new(payload.to_bytes()?);
        self.add(name, &bytes)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Validate that an entry name is usable.
///
/// Any non-empty string up to 1024 bytes without NUL characters.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(KeyStashError::InvalidName("name cannot be empty".into()));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(KeyStashError::InvalidName(format!(
            "name cannot exceed {MAX_NAME_LEN} bytes"
        )));
    }
    if name.contains('\0') {
        return Err(KeyStashError::InvalidName(
            "name cannot contain NUL characters".into(),
        ));
    }
    Ok(())
}
