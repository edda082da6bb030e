//! Encrypted index of entry names.
//!
//! Entry files are named by digest, so the store cannot be enumerated
//! from the directory listing alone.  The registry keeps the names in a
//! single blob encrypted under the same key as the entries:
//!
//! ```text
//! .registry = nonce || AEAD([{"name": "...", "added_at": "RFC 3339"}, ...])
//! ```
//!
//! The registry is a set: appending a name that is already present leaves
//! the blob untouched.  A missing file is an empty registry.  Every update
//! rewrites the whole blob, which is fine for the tens-to-hundreds of
//! entries a personal store holds.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::format::{atomic_write, REGISTRY_FILE};
use crate::crypto::AeadCipher;
use crate::errors::{KeyStashError, Result};

/// One known entry name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryRecord {
    pub name: String,
    pub added_at: DateTime<Utc>,
}

/// Handle on the registry blob of one store directory.
#[derive(Debug, Clone)]
pub struct Registry {
    path: PathBuf,
}

impl Registry {
    pub fn new(store_dir: &Path) -> Self {
        Self {
            path: store_dir.join(REGISTRY_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records, in the order they were first added.
    pub fn list(&self, cipher: &AeadCipher) -> Result<Vec<RegistryRecord>> {
        let blob = match fs::read(&self.path) {
            Ok(blob) => blob,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let plaintext = cipher.decrypt(&blob)?;
        serde_json::from_slice(&plaintext)
            .map_err(|e| KeyStashError::SerializationError(format!("registry: {e}")))
    }

    /// Just the names, in insertion order.
    pub fn names(&self, cipher: &AeadCipher) -> Result<Vec<String>> {
        Ok(self.list(cipher)?.into_iter().map(|r| r.name).collect())
    }

    /// Record `name`.  Returns `false` if it was already present.
    pub fn append(&self, cipher: &AeadCipher, name: &str) -> Result<bool> {
        let mut records = self.list(cipher)?;
        if records.iter().any(|r| r.name == name) {
            return Ok(false);
        }

        records.push(RegistryRecord {
            name: name.to_string(),
            added_at: Utc::now(),
        });
        self.save(cipher, &records)?;
        debug!(count = records.len(), "registry appended");
        Ok(true)
    }

    /// Forget `name`.  Returns `false` if it was not present.
    pub fn remove(&self, cipher: &AeadCipher, name: &str) -> Result<bool> {
        let mut records = self.list(cipher)?;
        let before = records.len();
        records.retain(|r| r.name != name);
        if records.len() == before {
            return Ok(false);
        }

        self.save(cipher, &records)?;
        debug!(count = records.len(), "registry entry removed");
        Ok(true)
    }

    fn save(&self, cipher: &AeadCipher, records: &[RegistryRecord]) -> Result<()> {
        let plaintext = serde_json::to_vec(records)
            .map_err(|e| KeyStashError::SerializationError(format!("registry: {e}")))?;
        let blob = cipher.encrypt(&plaintext)?;
        atomic_write(&self.path, &blob)
    }
}
