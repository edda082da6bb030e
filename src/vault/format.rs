//! On-disk layout of a store directory.
//!
//! ```text
//! <store_dir>/
//!   .verifier            hex digest checked against the master password
//!   .registry            nonce || AEAD(JSON list of entry records)
//!   <sha256-hex(name)>   nonce || AEAD(JSON payload), one file per entry
//! ```
//!
//! Entry files are named by a 64-character lowercase hex digest.  Every
//! reserved name starts with a dot, so no entry address can ever collide
//! with one.  Files are raw bytes with no header and no version tag.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::crypto::digest::{content_address, is_content_address};
use crate::errors::Result;

/// Reserved filename of the password verifier.
pub const VERIFIER_FILE: &str = ".verifier";

/// Reserved filename of the encrypted registry blob.
pub const REGISTRY_FILE: &str = ".registry";

/// The content address of an entry: `sha256-hex(name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn of(name: &str) -> Self {
        Self(content_address(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full path of this entry inside `store_dir`.
    pub fn path_in(&self, store_dir: &Path) -> PathBuf {
        store_dir.join(&self.0)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns `true` if `file_name` is one of the store's reserved names
/// (including temp files left behind by an interrupted write).
pub fn is_reserved(file_name: &str) -> bool {
    file_name == VERIFIER_FILE
        || file_name == REGISTRY_FILE
        || (file_name.starts_with('.') && file_name.ends_with(".tmp"))
}

/// Returns `true` if `file_name` looks like an entry file.
pub fn is_entry_file(file_name: &str) -> bool {
    !is_reserved(file_name) && is_content_address(file_name)
}

/// Write `data` to `path` **atomically**.
///
/// 1. Write to a temp file in the same directory (mode 0600 on Unix).
/// 2. Flush and fsync it.
/// 3. Rename the temp file over the target path.
///
/// The rename ensures readers never see a half-written file.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    #[cfg(unix)]
    let mut file = {
        use std::os::unix::fs::OpenOptionsExt;
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(&tmp_path)?
    };

    #[cfg(not(unix))]
    let mut file = fs::File::create(&tmp_path)?;

    let written = file.write_all(data).and_then(|()| file.sync_all());
    drop(file);

    if let Err(e) = written.and_then(|()| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(())
}

/// Remove the registry and every entry file from `store_dir`.
///
/// The verifier and unrelated files are left in place.  Returns the
/// number of entry files removed.
pub fn clear_entries(store_dir: &Path) -> Result<usize> {
    match fs::remove_file(store_dir.join(REGISTRY_FILE)) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let entries = match fs::read_dir(store_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = entry?;
        if is_entry_file(&entry.file_name().to_string_lossy()) && entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn address_matches_digest() {
        let addr = Address::of("github");
        assert_eq!(addr.as_str(), content_address("github"));
        assert!(is_entry_file(addr.as_str()));
    }

    #[test]
    fn reserved_names_are_not_entries() {
        assert!(is_reserved(VERIFIER_FILE));
        assert!(is_reserved(REGISTRY_FILE));
        assert!(!is_entry_file(VERIFIER_FILE));
        assert!(!is_entry_file(REGISTRY_FILE));
        let tmp = format!(".{}.tmp", Address::of("a"));
        assert!(is_reserved(&tmp));
        assert!(!is_entry_file(&tmp));
    }

    #[test]
    fn atomic_write_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob");

        atomic_write(&path, b"first version, longer").unwrap();
        atomic_write(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn atomic_write_sets_owner_only_permissions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob");
        atomic_write(&path, b"data").unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::metadata(&path).unwrap().permissions();
            assert_eq!(perms.mode() & 0o777, 0o600);
        }
    }

    #[test]
    fn clear_entries_keeps_verifier_and_foreign_files() {
        let dir = TempDir::new().unwrap();
        let entry = Address::of("github").path_in(dir.path());
        fs::write(&entry, b"sealed").unwrap();
        fs::write(dir.path().join(REGISTRY_FILE), b"sealed").unwrap();
        fs::write(dir.path().join(VERIFIER_FILE), b"digest").unwrap();
        fs::write(dir.path().join("notes.txt"), b"mine").unwrap();

        assert_eq!(clear_entries(dir.path()).unwrap(), 1);

        assert!(!entry.exists());
        assert!(!dir.path().join(REGISTRY_FILE).exists());
        assert!(dir.path().join(VERIFIER_FILE).exists());
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn clear_entries_on_missing_dir_is_noop() {
        let dir = TempDir::new().unwrap();
        assert_eq!(clear_entries(&dir.path().join("absent")).unwrap(), 0);
    }
}
