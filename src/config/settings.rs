use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{validate_params, Argon2Params, KdfAlgorithm, KeyDerivation};
use crate::errors::{KeyStashError, Result};

/// Which key-derivation construction a store uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KdfKind {
    Argon2id,
    LegacyDigest,
}

/// Store-level configuration, loaded from `keystash.toml` in the root.
///
/// Every field has a sensible default so KeyStash works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Key-derivation construction (default: argon2id).
    #[serde(default = "default_kdf")]
    pub kdf: KdfKind,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Copy `get` results to the clipboard instead of printing them.
    #[serde(default = "default_clipboard")]
    pub clipboard: bool,

    /// Minimum master password length accepted by `init`.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_kdf() -> KdfKind {
    KdfKind::Argon2id
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_clipboard() -> bool {
    true
}

fn default_min_password_len() -> usize {
    8
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            kdf: default_kdf(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            clipboard: default_clipboard(),
            min_password_len: default_min_password_len(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the store root.
    pub const FILE_NAME: &'static str = "keystash.toml";

    /// Load settings from `<root>/keystash.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, or asks for Argon2
    /// parameters below the safe minimums, an error is returned.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            KeyStashError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.kdf == KdfKind::Argon2id {
            validate_params(&settings.argon2_params())
                .map_err(|e| KeyStashError::ConfigError(e.to_string()))?;
        }

        Ok(settings)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// The key-derivation function these settings select.
    pub fn key_derivation(&self) -> KeyDerivation {
        let algorithm = match self.kdf {
            KdfKind::Argon2id => KdfAlgorithm::Argon2id(self.argon2_params()),
            KdfKind::LegacyDigest => KdfAlgorithm::LegacyDigest,
        };
        KeyDerivation::new(algorithm)
    }

    /// Per-account store directory under `root`.
    ///
    /// Example: `~/.keystash/<sha256-hex(account)>`
    pub fn store_dir(root: &Path, account: &str) -> PathBuf {
        root.join(crate::crypto::content_address(account))
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.kdf, KdfKind::Argon2id);
        assert_eq!(s.argon2_memory_kib, 65_536);
        assert_eq!(s.argon2_iterations, 3);
        assert_eq!(s.argon2_parallelism, 4);
        assert!(s.clipboard);
        assert_eq!(s.min_password_len, 8);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.kdf, KdfKind::Argon2id);
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
kdf = "legacy-digest"
argon2_memory_kib = 131072
argon2_iterations = 5
argon2_parallelism = 8
clipboard = false
min_password_len = 12
"#;
        fs::write(tmp.path().join(Settings::FILE_NAME), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.kdf, KdfKind::LegacyDigest);
        assert_eq!(settings.argon2_memory_kib, 131_072);
        assert_eq!(settings.argon2_iterations, 5);
        assert_eq!(settings.argon2_parallelism, 8);
        assert!(!settings.clipboard);
        assert_eq!(settings.min_password_len, 12);
        assert_eq!(
            settings.key_derivation().algorithm(),
            KdfAlgorithm::LegacyDigest
        );
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(Settings::FILE_NAME), "clipboard = false\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert!(!settings.clipboard);
        assert_eq!(settings.kdf, KdfKind::Argon2id);
        assert_eq!(settings.argon2_iterations, 3);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(Settings::FILE_NAME), "not valid {{toml").unwrap();
        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn load_rejects_weak_argon2_params() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(Settings::FILE_NAME),
            "argon2_memory_kib = 1024\n",
        )
        .unwrap();
        assert!(matches!(
            Settings::load(tmp.path()),
            Err(KeyStashError::ConfigError(_))
        ));
    }

    #[test]
    fn store_dir_is_keyed_by_account_digest() {
        let root = Path::new("/home/user/.keystash");
        let a = Settings::store_dir(root, "alice");
        let b = Settings::store_dir(root, "bob");
        assert_ne!(a, b);
        assert_eq!(a.parent(), Some(root));
        assert_eq!(
            a.file_name().unwrap().to_string_lossy(),
            crate::crypto::content_address("alice")
        );
    }
}
