use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in KeyStash.
///
/// None of the variants carry passwords, keys, or decrypted payloads.
#[derive(Debug, Error)]
pub enum KeyStashError {
    // --- Crypto errors ---
    #[error("Empty input: {0} must not be empty")]
    EmptyInput(&'static str),

    #[error("No encryption key configured")]
    NoKey,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Covers both truncated input and a failed authentication tag.
    #[error("Decryption failed — wrong password or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Store errors ---
    #[error("Entry '{0}' not found")]
    EntryNotFound(String),

    #[error("Invalid entry name: {0}")]
    InvalidName(String),

    #[error("Store is not initialized at {0} — run `keystash init` first")]
    NotInitialized(PathBuf),

    #[error("Store is already initialized at {0} (`init --force` resets it and deletes every entry)")]
    AlreadyInitialized(PathBuf),

    #[error("Wrong master password")]
    WrongPassword,

    #[error("Password mismatch — passwords do not match")]
    PasswordMismatch,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Clipboard error: {0}")]
    ClipboardError(String),
}

/// Convenience type alias for KeyStash results.
pub type Result<T> = std::result::Result<T, KeyStashError>;
