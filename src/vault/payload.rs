//! The plaintext shape of an entry.
//!
//! A payload is either free-form bytes or a login/password pair.  It is
//! serialized to tagged JSON before encryption, so the shape travels with
//! the data instead of being guessed by the reader.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::format::{base64_decode, base64_encode};
use crate::errors::{KeyStashError, Result};

/// A decrypted entry value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    /// Free-form secret bytes (base64 in JSON).
    Raw {
        #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
        data: Vec<u8>,
    },
    /// A structured credential.
    Credential { login: String, password: String },
}

impl Payload {
    pub fn raw(data: impl Into<Vec<u8>>) -> Self {
        Self::Raw { data: data.into() }
    }

    pub fn credential(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Credential {
            login: login.into(),
            password: password.into(),
        }
    }

    /// Serialize to the bytes that get encrypted.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| KeyStashError::SerializationError(format!("payload: {e}")))
    }

    /// Parse decrypted bytes back into a payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| KeyStashError::SerializationError(format!("payload: {e}")))
    }

    /// The text a user wants to see or paste.
    ///
    /// Raw data is decoded lossily as UTF-8; a credential renders as
    /// `login:password`.
    pub fn display_secret(&self) -> String {
        match self {
            Self::Raw { data } => String::from_utf8_lossy(data).into_owned(),
            Self::Credential { login, password } => format!("{login}:{password}"),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Raw { .. } => "raw",
            Self::Credential { .. } => "credential",
        }
    }
}

impl Drop for Payload {
    fn drop(&mut self) {
        match self {
            Self::Raw { data } => data.zeroize(),
            Self::Credential { login, password } => {
                login.zeroize();
                password.zeroize();
            }
        }
    }
}

impl std::fmt::Debug for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raw { data } => f
                .debug_struct("Raw")
                .field("len", &data.len())
                .finish_non_exhaustive(),
            Self::Credential { login, .. } => f
                .debug_struct("Credential")
                .field("login", login)
                .finish_non_exhaustive(),
        }
    }
}
