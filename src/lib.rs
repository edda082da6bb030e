//! KeyStash — a local, single-user encrypted secret store.
//!
//! Entries live one file per name under a per-account directory, each
//! file named by the SHA-256 of the entry name and holding
//! `nonce || AES-256-GCM(payload)`.  The key comes from the master
//! password and an installation salt; a stored verifier gates access.

pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod vault;
