//! Vault module — the encrypted, content-addressed store.
//!
//! This module provides:
//! - On-disk layout, reserved names and atomic writes (`format`)
//! - The master-password verifier (`gate`)
//! - Tagged plaintext payloads (`payload`)
//! - The encrypted index of entry names (`registry`)
//! - `EntryStore` for get/add/edit/delete (`store`)

pub mod format;
pub mod gate;
pub mod payload;
pub mod registry;
pub mod store;

// Re-export the most commonly used items.
pub use format::Address;
pub use gate::MasterPasswordGate;
pub use payload::Payload;
pub use registry::{Registry, RegistryRecord};
pub use store::EntryStore;
