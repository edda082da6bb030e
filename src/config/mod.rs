//! Store configuration (`keystash.toml`).

pub mod settings;

pub use settings::{KdfKind, Settings};
