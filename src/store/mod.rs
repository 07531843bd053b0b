//! Key-value persistence for user preferences
//!
//! `FileStore` keeps values in a TOML file on disk, `MemoryStore` keeps them in
//! a map for tests and ephemeral sessions.

pub mod file;
pub mod memory;

use std::path::PathBuf;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to access store {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store {} is corrupt: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize store: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Minimal string key-value capability
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}
