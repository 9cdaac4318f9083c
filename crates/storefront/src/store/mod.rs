//! Key-value storage tiers.
//!
//! The engine persists through two opaque string stores that differ only in
//! lifetime:
//!
//! - **durable** - survives a full application restart
//! - **session-scoped** - lives as long as the running shell
//!
//! Both implement [`KeyValueStore`]. [`MemoryStore`] backs the session tier
//! (and tests); [`FileStore`] backs the durable tier with a JSON file.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use thiserror::Error;

/// Storage keys.
pub mod keys {
    /// Serialized signed-in user record (both tiers).
    pub const USER: &str = "techstore_user";

    /// Durable "remember me" flag.
    pub const REMEMBER: &str = "techstore_remember";

    /// Value stored under [`REMEMBER`] when set.
    pub const REMEMBER_VALUE: &str = "true";
}

/// Errors raised by store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a JSON string map.
    #[error("store file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Opaque string key-value store.
pub trait KeyValueStore: Send {
    /// Value for a key, if set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Set a key, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// The two storage tiers used for session persistence.
pub struct Storage {
    durable: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
}

impl Storage {
    /// Combine a durable and a session-scoped store.
    #[must_use]
    pub fn new(durable: Box<dyn KeyValueStore>, session: Box<dyn KeyValueStore>) -> Self {
        Self { durable, session }
    }

    /// Both tiers in memory. Nothing survives the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()), Box::new(MemoryStore::new()))
    }

    /// Store that survives restarts.
    #[must_use]
    pub fn durable(&self) -> &dyn KeyValueStore {
        self.durable.as_ref()
    }

    pub fn durable_mut(&mut self) -> &mut dyn KeyValueStore {
        self.durable.as_mut()
    }

    /// Store that lives as long as the running shell.
    #[must_use]
    pub fn session(&self) -> &dyn KeyValueStore {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> &mut dyn KeyValueStore {
        self.session.as_mut()
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}
