//! Key-value storage capability backing the session store.
//!
//! The session layer never touches a storage engine directly; it goes
//! through the `Storage` trait so the same code runs against the on-disk
//! backend in the native client and an in-memory fake in unit tests.
//!
//! Backends must be cheap to clone - the session store and the activity
//! tracker each hold a handle to the same underlying state.

pub mod disk;
pub mod memory;

pub use disk::DiskStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// String key-value storage with the three operations the session layer
/// needs. Implementations report failures rather than panicking; callers
/// in the session layer swallow them and degrade to "no session".
pub trait Storage: Clone {
    /// Read a value, `None` when the key is unset.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, overwriting any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
