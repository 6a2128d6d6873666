//! # Storage Layer
//!
//! The board is persisted as opaque text blobs addressed by key. The
//! [`KeyValueStore`] trait is the only thing the persistence adapter knows
//! about, so the same board logic runs against a directory on disk or a map
//! in memory.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage
//!   - One file per key: `{data_dir}/{key}.json`
//!   - Writes go to a temp file and are renamed into place
//!
//! - [`memory::InMemoryStore`]: storage for tests
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Storage Format
//!
//! ```text
//! {data_dir}/
//! ├── lists.json      # The whole board (JSON array of lists with nested cards)
//! ├── config.json     # Board configuration
//! └── logs/           # Rotated log files
//! ```

use crate::error::{KanbanError, Result};

pub mod fs;
pub mod memory;

/// Abstract interface for blob storage.
///
/// Values are complete snapshots; `set` overwrites whatever was stored
/// under the key before.
pub trait KeyValueStore {
    /// Read the blob stored under `key`. `Ok(None)` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing prior content.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Keys are plain file stems: ASCII letters, digits, `-`, `_` and `.`, not
/// starting with `.`.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(KanbanError::Store(format!("Invalid storage key: {:?}", key)))
    }
}
