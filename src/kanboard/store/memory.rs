use super::KeyValueStore;
use crate::error::{KanbanError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
///
/// Uses `RefCell` since the board is single-threaded, which lets the trait
/// take `&self` everywhere.
#[derive(Default)]
pub struct InMemoryStore {
    blobs: RefCell<HashMap<String, String>>,
    writes: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(KanbanError::Store("Simulated write error".to_string()));
        }
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}
