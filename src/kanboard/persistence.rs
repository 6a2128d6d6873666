//! # Persistence Adapter
//!
//! Moves the whole board in and out of a [`KeyValueStore`] as one JSON
//! blob under a fixed key. There is no partial write and no merge: `save`
//! overwrites the blob with a full snapshot, `load` replaces the store's
//! contents wholesale.
//!
//! Editors never call this directly. [`crate::api::KanbanApi`] registers
//! [`Persistence::save`] as a change hook on the [`ListStore`], so every
//! mutation is persisted as a side effect.

use crate::board::ListStore;
use crate::error::{KanbanError, Result};
use crate::model::List;
use crate::store::KeyValueStore;
use log::{debug, info};

pub const DEFAULT_KEY: &str = "lists";

pub struct Persistence<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Parse the stored board without touching any `ListStore`.
    pub fn read(&self) -> Result<Option<Vec<List>>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let lists: Vec<List> = serde_json::from_str(&raw).map_err(KanbanError::Serialization)?;
        Ok(Some(lists))
    }

    /// Load the stored board into `target`, replacing its contents in place.
    ///
    /// Returns `false` and leaves `target` untouched when nothing is stored.
    /// Malformed content is an error; nothing is discarded silently.
    pub fn load(&self, target: &ListStore) -> Result<bool> {
        match self.read()? {
            Some(lists) => {
                info!(
                    "event=board_loaded key={} lists={} cards={}",
                    self.key,
                    lists.len(),
                    lists.iter().map(|l| l.cards.len()).sum::<usize>()
                );
                target.replace_all(lists);
                Ok(true)
            }
            None => {
                info!("event=board_loaded key={} status=absent", self.key);
                Ok(false)
            }
        }
    }

    /// Write a full snapshot of `lists`, overwriting the previous blob.
    pub fn save(&self, lists: &[List]) -> Result<()> {
        let content = serde_json::to_string_pretty(lists).map_err(KanbanError::Serialization)?;
        self.store.set(&self.key, &content)?;
        debug!(
            "event=board_saved key={} lists={} bytes={}",
            self.key,
            lists.len(),
            content.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use crate::test_utils::{card, list, two_lists};

    #[test]
    fn load_without_blob_keeps_existing_lists() {
        let persistence = Persistence::new(InMemoryStore::new());
        let store = ListStore::new(two_lists());
        assert!(!persistence.load(&store).unwrap());
        assert_eq!(store.snapshot(), two_lists());
    }

    #[test]
    fn load_replaces_rather_than_merges() {
        let persistence = Persistence::new(InMemoryStore::new());
        persistence
            .save(&[list(9, "Only", vec![card(12, "c")])])
            .unwrap();

        let store = ListStore::new(two_lists());
        assert!(persistence.load(&store).unwrap());
        let lists = store.snapshot();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].id, 9);
        assert_eq!(lists[0].cards[0].id, 12);
    }

    #[test]
    fn round_trip_reproduces_board() {
        let persistence = Persistence::new(InMemoryStore::new());
        persistence.save(&two_lists()).unwrap();

        let fresh = ListStore::empty();
        persistence.load(&fresh).unwrap();
        assert_eq!(fresh.snapshot(), two_lists());
    }

    #[test]
    fn malformed_blob_is_an_error() {
        let backend = InMemoryStore::new();
        backend.set(DEFAULT_KEY, "{not json").unwrap();
        let persistence = Persistence::new(backend);

        let store = ListStore::new(two_lists());
        let err = persistence.load(&store).unwrap_err();
        assert!(matches!(err, KanbanError::Serialization(_)));
        // Nothing was replaced.
        assert_eq!(store.snapshot(), two_lists());
    }

    #[test]
    fn loads_browser_exports_with_timestamps() {
        let backend = InMemoryStore::new();
        backend
            .set(
                DEFAULT_KEY,
                r##"[{"id":1,"title":"To Do","color":"","cards":[
                    {"id":1,"title":"Task 1","description":"D","date":"2024-06-01T09:30:00.000Z",
                     "tag":"work","tagColor":"#336699","priority":"Medium"}]}]"##,
            )
            .unwrap();
        let persistence = Persistence::new(backend);
        let lists = persistence.read().unwrap().unwrap();
        let mut expected = card(1, "Task 1");
        expected.description = "D".to_string();
        assert_eq!(lists[0].cards[0], expected);
    }

    #[test]
    fn custom_key_is_used() {
        let persistence = Persistence::with_key(InMemoryStore::new(), "board-2");
        persistence.save(&[]).unwrap();
        assert!(persistence.backend().get("board-2").unwrap().is_some());
        assert!(persistence.backend().get(DEFAULT_KEY).unwrap().is_none());
    }
}
