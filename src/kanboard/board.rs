//! # List Store
//!
//! [`ListStore`] owns the board: the ordered lists and, inside them, the
//! ordered cards. There is exactly one per process. The composition root
//! ([`crate::api::KanbanApi`]) creates it and hands out `Rc<ListStore>`
//! clones to the editors, so a mutation made through one holder is visible
//! to all of them.
//!
//! The store validates nothing. Validation lives in the editors.
//!
//! ## Change hooks
//!
//! Every structural mutation goes through [`ListStore::update`]. When the
//! mutation reports a change, the registered hooks run synchronously, in
//! registration order, before `update` returns. Auto-save is one such hook.

use crate::error::{KanbanError, Result};
use crate::model::{Card, CardId, List, ListId};
use crate::seed;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

pub type ChangeHook = Box<dyn Fn(&[List]) -> Result<()>>;

/// Where a card lives in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLocation {
    pub list_index: usize,
    pub card_index: usize,
}

#[derive(Default)]
pub struct ListStore {
    lists: RefCell<Vec<List>>,
    hooks: RefCell<Vec<ChangeHook>>,
}

impl ListStore {
    pub fn new(lists: Vec<List>) -> Self {
        Self {
            lists: RefCell::new(lists),
            hooks: RefCell::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// A store holding the sample board.
    pub fn with_defaults() -> Self {
        Self::new(seed::sample_board())
    }

    /// Wrap in an `Rc` for sharing.
    pub fn shared(self) -> Rc<Self> {
        Rc::new(self)
    }

    /// Borrow the current lists. Do not hold the borrow across `update`.
    pub fn lists(&self) -> Ref<'_, Vec<List>> {
        self.lists.borrow()
    }

    pub fn snapshot(&self) -> Vec<List> {
        self.lists.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.lists.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.borrow().is_empty()
    }

    pub fn list(&self, list_id: ListId) -> Option<List> {
        self.lists.borrow().iter().find(|l| l.id == list_id).cloned()
    }

    pub fn list_index(&self, list_id: ListId) -> Option<usize> {
        self.lists.borrow().iter().position(|l| l.id == list_id)
    }

    pub fn find_card(&self, card_id: CardId) -> Option<(CardLocation, Card)> {
        let lists = self.lists.borrow();
        lists.iter().enumerate().find_map(|(list_index, list)| {
            list.cards
                .iter()
                .position(|c| c.id == card_id)
                .map(|card_index| {
                    (
                        CardLocation {
                            list_index,
                            card_index,
                        },
                        list.cards[card_index].clone(),
                    )
                })
        })
    }

    /// Next list id: one past the highest list id, or 1 for an empty board.
    pub fn next_list_id(&self) -> Result<ListId> {
        next_list_id(&self.lists.borrow())
    }

    /// Next card id: one past the highest card id on the whole board, or 1
    /// when the board has no cards.
    pub fn next_card_id(&self) -> Result<CardId> {
        next_card_id(&self.lists.borrow())
    }

    /// Register a hook that runs after every mutation that changed the board.
    pub fn on_change(&self, hook: impl Fn(&[List]) -> Result<()> + 'static) {
        self.hooks.borrow_mut().push(Box::new(hook));
    }

    /// Apply a mutation. `mutate` returns whether it changed anything; hooks
    /// only run when it did. Returns that flag, or the first hook error.
    pub fn update<F>(&self, mutate: F) -> Result<bool>
    where
        F: FnOnce(&mut Vec<List>) -> bool,
    {
        let changed = {
            let mut lists = self.lists.borrow_mut();
            mutate(&mut lists)
        };
        if changed {
            self.notify()?;
        }
        Ok(changed)
    }

    /// Replace the whole board in place. Holders of the `Rc` see the new
    /// contents. Hooks do not run.
    pub fn replace_all(&self, lists: Vec<List>) {
        *self.lists.borrow_mut() = lists;
    }

    fn notify(&self) -> Result<()> {
        let lists = self.lists.borrow();
        for hook in self.hooks.borrow().iter() {
            hook(&lists)?;
        }
        Ok(())
    }
}

/// Fails when the highest list id is already `u64::MAX`.
pub fn next_list_id(lists: &[List]) -> Result<ListId> {
    successor(lists.iter().map(|l| l.id).max(), "list")
}

/// Fails when the highest card id is already `u64::MAX`.
pub fn next_card_id(lists: &[List]) -> Result<CardId> {
    successor(
        lists.iter().flat_map(|l| l.cards.iter().map(|c| c.id)).max(),
        "card",
    )
}

fn successor(max: Option<u64>, entity: &str) -> Result<u64> {
    match max {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| KanbanError::Store(format!("no {} ids left after {}", entity, max))),
    }
}
