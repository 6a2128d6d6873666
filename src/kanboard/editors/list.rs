use super::{EditMode, EditOutcome, ModalKind, ModalSlot, TITLE_REQUIRED, required};
use crate::board::ListStore;
use crate::error::Result;
use crate::model::{List, ListId};
use log::info;
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListErrors {
    pub title: String,
}

impl ListErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
    }
}

/// Controller for the add/edit list dialog.
pub struct ListEditor {
    store: Rc<ListStore>,
    modal: ModalSlot,
    is_open: bool,
    editing: Option<List>,
    errors: ListErrors,
}

impl ListEditor {
    pub fn new(store: Rc<ListStore>, modal: ModalSlot) -> Self {
        Self {
            store,
            modal,
            is_open: false,
            editing: None,
            errors: ListErrors::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// The list being edited, a copy taken when the dialog opened.
    pub fn editing(&self) -> Option<&List> {
        self.editing.as_ref()
    }

    pub fn mode(&self) -> EditMode {
        if self.editing.is_none() {
            EditMode::Add
        } else {
            EditMode::Edit
        }
    }

    pub fn errors(&self) -> &ListErrors {
        &self.errors
    }

    /// Open the dialog, in edit mode when `list` is given.
    pub fn show(&mut self, list: Option<&List>) -> Result<()> {
        self.modal.claim(ModalKind::List)?;
        self.editing = list.cloned();
        self.is_open = true;
        self.errors = ListErrors::default();
        Ok(())
    }

    pub fn hide(&mut self) {
        self.is_open = false;
        self.editing = None;
        self.errors = ListErrors::default();
        self.modal.release(ModalKind::List);
    }

    pub fn validate(&mut self, list: &List) -> bool {
        self.errors.title = required(&list.title, TITLE_REQUIRED);
        self.errors.is_empty()
    }

    /// Submit the form.
    ///
    /// In add mode the list gets a fresh id and starts with no cards; any
    /// cards on `list` are dropped. In edit mode the stored list with
    /// `list.id` is replaced wholesale, cards included, so callers pass back
    /// the cards they were shown.
    pub fn save(&mut self, list: List) -> Result<EditOutcome> {
        if !self.validate(&list) {
            return Ok(EditOutcome::Invalid);
        }

        let new_id = match self.mode() {
            EditMode::Add => match self.store.next_list_id() {
                Ok(id) => Some(id),
                Err(err) => {
                    self.hide();
                    return Err(err);
                }
            },
            EditMode::Edit => None,
        };

        let mut outcome = EditOutcome::NotFound(list.id);
        let result = self.store.update(|lists| match new_id {
            Some(id) => {
                lists.push(List {
                    id,
                    title: list.title,
                    color: list.color,
                    cards: Vec::new(),
                });
                outcome = EditOutcome::Created(id);
                true
            }
            None => match lists.iter().position(|l| l.id == list.id) {
                Some(index) => {
                    outcome = EditOutcome::Updated(list.id);
                    lists[index] = list;
                    true
                }
                None => false,
            },
        });

        self.hide();
        result?;
        log_outcome("list_saved", &outcome);
        Ok(outcome)
    }

    /// Remove the list and its cards, then close the dialog.
    pub fn delete(&mut self, list_id: ListId) -> Result<EditOutcome> {
        let result = self.store.update(|lists| {
            let before = lists.len();
            lists.retain(|l| l.id != list_id);
            lists.len() != before
        });

        self.hide();
        let outcome = if result? {
            EditOutcome::Deleted(list_id)
        } else {
            EditOutcome::NotFound(list_id)
        };
        log_outcome("list_deleted", &outcome);
        Ok(outcome)
    }
}

fn log_outcome(event: &str, outcome: &EditOutcome) {
    info!("event={} outcome={:?}", event, outcome);
}
