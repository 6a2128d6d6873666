//! # Editors
//!
//! Stateful controllers behind the add/edit dialogs. A UI renders their
//! observable state (`is_open`, the entity being edited, `mode`, `errors`)
//! and forwards user actions to their operations.
//!
//! Both editors follow the same shape:
//!
//! - The mode is derived from the editing slot: empty means "add", filled
//!   means "edit". It is never stored separately.
//! - Opening copies the entity into the editing slot. Nothing reaches the
//!   [`ListStore`](crate::board::ListStore) until a save, so an abandoned
//!   edit leaves the board untouched.
//! - A save or delete mutates the store (whose change hooks persist it)
//!   and then closes the editor.
//! - At most one editor is open at a time. Both editors share one
//!   [`ModalSlot`]; opening while the other kind is open fails with
//!   [`KanbanError::ModalBusy`].

use crate::error::{KanbanError, Result};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

pub mod card;
pub mod list;

pub use card::{CardEditor, CardErrors};
pub use list::{ListEditor, ListErrors};

pub const TITLE_REQUIRED: &str = "Title is required";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    List,
    Card,
}

impl fmt::Display for ModalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalKind::List => write!(f, "list editor"),
            ModalKind::Card => write!(f, "card editor"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Add,
    Edit,
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditMode::Add => write!(f, "add"),
            EditMode::Edit => write!(f, "edit"),
        }
    }
}

/// What a save or delete did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Validation failed. Nothing changed and the editor stays open.
    Invalid,
    /// No target list was recorded (card editor only). Nothing changed.
    NoTarget,
    Created(u64),
    Updated(u64),
    Deleted(u64),
    /// The id was not on the board. Nothing changed.
    NotFound(u64),
}

impl EditOutcome {
    /// True when the board was changed.
    pub fn applied(&self) -> bool {
        matches!(
            self,
            EditOutcome::Created(_) | EditOutcome::Updated(_) | EditOutcome::Deleted(_)
        )
    }

    pub fn id(&self) -> Option<u64> {
        match self {
            EditOutcome::Created(id)
            | EditOutcome::Updated(id)
            | EditOutcome::Deleted(id)
            | EditOutcome::NotFound(id) => Some(*id),
            EditOutcome::Invalid | EditOutcome::NoTarget => None,
        }
    }
}

/// The single "a dialog is open" token shared by every editor.
#[derive(Debug, Clone, Default)]
pub struct ModalSlot {
    open: Rc<Cell<Option<ModalKind>>>,
}

impl ModalSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<ModalKind> {
        self.open.get()
    }

    /// Claim the slot for `kind`. Re-claiming by the same kind is allowed.
    pub fn claim(&self, kind: ModalKind) -> Result<()> {
        match self.open.get() {
            Some(other) if other != kind => Err(KanbanError::ModalBusy(other)),
            _ => {
                self.open.set(Some(kind));
                Ok(())
            }
        }
    }

    /// Release the slot if `kind` holds it.
    pub fn release(&self, kind: ModalKind) {
        if self.open.get() == Some(kind) {
            self.open.set(None);
        }
    }
}

pub(crate) fn required(value: &str, message: &str) -> String {
    if value.is_empty() {
        message.to_string()
    } else {
        String::new()
    }
}

pub(crate) fn describe(outcome: &EditOutcome, entity: &str) -> String {
    match outcome {
        EditOutcome::Invalid => format!("{} not saved: validation failed", entity),
        EditOutcome::NoTarget => format!("{} not saved: no target list", entity),
        EditOutcome::Created(id) => format!("{} {} created", entity, id),
        EditOutcome::Updated(id) => format!("{} {} updated", entity, id),
        EditOutcome::Deleted(id) => format!("{} {} deleted", entity, id),
        EditOutcome::NotFound(id) => format!("{} {} not found", entity, id),
    }
}
