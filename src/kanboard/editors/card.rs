use super::{
    DESCRIPTION_REQUIRED, EditMode, EditOutcome, ModalKind, ModalSlot, TITLE_REQUIRED, required,
};
use crate::board::ListStore;
use crate::error::Result;
use crate::model::{Card, CardId};
use log::info;
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardErrors {
    pub title: String,
    pub description: String,
}

impl CardErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty()
    }
}

/// Controller for the add/edit card dialog.
///
/// The dialog is scoped to one list, recorded by its index in the store
/// when the dialog opens.
pub struct CardEditor {
    store: Rc<ListStore>,
    modal: ModalSlot,
    is_open: bool,
    editing: Option<Card>,
    list_index: Option<usize>,
    errors: CardErrors,
}

impl CardEditor {
    pub fn new(store: Rc<ListStore>, modal: ModalSlot) -> Self {
        Self {
            store,
            modal,
            is_open: false,
            editing: None,
            list_index: None,
            errors: CardErrors::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn editing(&self) -> Option<&Card> {
        self.editing.as_ref()
    }

    pub fn list_index(&self) -> Option<usize> {
        self.list_index
    }

    pub fn mode(&self) -> EditMode {
        if self.editing.is_none() {
            EditMode::Add
        } else {
            EditMode::Edit
        }
    }

    pub fn errors(&self) -> &CardErrors {
        &self.errors
    }

    /// Open the dialog for the list at `list_index`, in edit mode when
    /// `card` is given. The card is copied; edits reach the board on save.
    pub fn open_modal(&mut self, list_index: usize, card: Option<&Card>) -> Result<()> {
        self.modal.claim(ModalKind::Card)?;
        self.list_index = Some(list_index);
        self.editing = card.cloned();
        self.is_open = true;
        self.errors = CardErrors::default();
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.is_open = false;
        self.list_index = None;
        self.editing = None;
        self.errors = CardErrors::default();
        self.modal.release(ModalKind::Card);
    }

    pub fn validate_form(&mut self, card: &Card) -> bool {
        self.errors.title = required(&card.title, TITLE_REQUIRED);
        self.errors.description = required(&card.description, DESCRIPTION_REQUIRED);
        self.errors.is_empty()
    }

    /// Submit the form into the target list.
    ///
    /// A missing or out-of-range list index gives `NoTarget` before any
    /// validation. Add mode assigns `max(card ids on the whole board) + 1`.
    /// Edit mode replaces the card with `card.id` inside the target list.
    pub fn save_card(&mut self, card: Card) -> Result<EditOutcome> {
        let Some(list_index) = self.list_index.filter(|&i| i < self.store.len()) else {
            return Ok(EditOutcome::NoTarget);
        };
        if !self.validate_form(&card) {
            return Ok(EditOutcome::Invalid);
        }

        let new_id = match self.mode() {
            EditMode::Add => match self.store.next_card_id() {
                Ok(id) => Some(id),
                Err(err) => {
                    self.close_modal();
                    return Err(err);
                }
            },
            EditMode::Edit => None,
        };

        let mut outcome = EditOutcome::NotFound(card.id);
        let result = self.store.update(|lists| match new_id {
            Some(id) => {
                lists[list_index].cards.push(Card { id, ..card });
                outcome = EditOutcome::Created(id);
                true
            }
            None => {
                let cards = &mut lists[list_index].cards;
                match cards.iter().position(|c| c.id == card.id) {
                    Some(index) => {
                        outcome = EditOutcome::Updated(card.id);
                        cards[index] = card;
                        true
                    }
                    None => false,
                }
            }
        });

        self.close_modal();
        result?;
        info!(
            "event=card_saved list_index={} outcome={:?}",
            list_index, outcome
        );
        Ok(outcome)
    }

    /// Remove a card from the target list, then close the dialog.
    pub fn delete_card(&mut self, card_id: CardId) -> Result<EditOutcome> {
        let Some(list_index) = self.list_index else {
            return Ok(EditOutcome::NoTarget);
        };

        let result = self.store.update(|lists| match lists.get_mut(list_index) {
            Some(list) => {
                let before = list.cards.len();
                list.cards.retain(|c| c.id != card_id);
                list.cards.len() != before
            }
            None => false,
        });

        self.close_modal();
        let outcome = if result? {
            EditOutcome::Deleted(card_id)
        } else {
            EditOutcome::NotFound(card_id)
        };
        info!(
            "event=card_deleted list_index={} outcome={:?}",
            list_index, outcome
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editors::ListEditor;
    use crate::error::KanbanError;
    use crate::model::{List, Priority};
    use crate::test_utils::{card, due, list, two_lists};

    fn editor(lists: Vec<List>) -> (Rc<ListStore>, CardEditor) {
        let store = ListStore::new(lists).shared();
        let editor = CardEditor::new(store.clone(), ModalSlot::new());
        (store, editor)
    }

    #[test]
    fn new_card_id_is_global_max_plus_one() {
        let (store, mut editor) = editor(two_lists());
        editor.open_modal(1, None).unwrap();

        let outcome = editor.save_card(Card::draft("New", "Body", due())).unwrap();
        assert_eq!(outcome, EditOutcome::Created(5));
        let ids: Vec<_> = store.lists()[1].cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 4, 5]);
        assert!(!editor.is_open());
    }

    #[test]
    fn first_card_on_board_gets_id_one() {
        let (store, mut editor) = editor(vec![list(1, "Empty", vec![])]);
        editor.open_modal(0, None).unwrap();
        assert_eq!(
            editor.save_card(Card::draft("T", "D", due())).unwrap(),
            EditOutcome::Created(1)
        );
        assert_eq!(store.lists()[0].cards[0].id, 1);
    }

    #[test]
    fn empty_title_is_rejected_field_by_field() {
        let (store, mut editor) = editor(two_lists());
        editor.open_modal(0, None).unwrap();

        let outcome = editor.save_card(Card::draft("", "x", due())).unwrap();
        assert_eq!(outcome, EditOutcome::Invalid);
        assert_eq!(editor.errors().title, "Title is required");
        assert_eq!(editor.errors().description, "");
        assert!(editor.is_open());
        assert_eq!(store.lists()[0].cards.len(), 2);
    }

    #[test]
    fn description_is_required() {
        let (_, mut editor) = editor(two_lists());
        assert!(!editor.validate_form(&Card::draft("T", "", due())));
        assert_eq!(editor.errors().title, "");
        assert_eq!(editor.errors().description, "Description is required");

        assert!(editor.validate_form(&Card::draft("T", "D", due())));
        assert!(editor.errors().is_empty());
    }

    #[test]
    fn save_without_target_list_is_a_no_op() {
        let (store, mut editor) = editor(two_lists());
        let outcome = editor.save_card(Card::draft("", "", due())).unwrap();
        assert_eq!(outcome, EditOutcome::NoTarget);
        // No validation ran either.
        assert!(editor.errors().is_empty());
        assert_eq!(store.snapshot(), two_lists());
    }

    #[test]
    fn stale_list_index_is_a_no_op() {
        let (store, mut editor) = editor(two_lists());
        editor.open_modal(5, None).unwrap();
        assert_eq!(
            editor.save_card(Card::draft("T", "D", due())).unwrap(),
            EditOutcome::NoTarget
        );
        assert!(editor.is_open());
        assert_eq!(store.snapshot(), two_lists());
    }

    #[test]
    fn stale_list_index_wins_over_invalid_fields() {
        let (store, mut editor) = editor(two_lists());
        editor.open_modal(5, None).unwrap();
        assert_eq!(
            editor.save_card(Card::draft("", "", due())).unwrap(),
            EditOutcome::NoTarget
        );
        assert!(editor.errors().is_empty());
        assert_eq!(store.snapshot(), two_lists());
    }

    #[test]
    fn add_after_highest_possible_card_id_is_an_error() {
        let (store, mut editor) = editor(vec![list(1, "Full", vec![card(u64::MAX, "last")])]);
        editor.open_modal(0, None).unwrap();

        let err = editor.save_card(Card::draft("T", "D", due())).unwrap_err();
        assert!(matches!(err, KanbanError::Store(_)));
        assert_eq!(store.lists()[0].cards.len(), 1);
        assert!(!editor.is_open());
    }

    #[test]
    fn edit_replaces_card_in_place() {
        let (store, mut editor) = editor(two_lists());
        let (loc, mut edited) = store.find_card(3).unwrap();
        editor.open_modal(loc.list_index, Some(&edited)).unwrap();
        assert_eq!(editor.mode(), EditMode::Edit);

        edited.title = "Renamed".into();
        edited.priority = Priority::High;
        assert_eq!(editor.save_card(edited).unwrap(), EditOutcome::Updated(3));

        let (after, saved) = store.find_card(3).unwrap();
        assert_eq!(after, loc);
        assert_eq!(saved.title, "Renamed");
        assert_eq!(saved.priority, Priority::High);
    }

    #[test]
    fn abandoned_edit_leaves_board_untouched() {
        let (store, mut editor) = editor(two_lists());
        let (loc, original) = store.find_card(1).unwrap();
        editor.open_modal(loc.list_index, Some(&original)).unwrap();
        editor.close_modal();
        assert_eq!(store.find_card(1).unwrap().1, original);
        assert_eq!(editor.list_index(), None);
    }

    #[test]
    fn edit_of_card_from_another_list_is_not_found() {
        let (store, mut editor) = editor(two_lists());
        editor.open_modal(0, Some(&card(3, "Task 3"))).unwrap();
        assert_eq!(
            editor.save_card(card(3, "Moved?")).unwrap(),
            EditOutcome::NotFound(3)
        );
        assert_eq!(store.snapshot(), two_lists());
        assert!(!editor.is_open());
    }

    #[test]
    fn delete_card_from_target_list() {
        let (store, mut editor) = editor(two_lists());
        editor.open_modal(0, store.find_card(2).map(|(_, c)| c).as_ref()).unwrap();
        assert_eq!(editor.delete_card(2).unwrap(), EditOutcome::Deleted(2));
        assert!(store.find_card(2).is_none());
        assert!(!editor.is_open());
    }

    #[test]
    fn delete_card_needs_a_target() {
        let (store, mut editor) = editor(two_lists());
        assert_eq!(editor.delete_card(1).unwrap(), EditOutcome::NoTarget);
        assert!(store.find_card(1).is_some());

        editor.open_modal(1, None).unwrap();
        assert_eq!(editor.delete_card(1).unwrap(), EditOutcome::NotFound(1));
        assert!(store.find_card(1).is_some());
    }

    #[test]
    fn only_one_dialog_at_a_time() {
        let store = ListStore::new(two_lists()).shared();
        let modal = ModalSlot::new();
        let mut lists = ListEditor::new(store.clone(), modal.clone());
        let mut cards = CardEditor::new(store, modal);

        lists.show(None).unwrap();
        assert!(matches!(
            cards.open_modal(0, None),
            Err(KanbanError::ModalBusy(crate::editors::ModalKind::List))
        ));
        lists.hide();
        cards.open_modal(0, None).unwrap();
        assert!(lists.show(None).is_err());
    }
}
