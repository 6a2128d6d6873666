//! # API Facade
//!
//! [`KanbanApi`] is the composition root of a board session. It owns the
//! one [`ListStore`], wires persistence into it, and holds the editors and
//! the search filter that operate on it.
//!
//! ## Startup
//!
//! [`KanbanApi::open`] builds the store (sample board or empty, per
//! config), loads the persisted board over it, and only then registers the
//! auto-save hook. From that point every editor mutation is written back
//! before the editor closes.
//!
//! ## Two ways in
//!
//! - Interactive UIs drive the editors directly through
//!   [`KanbanApi::list_editor_mut`] and [`KanbanApi::card_editor_mut`],
//!   rendering their state between calls.
//! - One-shot clients (the CLI) use the flow methods (`add_list`,
//!   `edit_card`, ...). Each flow opens the right editor, submits, and
//!   reports the outcome as a [`CmdResult`]. A flow never leaves an editor
//!   open.
//!
//! Like the rest of the library, nothing here prints or exits.

use crate::board::ListStore;
use crate::config::BoardConfig;
use crate::editors::{self, CardEditor, EditOutcome, ListEditor, ModalSlot};
use crate::error::{KanbanError, Result};
use crate::model::{Card, CardId, List, ListId, Priority};
use crate::persistence::Persistence;
use crate::search::{SearchFilter, SearchHit};
use crate::seed;
use crate::store::KeyValueStore;
use chrono::{Local, NaiveDate};
use log::debug;
use std::path::Path;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A validation message for one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub outcome: Option<EditOutcome>,
    pub field_errors: Vec<FieldError>,
    pub lists: Vec<List>,
    pub hits: Vec<SearchHit>,
    pub config: Option<BoardConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_outcome(mut self, outcome: EditOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn with_lists(mut self, lists: Vec<List>) -> Self {
        self.lists = lists;
        self
    }

    pub fn with_hits(mut self, hits: Vec<SearchHit>) -> Self {
        self.hits = hits;
        self
    }

    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn is_invalid(&self) -> bool {
        self.outcome == Some(EditOutcome::Invalid)
    }
}

/// Changes to a list. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ListPatch {
    pub title: Option<String>,
    pub color: Option<String>,
}

impl ListPatch {
    fn apply(self, list: &mut List) {
        if let Some(title) = self.title {
            list.title = title;
        }
        if let Some(color) = self.color {
            list.color = color;
        }
    }
}

/// Changes to a card. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due: Option<NaiveDate>,
    pub tag: Option<String>,
    pub tag_color: Option<String>,
    pub priority: Option<Priority>,
}

impl CardPatch {
    fn apply(self, card: &mut Card) {
        if let Some(title) = self.title {
            card.title = title;
        }
        if let Some(description) = self.description {
            card.description = description;
        }
        if let Some(due) = self.due {
            card.due = due;
        }
        if let Some(tag) = self.tag {
            card.tag = tag;
        }
        if let Some(tag_color) = self.tag_color {
            card.tag_color = tag_color;
        }
        if let Some(priority) = self.priority {
            card.priority = priority;
        }
    }
}

pub struct KanbanApi {
    store: Rc<ListStore>,
    list_editor: ListEditor,
    card_editor: CardEditor,
    search: SearchFilter,
    config: BoardConfig,
}

impl KanbanApi {
    pub fn open<S: KeyValueStore + 'static>(backend: S, config: BoardConfig) -> Result<Self> {
        let store = if config.seed_defaults {
            ListStore::with_defaults()
        } else {
            ListStore::empty()
        }
        .shared();

        let persistence = Persistence::with_key(backend, config.storage_key.clone());
        persistence.load(&store)?;
        store.on_change(move |lists| persistence.save(lists));

        let modal = ModalSlot::new();
        Ok(Self {
            list_editor: ListEditor::new(store.clone(), modal.clone()),
            card_editor: CardEditor::new(store.clone(), modal),
            search: SearchFilter::new(config.search_threshold, config.match_all_when_empty),
            store,
            config,
        })
    }

    pub fn store(&self) -> &Rc<ListStore> {
        &self.store
    }

    pub fn lists(&self) -> Vec<List> {
        self.store.snapshot()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn list_editor(&self) -> &ListEditor {
        &self.list_editor
    }

    pub fn list_editor_mut(&mut self) -> &mut ListEditor {
        &mut self.list_editor
    }

    pub fn card_editor(&self) -> &CardEditor {
        &self.card_editor
    }

    pub fn card_editor_mut(&mut self) -> &mut CardEditor {
        &mut self.card_editor
    }

    pub fn search_filter_mut(&mut self) -> &mut SearchFilter {
        &mut self.search
    }

    /// The whole board.
    pub fn show(&self) -> CmdResult {
        CmdResult::default().with_lists(self.lists())
    }

    pub fn search(&mut self, query: &str) -> CmdResult {
        self.search.set_query(query);
        let hits = self.search.search(&self.store.lists());
        debug!("event=search hits={}", hits.len());
        let mut result = CmdResult::default().with_hits(hits);
        if result.hits.is_empty() {
            result.add_message(CmdMessage::info("No matching lists."));
        }
        result
    }

    pub fn add_list(&mut self, title: &str, color: &str) -> Result<CmdResult> {
        self.list_editor.show(None)?;
        let outcome = self.list_editor.save(List::draft(title, color))?;
        Ok(self.finish_list(outcome))
    }

    pub fn edit_list(&mut self, list_id: ListId, patch: ListPatch) -> Result<CmdResult> {
        let Some(list) = self.store.list(list_id) else {
            return Ok(not_found(EditOutcome::NotFound(list_id), "List"));
        };
        self.list_editor.show(Some(&list))?;

        let mut edited = self.list_editor.editing().cloned().unwrap_or(list);
        patch.apply(&mut edited);
        let outcome = self.list_editor.save(edited)?;
        Ok(self.finish_list(outcome))
    }

    pub fn delete_list(&mut self, list_id: ListId) -> Result<CmdResult> {
        let list = self.store.list(list_id);
        self.list_editor.show(list.as_ref())?;
        let outcome = self.list_editor.delete(list_id)?;
        Ok(self.finish_list(outcome))
    }

    /// Add a card to the list with `list_id`. Missing due date means today;
    /// missing tag color gets a random one.
    pub fn add_card(&mut self, list_id: ListId, patch: CardPatch) -> Result<CmdResult> {
        let Some(list_index) = self.store.list_index(list_id) else {
            return Err(KanbanError::Api(format!("List {} not found", list_id)));
        };

        let mut card = Card::draft("", "", Local::now().date_naive());
        card.tag_color = seed::random_color(&mut rand::thread_rng());
        patch.apply(&mut card);

        self.card_editor.open_modal(list_index, None)?;
        let outcome = self.card_editor.save_card(card)?;
        Ok(self.finish_card(outcome))
    }

    pub fn edit_card(&mut self, card_id: CardId, patch: CardPatch) -> Result<CmdResult> {
        let Some((location, card)) = self.store.find_card(card_id) else {
            return Ok(not_found(EditOutcome::NotFound(card_id), "Card"));
        };
        self.card_editor.open_modal(location.list_index, Some(&card))?;

        let mut edited = self.card_editor.editing().cloned().unwrap_or(card);
        patch.apply(&mut edited);
        let outcome = self.card_editor.save_card(edited)?;
        Ok(self.finish_card(outcome))
    }

    pub fn delete_card(&mut self, card_id: CardId) -> Result<CmdResult> {
        let Some((location, card)) = self.store.find_card(card_id) else {
            return Ok(not_found(EditOutcome::NotFound(card_id), "Card"));
        };
        self.card_editor.open_modal(location.list_index, Some(&card))?;
        let outcome = self.card_editor.delete_card(card_id)?;
        Ok(self.finish_card(outcome))
    }

    fn finish_list(&mut self, outcome: EditOutcome) -> CmdResult {
        let mut result = CmdResult::default().with_outcome(outcome);
        if outcome == EditOutcome::Invalid {
            let errors = self.list_editor.errors();
            push_error(&mut result, "title", &errors.title);
            self.list_editor.hide();
        }
        result.add_message(message_for(&outcome, "List"));
        result
    }

    fn finish_card(&mut self, outcome: EditOutcome) -> CmdResult {
        let mut result = CmdResult::default().with_outcome(outcome);
        if matches!(outcome, EditOutcome::Invalid | EditOutcome::NoTarget) {
            let errors = self.card_editor.errors();
            push_error(&mut result, "title", &errors.title);
            push_error(&mut result, "description", &errors.description);
            self.card_editor.close_modal();
        }
        result.add_message(message_for(&outcome, "Card"));
        result
    }
}

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Show or change the configuration stored in `dir`.
pub fn config(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = BoardConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = BoardConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = BoardConfig::load(dir)?;
            config.set(&key, &value).map_err(KanbanError::Config)?;
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

fn push_error(result: &mut CmdResult, field: &'static str, message: &str) {
    if !message.is_empty() {
        result.field_errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }
}

fn message_for(outcome: &EditOutcome, entity: &str) -> CmdMessage {
    let text = editors::describe(outcome, entity);
    match outcome {
        EditOutcome::Created(_) | EditOutcome::Updated(_) | EditOutcome::Deleted(_) => {
            CmdMessage::success(text)
        }
        EditOutcome::NotFound(_) => CmdMessage::warning(text),
        EditOutcome::Invalid | EditOutcome::NoTarget => CmdMessage::error(text),
    }
}

fn not_found(outcome: EditOutcome, entity: &str) -> CmdResult {
    let mut result = CmdResult::default().with_outcome(outcome);
    result.add_message(message_for(&outcome, entity));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editors::ModalKind;
    use crate::persistence::DEFAULT_KEY;
    use crate::store::fs::FileStore;
    use crate::store::memory::InMemoryStore;
    use crate::test_utils::two_lists;

    fn empty_config() -> BoardConfig {
        BoardConfig {
            seed_defaults: false,
            ..BoardConfig::default()
        }
    }

    fn api_with(lists: Vec<List>) -> (Rc<InMemoryStore>, KanbanApi) {
        let backend = Rc::new(InMemoryStore::new());
        Persistence::new(backend.clone()).save(&lists).unwrap();
        let api = KanbanApi::open(backend.clone(), empty_config()).unwrap();
        (backend, api)
    }

    fn reload(backend: &Rc<InMemoryStore>) -> Vec<List> {
        Persistence::new(backend.clone()).read().unwrap().unwrap()
    }

    #[test]
    fn first_run_uses_sample_board_without_writing() {
        let backend = Rc::new(InMemoryStore::new());
        let api = KanbanApi::open(backend.clone(), BoardConfig::default()).unwrap();
        assert_eq!(api.lists().len(), 3);
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn first_run_can_start_empty() {
        let backend = Rc::new(InMemoryStore::new());
        let mut api = KanbanApi::open(backend.clone(), empty_config()).unwrap();
        assert!(api.lists().is_empty());

        let result = api.add_list("Backlog", "").unwrap();
        assert_eq!(result.outcome, Some(EditOutcome::Created(1)));
        assert_eq!(reload(&backend)[0].title, "Backlog");
    }

    #[test]
    fn persisted_board_replaces_seed() {
        let (_, api) = api_with(two_lists());
        assert_eq!(api.lists(), two_lists());
    }

    #[test]
    fn malformed_board_fails_startup() {
        let backend = InMemoryStore::new();
        backend.set(DEFAULT_KEY, "[{").unwrap();
        assert!(matches!(
            KanbanApi::open(backend, empty_config()),
            Err(KanbanError::Serialization(_))
        ));
    }

    #[test]
    fn every_mutation_is_autosaved() {
        let (backend, mut api) = api_with(two_lists());
        let writes = backend.write_count();

        api.add_list("Review", "#ABCDEF").unwrap();
        api.edit_list(1, ListPatch {
            title: Some("Backlog".into()),
            ..Default::default()
        })
        .unwrap();
        api.add_card(3, CardPatch {
            title: Some("Ship it".into()),
            description: Some("Tag and publish".into()),
            ..Default::default()
        })
        .unwrap();
        api.delete_card(2).unwrap();
        assert_eq!(backend.write_count(), writes + 4);

        assert_eq!(reload(&backend), api.lists());
    }

    #[test]
    fn deleted_list_does_not_come_back_after_reload() {
        let (backend, mut api) = api_with(two_lists());
        api.delete_list(2).unwrap();

        let reopened = KanbanApi::open(backend, empty_config()).unwrap();
        assert!(reopened.store().list(2).is_none());
        assert!(reopened.store().find_card(3).is_none());
    }

    #[test]
    fn invalid_card_reports_field_errors_and_closes() {
        let (backend, mut api) = api_with(two_lists());
        let writes = backend.write_count();

        let result = api
            .add_card(1, CardPatch {
                title: Some(String::new()),
                description: Some("x".into()),
                ..Default::default()
            })
            .unwrap();
        assert!(result.is_invalid());
        assert_eq!(
            result.field_errors,
            vec![FieldError {
                field: "title",
                message: "Title is required".into()
            }]
        );
        assert!(!api.card_editor().is_open());
        assert_eq!(backend.write_count(), writes);
    }

    #[test]
    fn add_card_to_unknown_list_is_an_error() {
        let (_, mut api) = api_with(two_lists());
        assert!(matches!(
            api.add_card(99, CardPatch::default()),
            Err(KanbanError::Api(_))
        ));
    }

    #[test]
    fn edit_card_keeps_untouched_fields() {
        let (_, mut api) = api_with(two_lists());
        let before = api.store().find_card(4).unwrap().1;
        let result = api
            .edit_card(4, CardPatch {
                priority: Some(Priority::Low),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(result.outcome, Some(EditOutcome::Updated(4)));

        let after = api.store().find_card(4).unwrap().1;
        assert_eq!(after.priority, Priority::Low);
        assert_eq!(after.title, before.title);
        assert_eq!(after.due, before.due);
    }

    #[test]
    fn edit_list_keeps_cards() {
        let (_, mut api) = api_with(two_lists());
        api.edit_list(2, ListPatch {
            color: Some("#FF0000".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(api.store().list(2).unwrap().cards.len(), 2);
    }

    #[test]
    fn missing_ids_are_reported_not_raised() {
        let (_, mut api) = api_with(two_lists());
        assert_eq!(
            api.edit_card(77, CardPatch::default()).unwrap().outcome,
            Some(EditOutcome::NotFound(77))
        );
        assert_eq!(
            api.delete_list(77).unwrap().outcome,
            Some(EditOutcome::NotFound(77))
        );
        assert_eq!(api.lists(), two_lists());
    }

    #[test]
    fn flows_refuse_while_a_dialog_is_open() {
        let (_, mut api) = api_with(two_lists());
        api.card_editor_mut().open_modal(0, None).unwrap();
        assert!(matches!(
            api.add_list("Blocked", ""),
            Err(KanbanError::ModalBusy(ModalKind::Card))
        ));
    }

    #[test]
    fn search_uses_configured_threshold() {
        let (_, mut api) = api_with(two_lists());
        assert_eq!(api.search("doing").hits[0].list.id, 2);

        api.search_filter_mut().set_threshold(0.0);
        let result = api.search("Tsak 3");
        assert!(result.hits.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn config_set_and_show() {
        let dir = tempfile::tempdir().unwrap();
        let result = config(
            dir.path(),
            ConfigAction::Set("search-threshold".into(), "0.6".into()),
        )
        .unwrap();
        assert_eq!(result.config.unwrap().search_threshold, 0.6);

        let shown = config(dir.path(), ConfigAction::ShowKey("search-threshold".into())).unwrap();
        assert_eq!(shown.messages[0].content, "0.6");

    }

    #[test]
    fn rejected_config_value_is_an_error_and_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        config(dir.path(), ConfigAction::Set("storage-key".into(), "work".into())).unwrap();

        let err = config(
            dir.path(),
            ConfigAction::Set("storage-key".into(), "my board".into()),
        )
        .unwrap_err();
        assert!(matches!(err, KanbanError::Config(_)));
        assert_eq!(BoardConfig::load(dir.path()).unwrap().storage_key, "work");

        // Whatever config accepts, the file store accepts too.
        let stored = BoardConfig::load(dir.path()).unwrap();
        assert!(KanbanApi::open(FileStore::new(dir.path()), stored).is_ok());
    }
}
