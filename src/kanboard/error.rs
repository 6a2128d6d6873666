use crate::editors::ModalKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KanbanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Another editor is already open ({0})")]
    ModalBusy(ModalKind),

    #[error("Api Error: {0}")]
    Api(String),

    #[error("Logging error: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, KanbanError>;
