use thiserror::Error;

use crate::model::RecordId;
use crate::validate::ValidationError;

#[derive(Error, Debug)]
pub enum TabulaError {
    #[error("Record not found: {0}")]
    NotFound(RecordId),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Nothing is selected")]
    EmptySelection,
    #[error("Duplicate record id: {0}")]
    DuplicateId(RecordId),
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("{0}")]
    Input(String),
}

pub type Result<T> = std::result::Result<T, TabulaError>;
