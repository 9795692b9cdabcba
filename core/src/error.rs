use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Borrower '{id}' not found")]
    NotFound { id: String },

    #[error("No detail view is open")]
    NoSession,

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DeskError {
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound { id: id.to_string() }
    }
}

pub type DeskResult<T> = Result<T, DeskError>;
