//! Error taxonomy shared by every repository backend and the HTTP layer.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the HTTP layer maps it to 404.
//! Every other backend or transport failure, including JSON that does not
//! match the `Todo` shape, collapses into `Persistence` with a message meant
//! for humans.

use thiserror::Error;
use uuid::Uuid;

pub type TodoResult<T> = Result<T, TodoError>;

#[derive(Debug, Error)]
pub enum TodoError {
    /// The inbound request body or path was malformed.
    #[error("invalid input: {0}")]
    Validation(String),

    /// No todo with this id exists.
    #[error("todo {0} not found")]
    NotFound(Uuid),

    /// The backend failed or answered with something unexpected.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl TodoError {
    pub fn persistence(msg: impl Into<String>) -> Self {
        TodoError::Persistence(msg.into())
    }
}

impl From<serde_json::Error> for TodoError {
    fn from(e: serde_json::Error) -> Self {
        TodoError::Persistence(format!("malformed backend payload: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(
            TodoError::NotFound(Uuid::nil()).to_string(),
            "todo 00000000-0000-0000-0000-000000000000 not found"
        );
        assert_eq!(
            TodoError::persistence("HTTP 500: boom").to_string(),
            "persistence failure: HTTP 500: boom"
        );
    }

    #[test]
    fn serde_errors_become_persistence() {
        let err: TodoError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, TodoError::Persistence(_)));
    }
}
