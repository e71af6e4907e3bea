use axum_helpers::AppError;
use thiserror::Error;

/// Errors surfaced by [`ItemService`](crate::service::ItemService)
#[derive(Debug, Error)]
pub enum ItemError {
    /// Malformed or out-of-policy input; the message is shown to clients
    #[error("{0}")]
    InvalidInput(String),

    #[error("Item not found: {0}")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Errors reported by an [`ItemRepository`](crate::repository::ItemRepository)
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Item {0} does not exist")]
    NotFound(i64),

    #[error("{0}")]
    Database(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// The HTTP operation an error happened in.
///
/// Decides the 500 message and whether `InvalidInput` is a client error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    Summary,
}

impl Operation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::List => "failed to retrieve items",
            Operation::Get => "failed to retrieve item",
            Operation::Create => "failed to create item",
            Operation::Update => "failed to update item",
            Operation::Delete => "failed to delete item",
            Operation::Summary => "failed to retrieve summary",
        }
    }

    /// Only create and update answer `InvalidInput` with 400.
    fn reports_invalid_input(&self) -> bool {
        matches!(self, Operation::Create | Operation::Update)
    }
}

impl ItemError {
    /// Maps this error to the response for `operation`.
    pub fn into_app_error(self, operation: Operation) -> AppError {
        match self {
            ItemError::NotFound(_) => AppError::NotFound("item not found".to_string()),
            ItemError::InvalidInput(message) if operation.reports_invalid_input() => {
                AppError::Validation(vec![message])
            }
            other => {
                if other.is_client_fault() {
                    tracing::warn!(?operation, error = %other, "Rejected item request");
                } else {
                    tracing::error!(?operation, error = %other, "Item operation failed");
                }
                AppError::InternalServerError(operation.failure_message().to_string())
            }
        }
    }

    /// Caused by the request rather than the store.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, ItemError::InvalidInput(_) | ItemError::NotFound(_))
    }
}
