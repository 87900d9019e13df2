// src/shared/errors.rs

use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use super::shared_structs::GenericResponse;

/// Result of a storage collaborator call.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result of a Catalog Manager / Sale Ledger operation.
pub type EngineResult<T> = Result<T, EngineError>;

/// Failure of the underlying persistence layer.
///
/// Never retried automatically: the failing statement may not be idempotent.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Raised by non-SQL backends (the in-memory store) when an operation cannot complete.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Entity kinds that can be looked up by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Item,
    Sale,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Item => f.write_str("item"),
            Entity::Sale => f.write_str("sale"),
        }
    }
}

/// The four failure categories an operation can surface to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed input; the caller must correct it.
    Validation,
    /// The referenced entity does not exist.
    NotFound,
    /// A business rule rejected the operation.
    Conflict,
    /// Persistence failed.
    Storage,
}

impl ErrorKind {
    /// Status label used in the response envelope.
    pub fn category(self) -> &'static str {
        match self {
            ErrorKind::Validation => "invalid",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "rejected",
            ErrorKind::Storage => "error",
        }
    }
}

/// Error returned by every engine operation.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{entity} not found (id {id})")]
    NotFound { entity: Entity, id: i32 },

    /// The item exists but has no stock left to sell.
    #[error("insufficient quantity for item {item_id}")]
    InsufficientQuantity { item_id: i32 },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl EngineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn item_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: Entity::Item,
            id,
        }
    }

    pub fn sale_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: Entity::Sale,
            id,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Validation(_) => ErrorKind::Validation,
            EngineError::NotFound { .. } => ErrorKind::NotFound,
            EngineError::InsufficientQuantity { .. } => ErrorKind::Conflict,
            EngineError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// `true` for business rejections (REJECTED), `false` for input or system faults.
    pub fn is_rejection(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound | ErrorKind::Conflict)
    }

    /// Short, stable reason string for rejections and failures.
    pub fn reason(&self) -> String {
        match self {
            EngineError::Validation(msg) => msg.clone(),
            EngineError::NotFound { entity, .. } => format!("{} not found", entity),
            EngineError::InsufficientQuantity { .. } => "insufficient quantity".to_string(),
            EngineError::Storage(_) => "storage failure".to_string(),
        }
    }
}

impl ResponseError for EngineError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Storage details stay in the log; the client only sees the category
        let message = match self {
            EngineError::Storage(e) => {
                tracing::error!(error = %e, "storage failure while handling request");
                "Internal storage error, please retry later.".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code())
            .json(GenericResponse::bare(self.kind().category(), message))
    }
}
