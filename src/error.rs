use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::{
    ERR_FILE_TOO_LARGE, ERR_INVALID_CREDENTIALS, ERR_INVALID_GAME_ID, ERR_ONLY_IMAGES,
};

/// Why a login attempt was rejected.
///
/// Both cases produce the same response; the distinction only reaches the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    UnknownEmail,
    WrongPassword,
}

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::error::EncodeError),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bincode::error::DecodeError),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token signing error: {0}")]
    TokenSigning(String),

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid credentials ({0:?})")]
    InvalidCredentials(LoginFailure),

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Game not found")]
    GameNotFound,

    #[error("Invalid game id")]
    InvalidGameId,

    #[error("Game already in library")]
    AlreadyInLibrary,

    #[error("Only images are allowed")]
    UnsupportedImageType,

    #[error("File exceeds size limit")]
    ImageTooLarge,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    fn internal(&self) -> bool {
        matches!(
            self,
            AppError::Database(_)
                | AppError::Transaction(_)
                | AppError::Table(_)
                | AppError::Storage(_)
                | AppError::Commit(_)
                | AppError::Serialization(_)
                | AppError::Deserialization(_)
                | AppError::TaskJoin(_)
                | AppError::Io(_)
                | AppError::PasswordHash(_)
                | AppError::TokenSigning(_)
        )
    }

    /// Status code and client-facing message for this error
    pub fn status_and_message(&self) -> (StatusCode, &str) {
        if self.internal() {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }

        match self {
            AppError::UserAlreadyExists => (StatusCode::BAD_REQUEST, "User already exists"),
            AppError::InvalidCredentials(_) => (StatusCode::BAD_REQUEST, ERR_INVALID_CREDENTIALS),
            AppError::MissingToken => (StatusCode::UNAUTHORIZED, "Access denied"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found"),
            AppError::GameNotFound => (StatusCode::NOT_FOUND, "Game not found"),
            AppError::InvalidGameId => (StatusCode::BAD_REQUEST, ERR_INVALID_GAME_ID),
            AppError::AlreadyInLibrary => (StatusCode::BAD_REQUEST, "Game already in library"),
            AppError::UnsupportedImageType => (StatusCode::BAD_REQUEST, ERR_ONLY_IMAGES),
            AppError::ImageTooLarge => (StatusCode::BAD_REQUEST, ERR_FILE_TOO_LARGE),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        }
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            e if e.internal() => tracing::error!("{}", e),
            AppError::InvalidCredentials(reason) => {
                tracing::warn!("Rejected login: {:?}", reason)
            }
            AppError::MissingToken | AppError::InvalidToken => {
                tracing::warn!("Rejected request: {}", self)
            }
            _ => tracing::debug!("Request failed: {}", self),
        }

        let (status, message) = self.status_and_message();
        let body = Json(json!({
            "message": message
        }));

        (status, body).into_response()
    }
}

/// Malformed JSON bodies are client errors like any other validation failure
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
