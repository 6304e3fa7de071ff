//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! 管理画面のバリデーション結果（不正なドメイン、重複登録）はエラーではなく
//! `registry::AddClientOutcome` として扱い、ここには含めない。

use axum::http::StatusCode;
use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// payment reminder error type
#[derive(Debug, Error)]
pub enum ReminderError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Password hash error
    #[error("Password hash error: {0}")]
    PasswordHash(String),
}

impl ReminderError {
    /// Returns a safe error message for external clients.
    ///
    /// Full error details (SQL errors, file paths) are only written to the
    /// server logs via the `Display` implementation.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Common(CommonError::Validation(_)) => "Invalid request",
            Self::Common(_) => "Request error",
            Self::Database(_) => "Database error",
            Self::PasswordHash(_) => "Authentication error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Common(CommonError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Common(CommonError::Config(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Common(CommonError::Serialization(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for ReminderError {
    fn from(err: serde_json::Error) -> Self {
        ReminderError::Common(CommonError::Serialization(err))
    }
}

/// Result type alias (payment reminder)
pub type ReminderResult<T> = Result<T, ReminderError>;
