//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use axum::{response::IntoResponse, Json};
use serde_json::json;

use crate::common::error::{CommonError, ReminderError};

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub ReminderError);

impl From<ReminderError> for AppError {
    fn from(err: ReminderError) -> Self {
        AppError(err)
    }
}

impl From<CommonError> for AppError {
    fn from(err: CommonError) -> Self {
        AppError(ReminderError::Common(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // 詳細はログのみに出し、クライアントには external_message() を返す
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, "Request rejected");
        }

        let payload = json!({
            "error": self.0.external_message()
        });

        (status, Json(payload)).into_response()
    }
}
