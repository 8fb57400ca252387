//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::common::error::StoreError;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub StoreError);

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError(err)
    }
}

impl AppError {
    /// Message safe to return to HTTP clients (no filesystem paths).
    pub fn external_message(&self) -> &'static str {
        match &self.0 {
            StoreError::NotFound(_) => "No check result recorded yet",
            StoreError::Malformed(_) => "Stored check result is malformed",
            StoreError::Io(_) | StoreError::Serialize(_) => "Failed to read check result",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // 詳細はサーバーログのみに出力する
        tracing::error!(error = %self.0, "Failed to serve check result");

        let payload = json!({
            "error": self.external_message()
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
    }
}
