//! ステータスAPI
//!
//! 直近のチェック結果を `GET /` で公開する

pub mod error;
pub mod status;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// ステータスサーバーのルーターを構築
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(status::get_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
