//! Bridge UI Monitor
//!
//! ブリッジ監視UIが期待どおりのコントラクトアドレスを配信しているかを
//! 定期的に検証するチェッカーと、直近の結果を返すステータスサーバー

#![warn(missing_docs)]

/// 共通型定義（エラー型）
pub mod common;

/// ステータスAPIハンドラー
pub mod api;

/// ブリッジUIヘルスチェック
pub mod health;

/// チェック結果ストア
pub mod store;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// CLIインターフェース
pub mod cli;

/// 型定義
pub mod types;

/// チェック実行の排他制御（重複実行防止）
pub mod lock;

/// ステータスサーバー起動
pub mod server;

use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// 結果ストア（読み取り専用で使用）
    pub store: Arc<dyn store::ResultStore>,
}
