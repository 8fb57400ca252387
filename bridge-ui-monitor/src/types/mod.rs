//! 型定義モジュール
//!
//! チェッカーとステータスサーバーが共有する型

/// チェック結果レコード
pub mod check;

pub use check::{CheckResult, StatusResponse};
