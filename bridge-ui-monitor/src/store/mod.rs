//! チェック結果ストア
//!
//! チェッカー（書き込み専用）とステータスサーバー（読み取り専用）の間で
//! 直近のチェック結果を受け渡す。履歴は保持せず、保存のたびに上書きする。

use async_trait::async_trait;

use crate::common::error::StoreError;
use crate::types::CheckResult;

pub mod file;
pub mod memory;

pub use file::FileResultStore;
pub use memory::MemoryResultStore;

/// 直近のチェック結果を保存・取得するストア
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// 結果を保存（既存レコードは完全に置き換える）
    async fn save(&self, result: &CheckResult) -> Result<(), StoreError>;
    /// 直近の結果を取得
    async fn load(&self) -> Result<CheckResult, StoreError>;
}
