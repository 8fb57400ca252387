//! インメモリ結果ストア（テスト・組み込み用）

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ResultStore;
use crate::common::error::StoreError;
use crate::types::CheckResult;

/// プロセス内に結果を保持するストア
#[derive(Debug, Clone, Default)]
pub struct MemoryResultStore {
    inner: Arc<RwLock<Option<CheckResult>>>,
}

impl MemoryResultStore {
    /// 空のストアを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存済みの結果（無ければ None）
    pub async fn snapshot(&self) -> Option<CheckResult> {
        self.inner.read().await.clone()
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn save(&self, result: &CheckResult) -> Result<(), StoreError> {
        *self.inner.write().await = Some(result.clone());
        Ok(())
    }

    async fn load(&self) -> Result<CheckResult, StoreError> {
        self.inner
            .read()
            .await
            .clone()
            .ok_or_else(|| StoreError::NotFound("<memory>".into()))
    }
}
