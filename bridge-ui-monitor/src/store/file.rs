//! JSONファイルによる結果ストア

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::ResultStore;
use crate::common::error::StoreError;
use crate::types::CheckResult;

/// 単一のJSONファイルに結果を保存するストア
#[derive(Debug, Clone)]
pub struct FileResultStore {
    path: PathBuf,
}

impl FileResultStore {
    /// 指定パスのストアを作成
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// レコードファイルのパス
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl ResultStore for FileResultStore {
    async fn save(&self, result: &CheckResult) -> Result<(), StoreError> {
        let body = serde_json::to_vec(result).map_err(StoreError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        // rename is atomic on the same filesystem, so readers never see a partial record
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), ok = result.ok, "Result record written");
        Ok(())
    }

    async fn load(&self) -> Result<CheckResult, StoreError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        serde_json::from_slice(&content).map_err(StoreError::Malformed)
    }
}
