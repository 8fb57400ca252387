//! チェック実行の排他制御
//!
//! 外部スケジューラーが前回の実行と重なってチェッカーを起動した場合に、
//! 2つの実行が同じ結果レコードを書き合わないようにするファイルロック。
//!
//! - クロスプラットフォームのアドバイザリロック（fs2）
//! - ロックファイルにJSON形式でPID・開始時刻を記録
//! - プロセスが異常終了した場合はOSがロックを解放する

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// ロックファイルに保存される実行情報
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LockInfo {
    /// チェッカープロセスのPID
    pub pid: u32,
    /// 実行開始時刻（UTC）
    pub started_at: DateTime<Utc>,
}

/// ロック操作に関するエラー型
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    /// 別のチェックが実行中
    #[error("Another check run is in progress (PID: {pid}, started: {started_at})")]
    AlreadyRunning {
        /// 実行中プロセスのPID
        pid: u32,
        /// 開始時刻
        started_at: DateTime<Utc>,
    },

    /// ロックは保持されているが内容を読み取れない
    #[error("Another check run is in progress (lock file {} is held)", .0.display())]
    Contended(PathBuf),

    /// ロック取得に失敗
    #[error("Failed to acquire lock: {0}")]
    AcquireFailed(#[source] std::io::Error),

    /// ロックディレクトリの作成に失敗
    #[error("Failed to create lock directory: {0}")]
    DirectoryCreationFailed(#[source] std::io::Error),
}

/// ロックファイルからロック情報を読み取る
///
/// ファイルが存在しない場合は `Ok(None)`、内容が空または不正な場合も `Ok(None)` を返す。
pub fn read_lock_info(path: &Path) -> std::io::Result<Option<LockInfo>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    Ok(serde_json::from_str(&content).ok())
}

/// チェック実行中に保持するファイルロック
///
/// RAIIパターンでロック解除を保証します。
pub struct RunLock {
    lock_file: Option<File>,
    lock_path: PathBuf,
    info: LockInfo,
}

impl std::fmt::Debug for RunLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunLock")
            .field("lock_path", &self.lock_path)
            .field("info", &self.info)
            .finish()
    }
}

impl RunLock {
    /// ロックを取得する（非ブロッキング）
    ///
    /// # Returns
    ///
    /// - `Ok(RunLock)`: ロック取得に成功した場合
    /// - `Err(LockError::AlreadyRunning)` / `Err(LockError::Contended)`: 別の実行が保持中
    /// - `Err(LockError::AcquireFailed)`: ロック取得に失敗した場合
    /// - `Err(LockError::DirectoryCreationFailed)`: ディレクトリ作成に失敗した場合
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self, LockError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(LockError::DirectoryCreationFailed)?;
        }

        // 保持者の情報を消さないよう truncate せずに開く
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(LockError::AcquireFailed)?;

        if let Err(e) = file.try_lock_exclusive() {
            if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() {
                let mut content = String::new();
                let holder = file
                    .read_to_string(&mut content)
                    .ok()
                    .and_then(|_| serde_json::from_str::<LockInfo>(&content).ok());
                return Err(match holder {
                    Some(info) => LockError::AlreadyRunning {
                        pid: info.pid,
                        started_at: info.started_at,
                    },
                    None => LockError::Contended(path),
                });
            }
            return Err(LockError::AcquireFailed(e));
        }

        let info = LockInfo {
            pid: std::process::id(),
            started_at: Utc::now(),
        };

        let json = serde_json::to_string_pretty(&info)
            .map_err(|e| LockError::AcquireFailed(std::io::Error::other(e)))?;
        file.set_len(0).map_err(LockError::AcquireFailed)?;
        file.seek(SeekFrom::Start(0))
            .map_err(LockError::AcquireFailed)?;
        file.write_all(json.as_bytes())
            .map_err(LockError::AcquireFailed)?;
        file.flush().map_err(LockError::AcquireFailed)?;

        debug!(path = %path.display(), pid = info.pid, "Run lock acquired");

        Ok(Self {
            lock_file: Some(file),
            lock_path: path,
            info,
        })
    }

    /// ロック情報への参照を取得
    pub fn info(&self) -> &LockInfo {
        &self.info
    }

    /// ロックを明示的に解除する
    pub fn release(mut self) -> std::io::Result<()> {
        self.release_internal()
    }

    // The file stays on disk: unlinking it would let a waiter that already
    // opened the old inode lock it while a newcomer locks a fresh file.
    fn release_internal(&mut self) -> std::io::Result<()> {
        if let Some(file) = self.lock_file.take() {
            file.set_len(0)?;
            file.unlock()?;
            debug!(path = %self.lock_path.display(), "Run lock released");
        }
        Ok(())
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = self.release_internal() {
            error!("Failed to release run lock on drop: {}", e);
        }
    }
}
