//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `CheckFailure` の `Display` は結果レコードの `error` フィールドにそのまま
//! 書き込まれるため、文言は監視側との契約として固定されている。

use std::path::PathBuf;

use thiserror::Error;

use crate::health::scrape::BridgeAddress;

/// Which document a check step was looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The UI's main HTML page
    MainPage,
    /// The bundled React script
    ReactScript,
}

impl Stage {
    /// Prefix used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::MainPage => "main page",
            Stage::ReactScript => "react script",
        }
    }

    // The script fetch has always reported "url returned not-OK"; monitors grep for it.
    fn status_prefix(&self) -> &'static str {
        match self {
            Stage::MainPage => "",
            Stage::ReactScript => "url ",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Reason a single check run failed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckFailure {
    /// DNS / connection / TLS error, or the body could not be read
    #[error("{stage}: could not open url: {reason}")]
    Transport {
        /// 対象ドキュメント
        stage: Stage,
        /// トランスポートエラーの内容
        reason: String,
    },

    /// Status code other than 200
    #[error("{}: {}returned not-OK statusCode: {}", .stage, .stage.status_prefix(), .status)]
    UnexpectedStatus {
        /// 対象ドキュメント
        stage: Stage,
        /// 受信したステータスコード
        status: u16,
    },

    /// `Server` header missing or not `cloudflare`
    #[error(
        "{}: unexpected value of \"Server\" header - expecting \"cloudflare\", but got: {}",
        .stage,
        .actual.as_deref().unwrap_or("undefined")
    )]
    UnexpectedServerHeader {
        /// 対象ドキュメント
        stage: Stage,
        /// 受信したヘッダー値（無い場合は None）
        actual: Option<String>,
    },

    /// Main page does not link the bundle where expected
    #[error("main page: unexpected page structure - could not find link to react script")]
    MissingScriptLink,

    /// Bundle lacks one of the address assignments
    #[error("react script: unexpected page structure - could not find {0} assignment")]
    MissingAssignment(BridgeAddress),

    /// Address in the bundle differs from the configured one
    #[error("react script: incorrect {address} - expecting {expected}, but got: {actual}")]
    AddressMismatch {
        /// どちらのアドレスか
        address: BridgeAddress,
        /// 設定値
        expected: String,
        /// スクリプト内の値
        actual: String,
    },
}

/// Result store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record has been written yet
    #[error("Result record not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading or writing the record failed
    #[error("Result store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored record is not valid JSON of the expected shape
    #[error("Malformed result record: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The record could not be encoded
    #[error("Failed to serialize result record: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Checker construction errors
#[derive(Debug, Error)]
pub enum CheckerError {
    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
