//! チェック結果の型定義
//!
//! チェッカーが書き込み、ステータスサーバーが読み出す唯一の永続レコード

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 直近のチェック結果
///
/// `ok == false` のときに限り `error` が設定される。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// チェック完了時刻（成功・失敗を問わない）
    #[serde(with = "iso_millis")]
    pub completed_at: DateTime<Utc>,
    /// 全ステップ成功時のみ true
    pub ok: bool,
    /// 失敗理由
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    /// 成功結果を作成
    pub fn passed(completed_at: DateTime<Utc>) -> Self {
        Self {
            completed_at,
            ok: true,
            error: None,
        }
    }

    /// 失敗結果を作成
    pub fn failed(completed_at: DateTime<Utc>, error: impl Into<String>) -> Self {
        Self {
            completed_at,
            ok: false,
            error: Some(error.into()),
        }
    }
}

/// `GET /` のレスポンスボディ
///
/// 保存済みレコードに `timeDiff`（完了からの経過秒数）を加えたもの。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    /// 保存済みレコード
    #[serde(flatten)]
    pub result: CheckResult,
    /// 完了時刻からの経過秒数（切り捨て、時計のずれで負になり得る）
    #[serde(rename = "timeDiff")]
    pub time_diff: i64,
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
