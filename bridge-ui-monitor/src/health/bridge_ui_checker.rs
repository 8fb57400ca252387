//! ブリッジUIチェッカー
//!
//! 1回の実行で以下を順に検証し、最初の失敗で打ち切る:
//!
//! 1. メインページ: 200 OK かつ `Server: cloudflare`
//! 2. メインページ内のバンドルスクリプトへのリンク
//! 3. バンドルスクリプト: 200 OK かつ `Server: cloudflare`
//! 4. `HOME_BRIDGE_ADDRESS` / `FOREIGN_BRIDGE_ADDRESS` の代入
//! 5. 両アドレスが設定値と一致（大文字小文字を区別しない）

use crate::common::error::{CheckFailure, CheckerError, Stage, StoreError};
use crate::config::CheckerConfig;
use crate::health::scrape::{self, BridgeAddress};
use crate::store::ResultStore;
use crate::types::CheckResult;
use chrono::Utc;
use reqwest::{header, redirect, Client, StatusCode};
use tracing::{debug, error, info, warn};

/// 期待する `Server` ヘッダー値（trim・小文字化後）
const EXPECTED_SERVER_HEADER: &str = "cloudflare";

/// Outcome of one watchdog-guarded run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// 全チェック成功（結果を記録済み）
    Passed,
    /// いずれかのチェックが失敗（結果を記録済み）
    Failed,
    /// 制限時間内に完了しなかった（結果は記録しない）
    TimedOut,
}

impl RunOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Passed => 0,
            RunOutcome::Failed | RunOutcome::TimedOut => 1,
        }
    }
}

/// `Server` ヘッダーが期待値か判定
fn server_header_matches(value: &str) -> bool {
    value.trim().to_lowercase() == EXPECTED_SERVER_HEADER
}

/// ブリッジUIチェッカー
///
/// 2回のGETは常に直列に行う（2回目のURLは1回目のレスポンスから決まる）。
#[derive(Debug, Clone)]
pub struct BridgeUiChecker {
    config: CheckerConfig,
    client: Client,
}

impl BridgeUiChecker {
    /// 新しいチェッカーを作成
    ///
    /// リダイレクトは追跡しない（3xxはステータス異常として扱う）。
    pub fn new(config: CheckerConfig) -> Result<Self, CheckerError> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { config, client })
    }

    /// チェッカー設定
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// 全ステップを実行し、最初の失敗を返す
    pub async fn check(&self) -> Result<(), CheckFailure> {
        let base_url = self.config.bridge_ui_url.as_str();

        debug!(url = %base_url, "Making request to bridge UI main page");
        let page = self.fetch(Stage::MainPage, base_url).await?;
        debug!(body = %page, "main page response body");

        let hash = scrape::extract_script_hash(&page).ok_or(CheckFailure::MissingScriptLink)?;
        let script_url = scrape::script_url(base_url, hash);

        debug!(url = %script_url, "Making request to react script");
        let script = self.fetch(Stage::ReactScript, &script_url).await?;
        debug!(body = %script, "react script response body");

        let home = scrape::extract_assignment(&script, BridgeAddress::Home)
            .ok_or(CheckFailure::MissingAssignment(BridgeAddress::Home))?;
        let foreign = scrape::extract_assignment(&script, BridgeAddress::Foreign)
            .ok_or(CheckFailure::MissingAssignment(BridgeAddress::Foreign))?;

        verify_address(BridgeAddress::Home, &self.config.home_bridge_address, home)?;
        verify_address(
            BridgeAddress::Foreign,
            &self.config.foreign_bridge_address,
            foreign,
        )?;

        Ok(())
    }

    /// チェックを実行し、結果を1件だけ保存する
    ///
    /// チェックの成否に関わらず `Ok` を返す。`Err` はストアへの書き込み失敗のみ。
    pub async fn check_and_record(
        &self,
        store: &dyn ResultStore,
    ) -> Result<CheckResult, StoreError> {
        let outcome = self.check().await;
        self.record(store, outcome).await
    }

    /// チェック結果をレコードに変換して保存する
    async fn record(
        &self,
        store: &dyn ResultStore,
        outcome: Result<(), CheckFailure>,
    ) -> Result<CheckResult, StoreError> {
        let result = match outcome {
            Ok(()) => {
                info!(url = %self.config.bridge_ui_url, "Bridge UI check passed");
                CheckResult::passed(Utc::now())
            }
            Err(failure) => {
                warn!(
                    url = %self.config.bridge_ui_url,
                    error = %failure,
                    "Bridge UI check failed"
                );
                CheckResult::failed(Utc::now(), failure.to_string())
            }
        };

        store.save(&result).await?;
        Ok(result)
    }

    /// 1ステージ分のGET（トランスポート・ステータス・Serverヘッダーを検証）
    async fn fetch(&self, stage: Stage, url: &str) -> Result<String, CheckFailure> {
        let transport = move |e: reqwest::Error| CheckFailure::Transport {
            stage,
            reason: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CheckFailure::UnexpectedStatus {
                stage,
                status: status.as_u16(),
            });
        }

        let server = response
            .headers()
            .get(header::SERVER)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
        if !server.as_deref().is_some_and(server_header_matches) {
            return Err(CheckFailure::UnexpectedServerHeader {
                stage,
                actual: server,
            });
        }

        response.text().await.map_err(transport)
    }
}

fn verify_address(
    address: BridgeAddress,
    expected: &str,
    actual: &str,
) -> Result<(), CheckFailure> {
    if scrape::addresses_match(expected, actual) {
        Ok(())
    } else {
        Err(CheckFailure::AddressMismatch {
            address,
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

/// 制限時間付きでチェックを実行する
///
/// 制限時間はネットワーク側のステップにのみ掛かる。超えた場合は実行中の
/// リクエストを破棄し、結果を記録せずに `RunOutcome::TimedOut` を返す
/// （前回のレコードはそのまま残る）。保存は制限時間の外で行うため、
/// 書き込み途中で打ち切られることはない。
pub async fn run_with_watchdog(
    checker: &BridgeUiChecker,
    store: &dyn ResultStore,
) -> Result<RunOutcome, StoreError> {
    let timeout = checker.config().timeout;

    let outcome = match tokio::time::timeout(timeout, checker.check()).await {
        Ok(outcome) => outcome,
        Err(_) => {
            error!(
                timeout_secs = timeout.as_secs(),
                "Check is taking too long to complete, giving up"
            );
            return Ok(RunOutcome::TimedOut);
        }
    };

    if checker.record(store, outcome).await?.ok {
        Ok(RunOutcome::Passed)
    } else {
        Ok(RunOutcome::Failed)
    }
}
