//! ブリッジUIヘルスチェック
//!
//! 監視対象UIのメインページとバンドルスクリプトを順に取得し、スクリプトに
//! 埋め込まれた2つのブリッジアドレスが設定値と一致するかを検証する。
//! 結果は1回の実行につき1件だけ `ResultStore` に書き込まれる。

pub mod bridge_ui_checker;
pub mod scrape;

pub use bridge_ui_checker::{run_with_watchdog, BridgeUiChecker, RunOutcome};
