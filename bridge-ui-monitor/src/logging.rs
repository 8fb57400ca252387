//! ロギング初期化
//!
//! `tracing-subscriber` を `EnvFilter` 付きで初期化する。フィルタは
//! [`crate::config::log_level`] に従う。

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Call once per process.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_new(crate::config::log_level())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
}
