//! serve サブコマンド
//!
//! 直近のチェック結果を返すステータスサーバーを起動します。

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use crate::config::{ServerConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_RESULT_FILE};
use crate::store::FileResultStore;
use crate::AppState;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = DEFAULT_HOST, env = "HOST")]
    pub host: String,

    /// Result record written by `check`
    #[arg(long, default_value = DEFAULT_RESULT_FILE, env = "RESULT_FILE")]
    pub result_file: PathBuf,
}

impl ServeArgs {
    /// Resolve the server configuration.
    pub fn to_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            result_file: self.result_file.clone(),
        }
    }
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs) -> anyhow::Result<()> {
    let config = args.to_config();
    let state = AppState {
        store: Arc::new(FileResultStore::new(&config.result_file)),
    };

    crate::server::run(state, &config.bind_addr()).await
}
