use std::{net::SocketAddr, sync::Arc};

use bridge_ui_monitor::store::ResultStore;
use bridge_ui_monitor::AppState;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

/// 実ポートにバインドしたステータスサーバー
#[allow(dead_code)]
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<anyhow::Result<()>>,
}

#[allow(dead_code)]
impl TestServer {
    /// サーバーがバインドしているアドレスを返す
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `GET /` のURL
    pub fn status_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// サーバーを停止し、バックグラウンドタスクの終了を待つ
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

/// 任意のストアでステータスサーバーを起動する
pub async fn spawn_status_server(store: Arc<dyn ResultStore>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();
    let state = AppState { store };

    let handle = tokio::spawn(bridge_ui_monitor::server::serve(listener, state, async {
        let _ = rx.await;
    }));

    TestServer {
        addr,
        shutdown: Some(tx),
        handle,
    }
}
