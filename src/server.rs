use crate::commands::{self, AppState};
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(commands::health))
        .route("/remote", post(commands::remote))
        .with_state(state)
}

/// HTTP 服务，drop 时自动停止
pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Server {
    pub async fn start(state: Arc<AppState>, bind: &str) -> Result<Self, String> {
        let listener = TcpListener::bind(bind)
            .await
            .map_err(|e| format!("监听 {bind} 失败: {e}"))?;
        let addr = listener
            .local_addr()
            .map_err(|e| format!("获取监听地址失败: {e}"))?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = router(state);

        let handle = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = result {
                log::error!("HTTP 服务异常退出: {e}");
            }
        });

        log::info!("HTTP 服务已启动: {addr}");
        Ok(Self {
            addr,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// 通知服务停止，不等待
    pub fn shutdown(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.send(());
        }
    }

    /// 停止服务并等待正在处理的请求完成
    pub async fn stop(mut self) -> Result<(), String> {
        self.shutdown();
        match self.handle.take() {
            Some(handle) => handle.await.map_err(|e| format!("等待 HTTP 服务退出失败: {e}")),
            None => Ok(()),
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.shutdown();
    }
}
