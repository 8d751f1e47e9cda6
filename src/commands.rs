use crate::dispatch::{Dispatcher, RemoteCommand};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 应用共享状态，启动后只读
pub struct AppState {
    pub dispatcher: Dispatcher,
}

/// 对外只有两种结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    fn ok() -> (StatusCode, Json<Self>) {
        (
            StatusCode::OK,
            Json(Self {
                status: "OK".to_string(),
            }),
        )
    }

    fn not_found() -> (StatusCode, Json<Self>) {
        (
            StatusCode::NOT_FOUND,
            Json(Self {
                status: "Command Not Found".to_string(),
            }),
        )
    }
}

/// 接收远程指令
pub async fn remote(State(state): State<Arc<AppState>>, body: Bytes) -> (StatusCode, Json<StatusResponse>) {
    log::info!("收到请求: {}", String::from_utf8_lossy(&body));

    let command: RemoteCommand = match serde_json::from_slice(&body) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("解析请求失败: {e}");
            return StatusResponse::not_found();
        }
    };

    if state.dispatcher.dispatch(&command).is_admitted() {
        StatusResponse::ok()
    } else {
        StatusResponse::not_found()
    }
}

pub async fn health() -> &'static str {
    "ok"
}
