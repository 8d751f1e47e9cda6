pub mod catalog;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod distance;
pub mod freshness;
pub mod phonetic;
pub mod runner;
pub mod server;
pub mod voice_commands;

use catalog::TaskCatalog;
use commands::AppState;
use config::{load_config, AppConfig};
use dispatch::Dispatcher;
use freshness::FreshnessGate;
use runner::ProcessRunner;
use server::Server;
use std::sync::Arc;
use std::time::Duration;
use voice_commands::VoiceCommandMatcher;

/// 按配置组装共享状态，任务文件加载失败直接返回错误
pub fn build_state(config: &AppConfig) -> Result<AppState, String> {
    let catalog = Arc::new(TaskCatalog::load(&config.catalog.path)?);

    let matcher = VoiceCommandMatcher::new(catalog, config.matching.policy)
        .with_max_distance(config.matching.max_distance);
    let gate = FreshnessGate::new(
        Duration::from_secs(config.freshness.tolerance_secs),
        config.freshness.timestamp_format.clone(),
    )
    .with_local_time(config.freshness.local_time);
    let timeout = match config.execution.timeout_ms {
        0 => None,
        ms => Some(Duration::from_millis(ms)),
    };
    let runner = Arc::new(ProcessRunner::new(timeout));

    Ok(AppState {
        dispatcher: Dispatcher::new(matcher, gate, runner),
    })
}

pub fn run() -> Result<(), String> {
    env_logger::init();

    let config = load_config().map_err(|e| {
        log::error!("加载配置失败: {e}");
        e
    })?;
    log::info!("匹配策略: {:?}", config.matching.policy);

    let state = build_state(&config).map_err(|e| {
        log::error!("加载任务失败: {e}");
        e
    })?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("创建运行时失败: {e}"))?;

    rt.block_on(async {
        let server = Server::start(Arc::new(state), &config.server.bind).await?;
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("监听退出信号失败: {e}");
        }
        log::info!("正在停止 HTTP 服务");
        server.stop().await
    })
}
