use crate::catalog::Task;
use std::process::Stdio;
use std::time::Duration;

/// 任务执行器，提交后立即返回，不回传结果
pub trait TaskRunner: Send + Sync {
    fn submit(&self, task: &Task);
}

/// 以外部进程方式执行任务
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    /// 超时后杀掉子进程，None 表示不限时
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl TaskRunner for ProcessRunner {
    fn submit(&self, task: &Task) {
        let task = task.clone();
        let timeout = self.timeout;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    run_and_log(&task, timeout).await;
                });
            }
            Err(_) => {
                // 不在 tokio 运行时内，开独立线程跑一个单线程运行时
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Builder::new_current_thread()
                        .enable_all()
                        .build()
                    {
                        Ok(rt) => rt,
                        Err(e) => {
                            log::error!("创建运行时失败，任务 '{}' 未执行: {e}", task.description);
                            return;
                        }
                    };
                    rt.block_on(run_and_log(&task, timeout));
                });
            }
        }
    }
}

async fn run_and_log(task: &Task, timeout: Option<Duration>) {
    if let Err(e) = execute_task(task, timeout).await {
        log::error!("执行任务 '{}' 失败: {e}", task.description);
    }
}

/// 运行任务对应的程序并丢弃输出
pub async fn execute_task(task: &Task, timeout: Option<Duration>) -> Result<(), String> {
    let mut child = tokio::process::Command::new(&task.executable)
        .args(&task.arguments)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| format!("启动 {} 失败: {e}", task.executable))?;

    let status = match timeout {
        Some(limit) => tokio::time::timeout(limit, child.wait())
            .await
            .map_err(|_| format!("{} 超时（{}ms），已终止", task.executable, limit.as_millis()))?,
        None => child.wait().await,
    }
    .map_err(|e| format!("等待 {} 结束失败: {e}", task.executable))?;

    if status.success() {
        log::info!("任务 '{}' 执行完成", task.description);
        Ok(())
    } else {
        Err(format!("{} 退出状态 {status}", task.executable))
    }
}
