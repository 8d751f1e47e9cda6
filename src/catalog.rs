use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 可被语音指令触发的任务
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    /// 触发短语，如 "turn on the lights"
    #[serde(default)]
    pub aliases: Vec<String>,
    pub executable: String,
    #[serde(default)]
    pub arguments: Vec<String>,
}

/// 任务目录，启动时加载，之后只读
#[derive(Debug, Clone, Default)]
pub struct TaskCatalog {
    tasks: Vec<Task>,
}

impl TaskCatalog {
    pub fn new(tasks: Vec<Task>) -> Self {
        for task in tasks.iter().filter(|t| t.aliases.is_empty()) {
            log::warn!("任务 '{}' 没有别名，永远不会被匹配", task.description);
        }
        Self { tasks }
    }

    /// 从 JSON 文件加载任务列表
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("读取任务文件 {} 失败: {e}", path.display()))?;
        let tasks: Vec<Task> = serde_json::from_str(&content)
            .map_err(|e| format!("解析任务文件 {} 失败: {e}", path.display()))?;
        log::info!("已加载 {} 个任务: {}", tasks.len(), path.display());
        Ok(Self::new(tasks))
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
