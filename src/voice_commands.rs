use crate::catalog::{Task, TaskCatalog};
use crate::distance::{command_distance, CommandDistance};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 没有精确匹配时，按距离挑选候选的方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// 距离最小者胜出
    #[default]
    Nearest,
    /// 距离最大者胜出（兼容旧版匹配规则）
    Farthest,
}

impl SelectionPolicy {
    /// candidate 是否严格优于 current
    fn prefers(self, candidate: u32, current: u32) -> bool {
        match self {
            SelectionPolicy::Nearest => candidate < current,
            SelectionPolicy::Farthest => candidate > current,
        }
    }
}

/// 匹配过程中的候选别名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasCandidate<'a> {
    pub alias: &'a str,
    pub task: &'a Task,
    pub distance: CommandDistance,
    pub exact: bool,
}

/// 匹配结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult<'a> {
    /// 匹配到任务
    Matched(AliasCandidate<'a>),
    /// 没有可比较的别名
    NoMatch,
}

impl<'a> MatchResult<'a> {
    pub fn task(&self) -> Option<&'a Task> {
        match self {
            MatchResult::Matched(candidate) => Some(candidate.task),
            MatchResult::NoMatch => None,
        }
    }
}

/// 语音指令匹配器
pub struct VoiceCommandMatcher {
    catalog: Arc<TaskCatalog>,
    policy: SelectionPolicy,
    /// 超过该距离的候选直接丢弃（精确匹配除外）
    max_distance: Option<u32>,
}

impl VoiceCommandMatcher {
    pub fn new(catalog: Arc<TaskCatalog>, policy: SelectionPolicy) -> Self {
        Self {
            catalog,
            policy,
            max_distance: None,
        }
    }

    pub fn with_max_distance(mut self, max_distance: Option<u32>) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn catalog(&self) -> &TaskCatalog {
        &self.catalog
    }

    /// 扫描全部别名，选出最佳候选
    pub fn match_command(&self, command: &str) -> MatchResult<'_> {
        let command = command.trim();
        let mut best: Option<AliasCandidate<'_>> = None;

        for task in self.catalog.tasks() {
            for alias in &task.aliases {
                let candidate = AliasCandidate {
                    alias,
                    task,
                    distance: command_distance(alias, command),
                    exact: !command.is_empty() && alias == command,
                };
                if self.should_replace(best.as_ref(), &candidate) {
                    best = Some(candidate);
                }
            }
        }

        match best {
            Some(candidate) => {
                log::info!(
                    "匹配到任务 '{}'（别名 '{}'，距离 {:?}）",
                    candidate.task.description,
                    candidate.alias,
                    candidate.distance
                );
                MatchResult::Matched(candidate)
            }
            None => MatchResult::NoMatch,
        }
    }

    fn should_replace(&self, best: Option<&AliasCandidate<'_>>, candidate: &AliasCandidate<'_>) -> bool {
        if candidate.exact {
            return true;
        }
        let Some(score) = candidate.distance.score() else {
            return false;
        };
        if self.max_distance.is_some_and(|max| score > max) {
            return false;
        }
        match best {
            None => true,
            Some(current) if current.exact => false,
            Some(current) => match current.distance.score() {
                Some(current_score) => self.policy.prefers(score, current_score),
                None => true,
            },
        }
    }
}
