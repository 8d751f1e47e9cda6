use crate::freshness::{Freshness, FreshnessGate};
use crate::runner::TaskRunner;
use crate::voice_commands::{MatchResult, VoiceCommandMatcher};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 远程发来的指令
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCommand {
    /// 转写后的指令文本
    #[serde(default)]
    pub action: String,
    /// 指令创建时间
    #[serde(default)]
    pub created_at: String,
}

/// 拒绝原因，只用于日志，不对外区分
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    NoMatch,
    Stale { skew_secs: i64 },
    MalformedTimestamp(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// 已提交执行
    Admitted { description: String },
    Rejected(RejectReason),
}

impl DispatchOutcome {
    pub fn is_admitted(&self) -> bool {
        matches!(self, DispatchOutcome::Admitted { .. })
    }
}

/// 匹配 + 新鲜度检查 + 提交执行
pub struct Dispatcher {
    matcher: VoiceCommandMatcher,
    gate: FreshnessGate,
    runner: Arc<dyn TaskRunner>,
}

impl Dispatcher {
    pub fn new(matcher: VoiceCommandMatcher, gate: FreshnessGate, runner: Arc<dyn TaskRunner>) -> Self {
        Self {
            matcher,
            gate,
            runner,
        }
    }

    pub fn matcher(&self) -> &VoiceCommandMatcher {
        &self.matcher
    }

    pub fn gate(&self) -> &FreshnessGate {
        &self.gate
    }

    pub fn dispatch(&self, command: &RemoteCommand) -> DispatchOutcome {
        self.dispatch_at(command, Utc::now())
    }

    pub fn dispatch_at(&self, command: &RemoteCommand, now: DateTime<Utc>) -> DispatchOutcome {
        let outcome = self.decide(command, now);
        match &outcome {
            DispatchOutcome::Admitted { description } => {
                log::info!("收到指令: '{}'，执行任务 '{description}'", command.action);
            }
            DispatchOutcome::Rejected(reason) => {
                log::warn!("拒绝指令 '{}': {reason:?}", command.action);
            }
        }
        outcome
    }

    fn decide(&self, command: &RemoteCommand, now: DateTime<Utc>) -> DispatchOutcome {
        let task = match self.matcher.match_command(&command.action) {
            MatchResult::Matched(candidate) => candidate.task,
            MatchResult::NoMatch => return DispatchOutcome::Rejected(RejectReason::NoMatch),
        };

        match self.gate.check(&command.created_at, now) {
            Freshness::Fresh => {}
            Freshness::Stale { skew_secs } => {
                return DispatchOutcome::Rejected(RejectReason::Stale { skew_secs });
            }
            Freshness::Malformed(e) => {
                return DispatchOutcome::Rejected(RejectReason::MalformedTimestamp(e));
            }
        }

        self.runner.submit(task);
        DispatchOutcome::Admitted {
            description: task.description.clone(),
        }
    }
}
