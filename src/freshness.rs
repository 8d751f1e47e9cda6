use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use std::time::Duration;

/// 默认时间格式，如 "October 18, 2026 at 03:04PM"
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%B %d, %Y at %I:%M%p";

/// 默认容忍窗口（秒）
pub const DEFAULT_TOLERANCE_SECS: u64 = 120;

/// 时间戳检查结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    /// 与当前时间相差过大，skew_secs 为正表示来自过去
    Stale { skew_secs: i64 },
    /// 无法解析
    Malformed(String),
}

impl Freshness {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Freshness::Fresh)
    }
}

/// 指令新鲜度检查，防止重放过期或时钟偏差过大的指令
#[derive(Debug, Clone)]
pub struct FreshnessGate {
    tolerance: Duration,
    format: String,
    /// 时间戳按本地时区解释，否则按 UTC
    local_time: bool,
}

impl Default for FreshnessGate {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TOLERANCE_SECS), DEFAULT_TIMESTAMP_FORMAT)
    }
}

impl FreshnessGate {
    pub fn new(tolerance: Duration, format: impl Into<String>) -> Self {
        Self {
            tolerance,
            format: format.into(),
            local_time: false,
        }
    }

    pub fn with_local_time(mut self, local_time: bool) -> Self {
        self.local_time = local_time;
        self
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// 按当前格式输出时间戳
    pub fn format_timestamp(&self, time: DateTime<Utc>) -> String {
        if self.local_time {
            time.with_timezone(&Local).format(&self.format).to_string()
        } else {
            time.format(&self.format).to_string()
        }
    }

    fn parse(&self, created_at: &str) -> Result<DateTime<Utc>, String> {
        let naive = NaiveDateTime::parse_from_str(created_at.trim(), &self.format)
            .map_err(|e| format!("解析时间 '{created_at}' 失败: {e}"))?;
        if self.local_time {
            Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|t| t.with_timezone(&Utc))
                .ok_or_else(|| format!("本地时间 '{created_at}' 不存在"))
        } else {
            Ok(Utc.from_utc_datetime(&naive))
        }
    }

    pub fn check(&self, created_at: &str, now: DateTime<Utc>) -> Freshness {
        let created = match self.parse(created_at) {
            Ok(t) => t,
            Err(e) => {
                log::debug!("{e}");
                return Freshness::Malformed(e);
            }
        };
        let skew_secs = now.signed_duration_since(created).num_seconds();
        if skew_secs.unsigned_abs() < self.tolerance.as_secs() {
            Freshness::Fresh
        } else {
            Freshness::Stale { skew_secs }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    const CREATED: &str = "October 18, 2026 at 03:04PM";

    fn created_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 15, 4, 0).unwrap()
    }

    #[test]
    fn parses_default_format() {
        let gate = FreshnessGate::default();
        assert_eq!(gate.parse(CREATED).unwrap(), created_time());
        assert_eq!(
            gate.parse("January 02, 2006 at 03:04AM").unwrap(),
            Utc.with_ymd_and_hms(2006, 1, 2, 3, 4, 0).unwrap()
        );
    }

    #[test]
    fn timestamp_equal_to_now_is_fresh() {
        let gate = FreshnessGate::default();
        assert_eq!(gate.check(CREATED, created_time()), Freshness::Fresh);
    }

    #[test]
    fn timestamp_121_seconds_old_is_stale() {
        let gate = FreshnessGate::default();
        let now = created_time() + TimeDelta::seconds(121);
        assert_eq!(gate.check(CREATED, now), Freshness::Stale { skew_secs: 121 });
    }

    #[test]
    fn timestamp_119_seconds_ahead_is_fresh() {
        let gate = FreshnessGate::default();
        let now = created_time() - TimeDelta::seconds(119);
        assert!(gate.check(CREATED, now).is_fresh());
    }

    #[test]
    fn tolerance_bound_is_exclusive() {
        let gate = FreshnessGate::default();
        assert!(!gate.check(CREATED, created_time() + TimeDelta::seconds(120)).is_fresh());
        assert!(!gate.check(CREATED, created_time() - TimeDelta::seconds(120)).is_fresh());
        assert!(gate.check(CREATED, created_time() + TimeDelta::seconds(119)).is_fresh());
    }

    #[test]
    fn unparsable_timestamp_is_malformed() {
        let gate = FreshnessGate::default();
        for input in ["", "yesterday", "2026-10-18T15:04:00Z", "October 40, 2026 at 03:04PM"] {
            assert!(
                matches!(gate.check(input, created_time()), Freshness::Malformed(_)),
                "{input}"
            );
        }
    }

    #[test]
    fn custom_tolerance_and_format() {
        let gate = FreshnessGate::new(Duration::from_secs(10), "%Y-%m-%d %H:%M:%S");
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 9).unwrap();
        assert!(gate.check("2026-10-18 12:00:00", now).is_fresh());
        assert!(!gate.check("2026-10-18 11:59:59", now).is_fresh());
    }

    #[test]
    fn formatted_now_is_fresh() {
        let gate = FreshnessGate::default();
        let now = Utc::now();
        assert!(gate.check(&gate.format_timestamp(now), now).is_fresh());
    }
}
