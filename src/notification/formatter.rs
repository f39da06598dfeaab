//! 记录格式化 - 固定的多行文本结构

use crate::alarm::record::NotificationRecord;

/// 时间格式
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 记录文本格式化器
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordFormatter;

impl RecordFormatter {
    /// 渲染为多行文本
    ///
    /// ```text
    /// [ERROR] payment
    /// app: billing
    /// host: 10.0.0.7
    /// time: 2024-01-02 03:04:05
    /// content: card declined
    /// trace: src/pay.rs:88:13
    /// cause: gateway timeout
    /// ```
    pub fn format(&self, record: &NotificationRecord) -> String {
        let mut lines = vec![
            format!("[{}] {}", record.level(), record.alarm_name()),
            format!("app: {}", record.app_name()),
            format!("host: {}", record.host().unwrap_or("unknown")),
            format!("time: {}", record.timestamp().format(TIME_FORMAT)),
            format!("content: {}", record.content()),
            format!("trace: {}", record.trace_stack()),
        ];

        if let Some(cause) = record.cause() {
            lines.push(format!("cause: {}", cause));
        }

        lines.join("\n")
    }

    /// 单行摘要，用于日志
    pub fn summary(&self, record: &NotificationRecord) -> String {
        format!(
            "[{}] {}: {}",
            record.level(),
            record.alarm_name(),
            truncate(record.content(), 120)
        )
    }
}

/// 按字符截断，避免切断 UTF-8 字符
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::level::Level;
    use crate::alarm::trace::{AlertCause, TraceFrame};
    use chrono::{Local, TimeZone};

    fn record(cause: Option<AlertCause>, host: Option<&str>) -> NotificationRecord {
        NotificationRecord::builder(Level::Error, "payment")
            .app_name("billing")
            .content("card declined")
            .host(host.map(str::to_string))
            .timestamp(Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
            .caller(TraceFrame::new("src/pay.rs", 88, 13))
            .cause(cause)
            .build()
            .unwrap()
    }

    #[test]
    fn test_format_full_record() {
        let cause = AlertCause::with_frames("gateway timeout", vec![TraceFrame::new("src/gw.rs", 5, 1)]);
        let text = RecordFormatter.format(&record(Some(cause), Some("10.0.0.7")));

        assert_eq!(
            text,
            "[ERROR] payment\n\
             app: billing\n\
             host: 10.0.0.7\n\
             time: 2024-01-02 03:04:05\n\
             content: card declined\n\
             trace: src/gw.rs:5:1\n\
             cause: gateway timeout"
        );
    }

    #[test]
    fn test_format_without_host_or_cause() {
        let text = RecordFormatter.format(&record(None, None));
        assert!(text.contains("host: unknown"));
        assert!(text.contains("trace: src/pay.rs:88:13"));
        assert!(!text.contains("cause:"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("告警告警告警告警", 5), "告警...");
    }
}
