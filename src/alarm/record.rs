//! 通知记录 - 每次告警构建一次，之后只读

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::level::Level;
use super::trace::{trace_stack, AlertCause, TraceFrame};
use crate::error::RecordError;

/// 通知记录
///
/// 构建后不可变；分发器以 `Arc` 共享给所有渠道。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    alarm_name: String,
    app_name: String,
    level: Level,
    content: String,
    timestamp: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cause: Option<AlertCause>,
    trace_stack: String,
}

impl NotificationRecord {
    /// 创建构建器，调用位置作为默认 trace 帧
    #[track_caller]
    pub fn builder(level: Level, alarm_name: impl Into<String>) -> NotificationRecordBuilder {
        NotificationRecordBuilder::new(level, alarm_name, TraceFrame::caller())
    }

    pub fn alarm_name(&self) -> &str {
        &self.alarm_name
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn cause(&self) -> Option<&AlertCause> {
        self.cause.as_ref()
    }

    pub fn trace_stack(&self) -> &str {
        &self.trace_stack
    }
}

/// 通知记录构建器
#[derive(Debug, Clone)]
pub struct NotificationRecordBuilder {
    level: Level,
    alarm_name: String,
    app_name: String,
    content: String,
    timestamp: Option<DateTime<Local>>,
    host: Option<String>,
    cause: Option<AlertCause>,
    caller: TraceFrame,
}

impl NotificationRecordBuilder {
    pub(crate) fn new(level: Level, alarm_name: impl Into<String>, caller: TraceFrame) -> Self {
        Self {
            level,
            alarm_name: alarm_name.into(),
            app_name: String::new(),
            content: String::new(),
            timestamp: None,
            host: None,
            cause: None,
            caller,
        }
    }

    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// 固定时间戳（默认在 build 时取当前时间）
    pub fn timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn host(mut self, host: Option<String>) -> Self {
        self.host = host;
        self
    }

    pub fn cause(mut self, cause: Option<AlertCause>) -> Self {
        self.cause = cause;
        self
    }

    /// 覆盖调用方栈帧
    pub fn caller(mut self, caller: TraceFrame) -> Self {
        self.caller = caller;
        self
    }

    pub fn build(self) -> Result<NotificationRecord, RecordError> {
        if self.alarm_name.trim().is_empty() {
            return Err(RecordError::EmptyAlarmName);
        }

        let trace_stack = trace_stack(self.cause.as_ref(), &self.caller);

        Ok(NotificationRecord {
            alarm_name: self.alarm_name,
            app_name: self.app_name,
            level: self.level,
            content: self.content,
            timestamp: self.timestamp.unwrap_or_else(Local::now),
            host: self.host,
            cause: self.cause,
            trace_stack,
        })
    }
}
