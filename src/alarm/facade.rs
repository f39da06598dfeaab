//! 告警门面 - 按严重级别发送告警
//!
//! 每个级别有两个入口：`info(name, content)` 与 `info_with_cause(name, content, cause)`。
//! 所有入口只构建记录并提交给分发器，立即返回，失败只记录日志。
//! 本机地址在构建时解析一次并缓存，告警路径上没有 DNS 查询。
//!
//! 调用位置依赖 `#[track_caller]`：从公开入口到 `alarm()` 的每一层都必须标注，
//! 否则 trace_stack 会指向本模块内部而不是业务调用方。

use tracing::error;

use super::builder::AlarmBuilder;
use super::level::Level;
use super::record::NotificationRecordBuilder;
use super::trace::{AlertCause, TraceFrame};
use super::NotificationRecord;
use crate::config::DispatcherConfig;
use crate::error::StartupError;
use crate::notification::dispatcher::Dispatcher;

/// 告警门面
pub struct Alarm {
    app_name: String,
    dispatcher: Dispatcher,
    host: Option<String>,
}

impl Alarm {
    /// 使用内置渠道和系统主机解析器
    pub fn new(config: DispatcherConfig) -> Result<Self, StartupError> {
        Self::builder(config).build()
    }

    pub fn builder(config: DispatcherConfig) -> AlarmBuilder {
        AlarmBuilder::new(config)
    }

    pub(crate) fn from_parts(
        app_name: String,
        dispatcher: Dispatcher,
        host: Option<String>,
    ) -> Self {
        Self {
            app_name,
            dispatcher,
            host,
        }
    }

    #[track_caller]
    pub fn debug(&self, alarm_name: &str, content: &str) {
        self.alarm(Level::Debug, alarm_name, content, None);
    }

    #[track_caller]
    pub fn debug_with_cause(&self, alarm_name: &str, content: &str, cause: AlertCause) {
        self.alarm(Level::Debug, alarm_name, content, Some(cause));
    }

    #[track_caller]
    pub fn info(&self, alarm_name: &str, content: &str) {
        self.alarm(Level::Info, alarm_name, content, None);
    }

    #[track_caller]
    pub fn info_with_cause(&self, alarm_name: &str, content: &str, cause: AlertCause) {
        self.alarm(Level::Info, alarm_name, content, Some(cause));
    }

    #[track_caller]
    pub fn warn(&self, alarm_name: &str, content: &str) {
        self.alarm(Level::Warn, alarm_name, content, None);
    }

    #[track_caller]
    pub fn warn_with_cause(&self, alarm_name: &str, content: &str, cause: AlertCause) {
        self.alarm(Level::Warn, alarm_name, content, Some(cause));
    }

    #[track_caller]
    pub fn error(&self, alarm_name: &str, content: &str) {
        self.alarm(Level::Error, alarm_name, content, None);
    }

    #[track_caller]
    pub fn error_with_cause(&self, alarm_name: &str, content: &str, cause: AlertCause) {
        self.alarm(Level::Error, alarm_name, content, Some(cause));
    }

    /// 通用入口
    #[track_caller]
    pub fn alarm(&self, level: Level, alarm_name: &str, content: &str, cause: Option<AlertCause>) {
        let caller = TraceFrame::caller();
        let record = NotificationRecordBuilder::new(level, alarm_name, caller)
            .app_name(self.app_name.clone())
            .content(content)
            .host(self.host.clone())
            .cause(cause)
            .build();

        match record {
            Ok(record) => self.dispatcher.submit(record),
            Err(e) => error!(level = %level, error = %e, "Dropping invalid alarm"),
        }
    }

    /// 提交调用方自行构建的记录
    pub fn send(&self, record: NotificationRecord) {
        self.dispatcher.submit(record);
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// 构建时解析到的本机地址，解析失败时为 None
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// 等待已提交的告警全部投递完成
    pub fn shutdown(self) {
        self.dispatcher.shutdown();
    }
}
