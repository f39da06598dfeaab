//! 告警分发配置
//!
//! 启动时从 JSON 文件加载一次，之后作为不可变值传给 `AlarmBuilder`。
//!
//! 读取优先级：
//! 1. 配置文件（默认 `~/.config/alarm/config.json`，键名为 camelCase）
//! 2. 环境变量 `ALARM_SENDER_LIST` / `ALARM_THREAD_POOL_SIZE` / `ALARM_APP_NAME` 覆盖文件中的值

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ConfigError;

/// 未配置或配置为 0 时的默认线程数
pub const DEFAULT_THREAD_POOL_SIZE: usize = 10;

/// webhook 默认超时（秒）
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;

const ENV_SENDER_LIST: &str = "ALARM_SENDER_LIST";
const ENV_THREAD_POOL_SIZE: &str = "ALARM_THREAD_POOL_SIZE";
const ENV_APP_NAME: &str = "ALARM_APP_NAME";

/// 分发器配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatcherConfig {
    /// 渠道标识列表（保持顺序）
    #[serde(default)]
    pub sender_list: SenderList,
    /// 工作线程数，0 表示使用默认值
    #[serde(default)]
    pub thread_pool_size: usize,
    /// 应用名称
    #[serde(default)]
    pub app_name: String,
    /// webhook 渠道配置
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<WebhookSettings>,
    /// file 渠道配置
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileSettings>,
}

/// 渠道标识列表，接受逗号分隔字符串或 JSON 数组
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSenderList", into = "Vec<String>")]
pub struct SenderList(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSenderList {
    Joined(String),
    List(Vec<String>),
}

impl From<RawSenderList> for SenderList {
    fn from(raw: RawSenderList) -> Self {
        match raw {
            RawSenderList::Joined(s) => SenderList::parse(&s),
            RawSenderList::List(items) => SenderList::from_iter(items),
        }
    }
}

impl From<SenderList> for Vec<String> {
    fn from(list: SenderList) -> Self {
        list.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for SenderList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        SenderList(
            iter.into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

impl SenderList {
    /// 解析逗号分隔的标识
    pub fn parse(joined: &str) -> Self {
        joined.split(',').collect()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// webhook 渠道配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookSettings {
    pub url: String,
    #[serde(default = "default_webhook_timeout")]
    pub timeout_secs: u64,
    /// 可选的 Bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_webhook_timeout() -> u64 {
    DEFAULT_WEBHOOK_TIMEOUT_SECS
}

/// file 渠道配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileSettings {
    /// JSONL 文件路径，缺省时使用 `default_alarm_file()`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// 默认配置文件路径
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("alarm")
        .join("config.json")
}

/// file 渠道默认输出路径
pub fn default_alarm_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("alarm")
        .join("alarms.jsonl")
}

impl DispatcherConfig {
    pub fn new(sender_list: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            sender_list: sender_list.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = size;
        self
    }

    pub fn with_webhook(mut self, webhook: WebhookSettings) -> Self {
        self.webhook = Some(webhook);
        self
    }

    pub fn with_file(mut self, file: FileSettings) -> Self {
        self.file = Some(file);
        self
    }

    /// 从指定文件加载并应用环境变量覆盖
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded alarm config file");

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 加载默认路径；文件不存在时只使用环境变量
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = default_config_path();
        if path.exists() {
            return Self::load(&path);
        }

        debug!(path = %path.display(), "Alarm config file not found, using environment only");
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// 应用环境变量覆盖，`lookup` 便于测试注入
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(list) = lookup(ENV_SENDER_LIST) {
            self.sender_list = SenderList::parse(&list);
        }

        if let Some(size) = lookup(ENV_THREAD_POOL_SIZE) {
            self.thread_pool_size = size
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidThreadPoolSize(size.clone()))?;
        }

        if let Some(app_name) = lookup(ENV_APP_NAME) {
            self.app_name = app_name;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sender_list.is_empty() {
            return Err(ConfigError::EmptySenderList);
        }
        Ok(())
    }

    /// 实际使用的线程数
    pub fn effective_pool_size(&self) -> usize {
        if self.thread_pool_size == 0 {
            DEFAULT_THREAD_POOL_SIZE
        } else {
            self.thread_pool_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_sender_list_from_comma_string() {
        let config = DispatcherConfig::from_json(r#"{"senderList": "log, webhook,,file "}"#).unwrap();
        assert_eq!(config.sender_list.as_slice(), ["log", "webhook", "file"]);
    }

    #[test]
    fn test_sender_list_from_array_keeps_order_and_duplicates() {
        let config = DispatcherConfig::from_json(r#"{"senderList": ["file", "log", "file"]}"#).unwrap();
        assert_eq!(config.sender_list.as_slice(), ["file", "log", "file"]);
    }

    #[test]
    fn test_pool_size_defaults_to_ten() {
        let config = DispatcherConfig::from_json(r#"{"senderList": "log"}"#).unwrap();
        assert_eq!(config.thread_pool_size, 0);
        assert_eq!(config.effective_pool_size(), DEFAULT_THREAD_POOL_SIZE);

        let config = config.with_thread_pool_size(3);
        assert_eq!(config.effective_pool_size(), 3);
    }

    #[test]
    fn test_negative_pool_size_is_parse_error() {
        assert!(DispatcherConfig::from_json(r#"{"senderList": "log", "threadPoolSize": -1}"#).is_err());
    }

    #[test]
    fn test_webhook_settings_defaults() {
        let config = DispatcherConfig::from_json(
            r#"{"senderList": "webhook", "webhook": {"url": "http://localhost/hook"}}"#,
        )
        .unwrap();
        let webhook = config.webhook.unwrap();
        assert_eq!(webhook.timeout_secs, DEFAULT_WEBHOOK_TIMEOUT_SECS);
        assert!(webhook.token.is_none());
    }

    #[test]
    fn test_validate_rejects_empty_sender_list() {
        let config = DispatcherConfig::new(["  ", ""]);
        assert!(matches!(config.validate(), Err(ConfigError::EmptySenderList)));
    }

    #[test]
    fn test_apply_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("ALARM_SENDER_LIST", "file,log"),
            ("ALARM_THREAD_POOL_SIZE", " 4 "),
            ("ALARM_APP_NAME", "orders"),
        ]
        .into_iter()
        .collect();

        let mut config = DispatcherConfig::new(["log"]);
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.sender_list.as_slice(), ["file", "log"]);
        assert_eq!(config.thread_pool_size, 4);
        assert_eq!(config.app_name, "orders");
    }

    #[test]
    fn test_apply_env_rejects_malformed_pool_size() {
        let mut config = DispatcherConfig::new(["log"]);
        let result = config.apply_env(|key| {
            (key == "ALARM_THREAD_POOL_SIZE").then(|| "ten".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidThreadPoolSize(v)) if v == "ten"));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(matches!(DispatcherConfig::load(&path), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_reports_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(
            DispatcherConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_serialize_round_trip_uses_camel_case() {
        let config = DispatcherConfig::new(["log", "file"])
            .with_app_name("orders")
            .with_thread_pool_size(2);
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["senderList"], serde_json::json!(["log", "file"]));
        assert_eq!(json["threadPoolSize"], 2);
        assert_eq!(json["appName"], "orders");
    }
}
