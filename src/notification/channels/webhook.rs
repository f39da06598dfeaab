//! Webhook 渠道
//!
//! 以 JSON POST 发送告警：`{"text": <格式化文本>, "record": <结构化记录>}`

use reqwest::blocking::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::alarm::record::NotificationRecord;
use crate::config::{DispatcherConfig, WebhookSettings};
use crate::error::{ConfigError, DeliveryError};
use crate::notification::channel::Channel;
use crate::notification::formatter::RecordFormatter;

/// Webhook 渠道
#[derive(Debug)]
pub struct WebhookChannel {
    client: Client,
    settings: WebhookSettings,
    formatter: RecordFormatter,
}

impl WebhookChannel {
    pub const ID: &'static str = "webhook";

    /// 创建渠道（HTTP client 只构建一次）
    pub fn new(settings: WebhookSettings) -> Result<Self, ConfigError> {
        if settings.url.trim().is_empty() {
            return Err(Self::misconfigured("url is required"));
        }
        if settings.timeout_secs == 0 {
            return Err(Self::misconfigured("timeoutSecs must be greater than zero"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Self::misconfigured(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            settings,
            formatter: RecordFormatter,
        })
    }

    pub fn from_config(config: &DispatcherConfig) -> Result<Self, ConfigError> {
        let settings = config
            .webhook
            .clone()
            .ok_or_else(|| Self::misconfigured("missing `webhook` section"))?;
        Self::new(settings)
    }

    fn misconfigured(reason: impl Into<String>) -> ConfigError {
        ConfigError::ChannelSettings {
            channel: Self::ID.to_string(),
            reason: reason.into(),
        }
    }
}

impl Channel for WebhookChannel {
    fn name(&self) -> &str {
        Self::ID
    }

    fn send(&self, record: &NotificationRecord) -> Result<(), DeliveryError> {
        let payload = json!({
            "text": self.formatter.format(record),
            "record": record,
        });

        let mut request = self.client.post(&self.settings.url).json(&payload);
        if let Some(token) = &self.settings.token {
            request = request.bearer_auth(token);
        }

        // 失败由分发器统一记录（带渠道名和告警名），这里只转换错误
        let response = request
            .send()
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(url = %self.settings.url, alarm_name = %record.alarm_name(), "Webhook delivered");
            Ok(())
        } else {
            let body = response.text().unwrap_or_default();
            Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}
