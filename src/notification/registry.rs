//! 渠道注册表 - 启动时把配置中的渠道标识解析为渠道实例

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::channel::Channel;
use super::channels::{LocalFileChannel, LogChannel, WebhookChannel};
use crate::config::DispatcherConfig;
use crate::error::ConfigError;

/// 渠道工厂
pub type ChannelFactory =
    Box<dyn Fn(&DispatcherConfig) -> Result<Arc<dyn Channel>, ConfigError> + Send + Sync>;

/// 渠道注册表
pub struct ChannelRegistry {
    factories: HashMap<String, ChannelFactory>,
}

impl ChannelRegistry {
    /// 空注册表
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// 内置渠道：log / webhook / file
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(LogChannel::ID, |_| Ok(Arc::new(LogChannel::new())));
        registry.register(WebhookChannel::ID, |config| {
            Ok(Arc::new(WebhookChannel::from_config(config)?))
        });
        registry.register(LocalFileChannel::ID, |config| {
            Ok(Arc::new(LocalFileChannel::from_config(config)))
        });
        registry
    }

    /// 注册工厂，标识不区分大小写，重复注册会覆盖
    pub fn register<F>(&mut self, id: &str, factory: F)
    where
        F: Fn(&DispatcherConfig) -> Result<Arc<dyn Channel>, ConfigError> + Send + Sync + 'static,
    {
        let key = normalize(id);
        if self.factories.insert(key.clone(), Box::new(factory)).is_some() {
            warn!(channel = %key, "Replacing registered channel factory");
        }
    }

    /// 已注册的标识（排序后）
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(&normalize(id))
    }

    /// 按顺序解析渠道；任一标识未知即失败
    pub fn resolve(
        &self,
        identifiers: &[String],
        config: &DispatcherConfig,
    ) -> Result<Vec<Arc<dyn Channel>>, ConfigError> {
        let mut channels = Vec::with_capacity(identifiers.len());
        let mut seen: Vec<String> = Vec::new();

        for id in identifiers {
            let key = normalize(id);
            let factory = self
                .factories
                .get(&key)
                .ok_or_else(|| ConfigError::UnknownChannel(id.trim().to_string()))?;

            if seen.contains(&key) {
                warn!(channel = %key, "Channel configured more than once, alarms will be sent twice");
            }

            channels.push(factory(config)?);
            info!(channel = %key, "Registered alarm channel");
            seen.push(key);
        }

        Ok(channels)
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize(id: &str) -> String {
    id.trim().to_lowercase()
}
