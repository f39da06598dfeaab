//! Alarm 构建器 - 组合配置、渠道注册表与主机解析器

use std::sync::Arc;
use tracing::{info, warn};

use super::facade::Alarm;
use super::host::{HostResolver, SystemHostResolver};
use crate::config::DispatcherConfig;
use crate::error::StartupError;
use crate::notification::dispatcher::Dispatcher;
use crate::notification::registry::ChannelRegistry;

/// Alarm 构建器
pub struct AlarmBuilder {
    config: DispatcherConfig,
    registry: Option<ChannelRegistry>,
    host_resolver: Arc<dyn HostResolver>,
}

impl AlarmBuilder {
    pub fn new(config: DispatcherConfig) -> Self {
        Self {
            config,
            registry: None,
            host_resolver: Arc::new(SystemHostResolver),
        }
    }

    /// 自定义渠道注册表（默认为内置渠道）
    pub fn registry(mut self, registry: ChannelRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// 自定义主机解析器
    pub fn host_resolver(mut self, resolver: impl HostResolver + 'static) -> Self {
        self.host_resolver = Arc::new(resolver);
        self
    }

    /// 解析渠道并启动工作线程；配置错误时失败
    ///
    /// 本机地址只在这里解析一次，失败时记录日志，之后所有记录的 host 均为空。
    pub fn build(self) -> Result<Alarm, StartupError> {
        let registry = self.registry.unwrap_or_else(ChannelRegistry::builtin);
        let dispatcher = Dispatcher::from_config(&self.config, &registry)?;

        let host = match self.host_resolver.resolve() {
            Ok(host) => Some(host),
            Err(e) => {
                warn!(error = %e, "Failed to resolve local host, alarms will carry no host");
                None
            }
        };

        info!(
            app_name = %self.config.app_name,
            host = ?host,
            pool_size = dispatcher.pool_size(),
            channels = dispatcher.channel_count(),
            "Alarm initialized"
        );

        Ok(Alarm::from_parts(
            self.config.app_name,
            dispatcher,
            host,
        ))
    }
}
