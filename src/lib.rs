//! Alarm Dispatch - 即发即弃的告警分发器
//!
//! 业务代码按级别上报告警，分发器在固定大小的工作线程池上把每条告警
//! 依次投递到所有配置的渠道，调用方永远不会被阻塞或收到投递错误。
//!
//! ```ignore
//! use alarm_dispatch::{Alarm, AlertCause, DispatcherConfig};
//!
//! let alarm = Alarm::new(DispatcherConfig::new(["log", "file"]).with_app_name("orders"))?;
//! alarm.warn("disk-usage", "95% used on /data");
//! alarm.error_with_cause("payment", "charge failed", AlertCause::new("gateway timeout"));
//! ```

pub mod alarm;
pub mod config;
pub mod error;
pub mod notification;

pub use alarm::{
    trace_stack, Alarm, AlarmBuilder, AlertCause, HostResolver, Level, NotificationRecord,
    NotificationRecordBuilder, SystemHostResolver, TraceFrame,
};
pub use config::{DispatcherConfig, FileSettings, SenderList, WebhookSettings};
pub use error::{ConfigError, DeliveryError, HostError, RecordError, StartupError};
pub use notification::{Channel, ChannelFactory, ChannelRegistry, Dispatcher, RecordFormatter};
