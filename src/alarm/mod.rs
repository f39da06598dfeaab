//! 告警入口 - 级别、记录、调用位置、主机解析与门面

pub mod builder;
pub mod facade;
pub mod host;
pub mod level;
pub mod record;
pub mod trace;

pub use builder::AlarmBuilder;
pub use facade::Alarm;
pub use host::{HostResolver, SystemHostResolver};
pub use level::Level;
pub use record::{NotificationRecord, NotificationRecordBuilder};
pub use trace::{trace_stack, AlertCause, TraceFrame};
