//! 通知分发层 - 渠道抽象、渠道注册表与工作线程池分发器
//!
//! # 设计目标
//! 1. 统一接口：所有渠道实现 `Channel` trait
//! 2. 故障隔离：单个渠道失败只记录日志，不影响同一任务中的其余渠道和其他任务
//! 3. 启动时解析：渠道集合在启动时由 `ChannelRegistry` 一次性构建，之后只读
//! 4. 异步投递：`Dispatcher::submit` 只入队，不阻塞调用方

pub mod channel;
pub mod channels;
pub mod dispatcher;
pub mod formatter;
pub mod registry;

pub use channel::Channel;
pub use channels::{LocalFileChannel, LogChannel, WebhookChannel};
pub use dispatcher::Dispatcher;
pub use formatter::RecordFormatter;
pub use registry::{ChannelFactory, ChannelRegistry};
