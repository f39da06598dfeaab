//! 错误类型
//!
//! 按严重程度分层：配置错误在启动时致命，其余错误（主机解析、渠道投递）
//! 只记录日志，永远不会传回告警调用方。

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 配置错误 - 启动阶段致命
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("senderList is empty, at least one channel must be configured")]
    EmptySenderList,

    #[error("invalid threadPoolSize {0:?}, expected a non-negative integer")]
    InvalidThreadPoolSize(String),

    #[error("unknown channel identifier {0:?}")]
    UnknownChannel(String),

    #[error("channel {channel} is misconfigured: {reason}")]
    ChannelSettings { channel: String, reason: String },
}

/// 构建 Alarm / Dispatcher 失败
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to spawn alarm worker thread: {0}")]
    WorkerSpawn(#[source] io::Error),
}

/// 本机地址解析失败（非致命）
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to read local hostname: {0}")]
    Hostname(#[source] io::Error),

    #[error("failed to resolve hostname {hostname}: {source}")]
    Lookup {
        hostname: String,
        #[source]
        source: io::Error,
    },

    #[error("hostname {0} resolved to no address")]
    NoAddress(String),
}

/// 单个渠道投递失败（非致命，只影响当前渠道的这一次发送）
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("io failure: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("channel panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Other(String),
}

/// 通知记录构建失败
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("alarm name must not be empty")]
    EmptyAlarmName,
}
