//! 本地文件渠道 - 将所有告警追加写入 JSONL 文件

use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::alarm::record::NotificationRecord;
use crate::config::{default_alarm_file, DispatcherConfig};
use crate::error::DeliveryError;
use crate::notification::channel::Channel;

/// 本地文件渠道
#[derive(Debug, Clone)]
pub struct LocalFileChannel {
    path: PathBuf,
}

impl LocalFileChannel {
    pub const ID: &'static str = "file";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &DispatcherConfig) -> Self {
        let path = config
            .file
            .as_ref()
            .and_then(|f| f.path.clone())
            .unwrap_or_else(default_alarm_file);
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Channel for LocalFileChannel {
    fn name(&self) -> &str {
        Self::ID
    }

    /// 追加一行 JSON（带文件锁，多个工作线程/进程可同时写）
    fn send(&self, record: &NotificationRecord) -> Result<(), DeliveryError> {
        let line = serde_json::to_string(record)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;
        let written = writeln!(file, "{}", line);
        file.unlock()?;
        written?;

        debug!(
            channel = Self::ID,
            path = %self.path.display(),
            alarm_name = %record.alarm_name(),
            "Alarm recorded to local file"
        );
        Ok(())
    }
}
