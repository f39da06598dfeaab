//! 通知分发器 - 固定大小的工作线程池，把每条记录广播到所有渠道
//!
//! 队列是无界的：工作线程全忙时任务只会排队，没有背压也没有拒绝策略，
//! 提交方永远不会被阻塞，也不会收到队列已满的通知。

use crossbeam_channel::{Receiver, Sender};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info, warn};

use super::channel::Channel;
use super::registry::ChannelRegistry;
use crate::alarm::record::NotificationRecord;
use crate::config::DispatcherConfig;
use crate::error::{DeliveryError, StartupError};

type Channels = Arc<[Arc<dyn Channel>]>;

/// 通知分发器
///
/// drop 时队列随 sender 一起关闭，工作线程处理完剩余任务后自行退出，不等待。
pub struct Dispatcher {
    sender: Sender<Arc<NotificationRecord>>,
    workers: Vec<JoinHandle<()>>,
    channels: Channels,
}

impl Dispatcher {
    /// 启动 `pool_size` 个工作线程（0 视为 1）
    pub fn new(pool_size: usize, channels: Vec<Arc<dyn Channel>>) -> Result<Self, StartupError> {
        let pool_size = pool_size.max(1);
        let channels: Channels = channels.into();
        let (sender, receiver) = crossbeam_channel::unbounded();

        let mut workers = Vec::with_capacity(pool_size);
        for id in 0..pool_size {
            let receiver = receiver.clone();
            let channels = Arc::clone(&channels);
            let handle = thread::Builder::new()
                .name(format!("alarm-worker-{}", id))
                .spawn(move || run_worker(receiver, channels))
                .map_err(StartupError::WorkerSpawn)?;
            workers.push(handle);
        }

        info!(
            pool_size,
            channels = ?channels.iter().map(|c| c.name()).collect::<Vec<_>>(),
            "Alarm dispatcher started"
        );

        Ok(Self {
            sender,
            workers,
            channels,
        })
    }

    /// 按配置解析渠道并启动
    pub fn from_config(
        config: &DispatcherConfig,
        registry: &ChannelRegistry,
    ) -> Result<Self, StartupError> {
        config.validate()?;
        let channels = registry.resolve(config.sender_list.as_slice(), config)?;
        debug!(pool_size = config.effective_pool_size(), "Building alarm dispatcher");
        Self::new(config.effective_pool_size(), channels)
    }

    /// 提交一条记录，立即返回
    pub fn submit(&self, record: NotificationRecord) {
        if let Err(e) = self.sender.send(Arc::new(record)) {
            error!(alarm_name = %e.0.alarm_name(), "Alarm queue closed, dropping alarm");
        }
    }

    /// 排队中尚未被工作线程取走的任务数
    pub fn queued(&self) -> usize {
        self.sender.len()
    }

    pub fn pool_size(&self) -> usize {
        self.workers.len()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    /// 关闭队列并等待所有已提交的任务完成
    pub fn shutdown(self) {
        let Self { sender, workers, .. } = self;
        drop(sender);
        info!(workers = workers.len(), "Alarm dispatcher draining queue");

        for worker in workers {
            let name = worker.thread().name().unwrap_or("alarm-worker").to_string();
            if worker.join().is_err() {
                error!(worker = %name, "Alarm worker panicked");
            }
        }

        info!("Alarm dispatcher shut down");
    }
}

fn run_worker(receiver: Receiver<Arc<NotificationRecord>>, channels: Channels) {
    for record in receiver.iter() {
        deliver(&channels, &record);
    }
    debug!("Alarm worker exiting");
}

/// 按配置顺序依次调用每个渠道，单个渠道失败不影响其余渠道
pub(crate) fn deliver(channels: &[Arc<dyn Channel>], record: &NotificationRecord) {
    for channel in channels {
        match send_isolated(channel.as_ref(), record) {
            Ok(()) => {
                debug!(
                    channel = %channel.name(),
                    alarm_name = %record.alarm_name(),
                    "Alarm delivered"
                );
            }
            Err(e) => {
                warn!(
                    channel = %channel.name(),
                    alarm_name = %record.alarm_name(),
                    error = %e,
                    "Channel send failed"
                );
            }
        }
    }
}

/// 调用渠道，并把 panic 转换为 `DeliveryError::Panicked`
fn send_isolated(channel: &dyn Channel, record: &NotificationRecord) -> Result<(), DeliveryError> {
    match panic::catch_unwind(AssertUnwindSafe(|| channel.send(record))) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(DeliveryError::Panicked(message))
        }
    }
}
