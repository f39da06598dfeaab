//! 集成测试共用的渠道与工具
#![allow(dead_code)]

use alarm_dispatch::{
    Alarm, Channel, ChannelRegistry, DeliveryError, DispatcherConfig, HostError,
    NotificationRecord,
};
use crossbeam_channel::Receiver;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// 记录所有收到的记录，可配置为总是失败
pub struct RecordingChannel {
    name: String,
    fail: bool,
    delay: Duration,
    records: Mutex<Vec<NotificationRecord>>,
}

impl RecordingChannel {
    pub fn ok(name: &str) -> Arc<Self> {
        Arc::new(Self::new(name, false, Duration::ZERO))
    }

    pub fn failing(name: &str) -> Arc<Self> {
        Arc::new(Self::new(name, true, Duration::ZERO))
    }

    pub fn slow(name: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self::new(name, false, delay))
    }

    fn new(name: &str, fail: bool, delay: Duration) -> Self {
        Self {
            name: name.to_string(),
            fail,
            delay,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<NotificationRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn alarm_names(&self) -> Vec<String> {
        self.records()
            .iter()
            .map(|r| r.alarm_name().to_string())
            .collect()
    }
}

impl Channel for RecordingChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn send(&self, record: &NotificationRecord) -> Result<(), DeliveryError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.records.lock().unwrap().push(record.clone());
        if self.fail {
            Err(DeliveryError::Other(format!("{} is down", self.name)))
        } else {
            Ok(())
        }
    }
}

/// 阻塞直到收到放行信号，统计并发数
pub struct GatedChannel {
    gate: Receiver<()>,
    active: AtomicUsize,
    max_active: AtomicUsize,
    started: AtomicUsize,
    completed: AtomicUsize,
}

impl GatedChannel {
    pub fn new(gate: Receiver<()>) -> Arc<Self> {
        Arc::new(Self {
            gate,
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        })
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

impl Channel for GatedChannel {
    fn name(&self) -> &str {
        "gated"
    }

    fn send(&self, _record: &NotificationRecord) -> Result<(), DeliveryError> {
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);
        self.started.fetch_add(1, Ordering::SeqCst);

        let released = self.gate.recv_timeout(Duration::from_secs(10));

        self.active.fetch_sub(1, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);
        released.map_err(|e| DeliveryError::Other(e.to_string()))
    }
}

/// 把渠道实例注册到同名标识下
pub fn registry_with(channels: &[Arc<dyn Channel>]) -> ChannelRegistry {
    let mut registry = ChannelRegistry::new();
    for channel in channels {
        let channel = Arc::clone(channel);
        let id = channel.name().to_string();
        registry.register(&id, move |_| Ok(Arc::clone(&channel)));
    }
    registry
}

/// 用固定主机地址构建 Alarm，senderList 为各渠道名称
pub fn alarm_with(channels: &[Arc<dyn Channel>], pool_size: usize) -> Alarm {
    let config = DispatcherConfig::new(channels.iter().map(|c| c.name().to_string()))
        .with_app_name("test-app")
        .with_thread_pool_size(pool_size);

    Alarm::builder(config)
        .registry(registry_with(channels))
        .host_resolver(|| Ok::<_, HostError>("10.0.0.1".to_string()))
        .build()
        .unwrap()
}

/// 轮询等待条件成立
pub fn wait_until(timeout: Duration, condition: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}
