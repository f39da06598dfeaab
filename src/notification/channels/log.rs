//! 日志渠道 - 通过 tracing 输出告警，总是成功

use tracing::{debug, error, info, warn};

use crate::alarm::level::Level;
use crate::alarm::record::NotificationRecord;
use crate::error::DeliveryError;
use crate::notification::channel::Channel;
use crate::notification::formatter::RecordFormatter;

/// 日志渠道
#[derive(Debug, Default)]
pub struct LogChannel {
    formatter: RecordFormatter,
}

impl LogChannel {
    pub const ID: &'static str = "log";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Channel for LogChannel {
    fn name(&self) -> &str {
        Self::ID
    }

    fn send(&self, record: &NotificationRecord) -> Result<(), DeliveryError> {
        let summary = self.formatter.summary(record);
        let host = record.host().unwrap_or("unknown");
        let cause = record.cause().map(|c| c.to_string());

        macro_rules! emit {
            ($level:ident) => {
                $level!(
                    target: "alarm::channel",
                    app = %record.app_name(),
                    host = %host,
                    trace = %record.trace_stack(),
                    cause = ?cause,
                    "{}",
                    summary
                )
            };
        }

        match record.level() {
            Level::Debug => emit!(debug),
            Level::Info => emit!(info),
            Level::Warn => emit!(warn),
            Level::Error => emit!(error),
        }

        Ok(())
    }
}
