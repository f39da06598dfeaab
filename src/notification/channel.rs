//! 通知渠道 trait 定义

use crate::alarm::record::NotificationRecord;
use crate::error::DeliveryError;

/// 通知渠道
///
/// `send` 在工作线程上同步执行，可以阻塞到 I/O 完成。所有失败都必须以
/// `DeliveryError` 返回；分发器据此记录日志并继续调用后续渠道。
pub trait Channel: Send + Sync {
    /// 渠道名称（用于日志和配置）
    fn name(&self) -> &str;

    /// 投递一条记录
    fn send(&self, record: &NotificationRecord) -> Result<(), DeliveryError>;
}
