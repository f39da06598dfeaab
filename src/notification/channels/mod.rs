//! 内置渠道实现

pub mod local_file;
pub mod log;
pub mod webhook;

pub use local_file::LocalFileChannel;
pub use log::LogChannel;
pub use webhook::WebhookChannel;
