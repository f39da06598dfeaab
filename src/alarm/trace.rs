//! 调用位置与异常原因
//!
//! `AlertCause` 携带一组有序的栈帧（最内层在前），`trace_stack` 是一个纯函数：
//! 有 cause 时取其第一帧，否则取调用方位置。调用方位置通过 `#[track_caller]`
//! 沿整条门面调用链传递，不做运行时栈遍历。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::Location;

/// 单个栈帧描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceFrame {
    /// 函数名（`Location` 无法提供，显式构造时可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl TraceFrame {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            function: None,
            file: file.into(),
            line,
            column,
        }
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    pub fn from_location(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line(), location.column())
    }

    /// 调用本函数（或 `#[track_caller]` 链最外层）的位置
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }
}

impl fmt::Display for TraceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.function {
            Some(function) => write!(f, "{}({}:{})", function, self.file, self.line),
            None => write!(f, "{}:{}:{}", self.file, self.line, self.column),
        }
    }
}

/// 告警原因 - 结构化的错误值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCause {
    message: String,
    frames: Vec<TraceFrame>,
}

impl AlertCause {
    /// 以调用位置作为唯一栈帧创建
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            frames: vec![TraceFrame::caller()],
        }
    }

    /// 从任意错误创建，消息包含完整的 source 链
    #[track_caller]
    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }

        Self {
            message,
            frames: vec![TraceFrame::caller()],
        }
    }

    pub fn with_frames(message: impl Into<String>, frames: Vec<TraceFrame>) -> Self {
        Self {
            message: message.into(),
            frames,
        }
    }

    /// 追加一个外层栈帧
    pub fn with_frame(mut self, frame: TraceFrame) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn frames(&self) -> &[TraceFrame] {
        &self.frames
    }

    pub fn first_frame(&self) -> Option<&TraceFrame> {
        self.frames.first()
    }
}

impl fmt::Display for AlertCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AlertCause {}

/// 计算记录的 trace_stack
///
/// cause 存在且带栈帧时取第一帧，否则使用调用方栈帧。
pub fn trace_stack(cause: Option<&AlertCause>, caller: &TraceFrame) -> String {
    cause
        .and_then(AlertCause::first_frame)
        .unwrap_or(caller)
        .to_string()
}
