//! 通知渠道 trait 定义

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 通知消息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// 消息正文（未转换样式）
    pub content: String,
    /// 标题（可选，发送时作为粗体首行）
    #[serde(default)]
    pub title: Option<String>,
    /// 附件文件路径
    #[serde(default)]
    pub attachments: Vec<PathBuf>,
}

impl NotificationMessage {
    /// 创建简单消息
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// 设置标题
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// 追加一个附件
    pub fn with_attachment(mut self, path: impl Into<PathBuf>) -> Self {
        self.attachments.push(path.into());
        self
    }

    /// 追加多个附件
    pub fn with_attachments<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.attachments.extend(paths.into_iter().map(Into::into));
        self
    }

    /// 合并宿主传入的 `data` 字段（目前只识别 `attachments`）
    pub fn with_data(self, data: &MessageData) -> Self {
        self.with_attachments(data.attachments.iter().cloned())
    }
}

/// 通知附带的 `data` 字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageData {
    #[serde(default)]
    pub attachments: Vec<PathBuf>,
}

/// 发送结果
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    /// 发送成功
    Sent,
    /// 跳过（dry-run 等）
    Skipped(String),
}

/// 通知渠道 trait
///
/// 发送失败通过 `Err` 原样返回，由调用方决定如何处理。
pub trait NotificationChannel: Send + Sync {
    /// 渠道名称（用于日志）
    fn name(&self) -> &str;

    /// 同步发送消息
    fn send(&self, message: &NotificationMessage) -> Result<SendResult>;
}
