//! Signal 渠道（通过 D-Bus 上的 signal-cli daemon 发送）

use crate::config::SignalConfig;
use crate::notification::channel::{NotificationChannel, NotificationMessage, SendResult};
use crate::notification::style::compose;
use crate::notification::transport::{SignalCliTransport, SignalTransport};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Signal 渠道
pub struct SignalChannel {
    recipients: Vec<String>,
    transport: Arc<dyn SignalTransport>,
    dry_run: bool,
}

impl SignalChannel {
    pub fn new(config: &SignalConfig, transport: Arc<dyn SignalTransport>) -> Self {
        Self {
            recipients: config.recipients.clone(),
            transport,
            dry_run: config.dry_run,
        }
    }

    /// 使用 signal-cli 传输层创建
    pub fn from_config(config: &SignalConfig) -> Self {
        let transport = SignalCliTransport::new(config.signal_cli_path(), config.bus);
        Self::new(config, Arc::new(transport))
    }

    /// 设置 dry-run 模式
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    /// 生成最终发送的文本（标题 + 样式转换）
    pub fn format_message(&self, message: &NotificationMessage) -> String {
        compose(message.title.as_deref(), &message.content)
    }
}

impl NotificationChannel for SignalChannel {
    fn name(&self) -> &str {
        "signal"
    }

    fn send(&self, message: &NotificationMessage) -> Result<SendResult> {
        debug!("Sending signal message");

        let formatted = self.format_message(message);

        if self.dry_run {
            info!(
                recipients = ?self.recipients,
                attachments = message.attachments.len(),
                message = %formatted,
                "[DRY-RUN] Would send signal message"
            );
            return Ok(SendResult::Skipped("dry-run".to_string()));
        }

        if let Err(e) = self
            .transport
            .send_message(&formatted, &message.attachments, &self.recipients)
        {
            error!(channel = "signal", error = %e, "Failed to send message");
            return Err(e);
        }

        info!(
            channel = "signal",
            recipients = self.recipients.len(),
            attachments = message.attachments.len(),
            "Message sent successfully"
        );
        Ok(SendResult::Sent)
    }
}
