//! signal-cli daemon 调用层
//!
//! daemon 在 D-Bus 上暴露 `org.asamk.Signal.sendMessage(message, attachments, recipients)`，
//! 这里通过 signal-cli 的 D-Bus 客户端模式调用它。消息以 `--message=<text>` 单个参数传递。

use crate::config::DbusBus;
use anyhow::{bail, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// 与 signal-cli daemon 通信的传输层
pub trait SignalTransport: Send + Sync {
    /// 发送一条消息，失败时返回错误，不重试
    fn send_message(
        &self,
        message: &str,
        attachments: &[PathBuf],
        recipients: &[String],
    ) -> Result<()>;
}

/// 通过 `signal-cli --dbus-system send` 发送
#[derive(Debug, Clone)]
pub struct SignalCliTransport {
    signal_cli: String,
    bus: DbusBus,
}

impl SignalCliTransport {
    pub fn new(signal_cli: impl Into<String>, bus: DbusBus) -> Self {
        Self {
            signal_cli: signal_cli.into(),
            bus,
        }
    }

    /// 构建命令行参数
    pub fn build_args(
        &self,
        message: &str,
        attachments: &[PathBuf],
        recipients: &[String],
    ) -> Vec<OsString> {
        // 消息与参数名写在同一个参数里，以 `-` 开头的消息不会被当成选项
        let mut args: Vec<OsString> = vec![
            self.bus.cli_flag().into(),
            "send".into(),
            format!("--message={}", message).into(),
        ];
        for path in attachments {
            args.push("-a".into());
            args.push(path.into());
        }
        // `--` 防止以 `-` 开头的收件人被当成参数
        args.push("--".into());
        args.extend(recipients.iter().map(OsString::from));
        args
    }
}

impl SignalTransport for SignalCliTransport {
    fn send_message(
        &self,
        message: &str,
        attachments: &[PathBuf],
        recipients: &[String],
    ) -> Result<()> {
        debug!(
            cmd = %self.signal_cli,
            bus = ?self.bus,
            recipients = recipients.len(),
            attachments = attachments.len(),
            "Invoking signal-cli"
        );

        let output = Command::new(&self.signal_cli)
            .args(self.build_args(message, attachments, recipients))
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "signal-cli exited with {}: {}",
                output.status,
                stderr.trim()
            );
        }

        Ok(())
    }
}
