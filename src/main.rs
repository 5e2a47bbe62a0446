//! Signal Notify CLI
//!
//! 把通知样式化后通过 signal-cli daemon 发送

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use signal_notify::{
    compose, ConfigOverrides, DbusBus, MessageData, NotificationChannel, NotificationMessage,
    SendResult, SignalChannel, SignalConfig,
};
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "signal-notify")]
#[command(about = "Signal Notify - 通过 signal-cli daemon 发送通知")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 发送通知
    Send {
        /// 消息正文（省略时从 stdin 读取）
        message: Option<String>,
        /// 标题（作为粗体首行）
        #[arg(long, short)]
        title: Option<String>,
        /// 附件路径，可重复
        #[arg(long = "attachment", short = 'a')]
        attachments: Vec<PathBuf>,
        /// 收件人，可重复（覆盖配置文件）
        #[arg(long = "recipient", short = 'r')]
        recipients: Vec<String>,
        /// 通知 data（JSON，如 {"attachments": ["/tmp/a.jpg"]}）
        #[arg(long)]
        data: Option<String>,
        /// 配置文件路径 (默认: ~/.signal-notify/config.json)
        #[arg(long, short)]
        config: Option<PathBuf>,
        /// D-Bus 类型: system | session（覆盖配置文件）
        #[arg(long)]
        bus: Option<DbusBus>,
        /// signal-cli 路径（覆盖配置文件）
        #[arg(long)]
        signal_cli: Option<String>,
        /// Dry-run 模式（只打印不发送）
        #[arg(long)]
        dry_run: bool,
    },
    /// 只输出样式转换结果，不发送
    Format {
        /// 消息正文（省略时从 stdin 读取）
        message: Option<String>,
        /// 标题（作为粗体首行）
        #[arg(long, short)]
        title: Option<String>,
    },
}

fn read_message(message: Option<String>) -> Result<String> {
    match message {
        Some(m) => Ok(m),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read message from stdin")?;
            Ok(buf.trim_end_matches('\n').to_string())
        }
    }
}

fn main() -> Result<()> {
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    // 例如: RUST_LOG=debug signal-notify send "hi"
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("signal_notify=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Send {
            message,
            title,
            attachments,
            recipients,
            data,
            config,
            bus,
            signal_cli,
            dry_run,
        } => {
            let overrides = ConfigOverrides {
                recipients,
                bus,
                signal_cli,
                dry_run,
            };
            let config = SignalConfig::resolve(config.as_deref(), overrides)?;
            let content = read_message(message)?;

            let mut notification = NotificationMessage::new(content).with_attachments(attachments);
            if let Some(title) = title {
                notification = notification.with_title(title);
            }
            if let Some(data) = data {
                let data: MessageData =
                    serde_json::from_str(&data).context("Invalid --data JSON")?;
                notification = notification.with_data(&data);
            }

            let channel = SignalChannel::from_config(&config);
            match channel.send(&notification)? {
                SendResult::Sent => info!(recipients = config.recipients.len(), "Notification sent"),
                SendResult::Skipped(reason) => warn!(%reason, "Notification skipped"),
            }
        }
        Commands::Format { message, title } => {
            let content = read_message(message)?;
            println!("{}", compose(title.as_deref(), &content));
        }
    }

    Ok(())
}
