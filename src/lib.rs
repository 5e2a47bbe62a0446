//! Signal Notify - 通过 D-Bus 上的 signal-cli daemon 发送通知

pub mod config;
pub mod notification;

pub use config::{ConfigOverrides, DbusBus, SignalConfig};
pub use notification::{
    compose, stylize, transform, MessageData, NotificationChannel, NotificationMessage,
    SendResult, SignalChannel, SignalCliTransport, SignalTransport, StyleSpec, BOLD, ITALIC,
};
