//! 通知层 - 样式转换和 Signal 投递
//!
//! # 使用示例
//! ```ignore
//! use signal_notify::config::SignalConfig;
//! use signal_notify::notification::{NotificationChannel, NotificationMessage, SignalChannel};
//!
//! let config = SignalConfig::load_default()?;
//! let channel = SignalChannel::from_config(&config);
//!
//! let message = NotificationMessage::new("Front door *open*").with_title("Alarm");
//! channel.send(&message)?;
//! ```

pub mod channel;
pub mod channels;
pub mod style;
pub mod transport;

pub use channel::{MessageData, NotificationChannel, NotificationMessage, SendResult};
pub use channels::SignalChannel;
pub use style::{compose, stylize, transform, StyleSpec, BOLD, ITALIC};
pub use transport::{SignalCliTransport, SignalTransport};
