//! 具体渠道实现

pub mod signal;

pub use signal::SignalChannel;
