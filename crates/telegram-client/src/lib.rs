//! Telegram Bot API client and channel adapter.

mod channel;
mod client;
mod error;
mod receiver;
mod types;

pub use channel::{menu_commands, TelegramChannel};
pub use client::TelegramClient;
pub use error::TelegramError;
pub use receiver::UpdateReceiver;
pub use types::*;
