//! Telegram chat bot built on the slash command core.

pub mod bot;
pub mod config;
pub mod error;

pub use bot::{Bot, ERROR_REPLY};
pub use config::Config;
pub use error::{AppError, AppResult};
