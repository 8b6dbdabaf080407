//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Telegram error: {0}")]
    Telegram(#[from] telegram_client::TelegramError),

    #[error("Command error: {0}")]
    Command(#[from] bot_commands::CommandError),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use telegram_client::TelegramError;

    fn create_client() -> AppResult<()> {
        let created: Result<(), TelegramError> = Err(TelegramError::Api("bad token".into()));
        created?;
        Ok(())
    }

    #[test]
    fn test_telegram_errors_keep_their_variant() {
        let err = create_client().unwrap_err();

        assert!(matches!(err, AppError::Telegram(_)));
        assert_eq!(err.to_string(), "Telegram error: API error: bad token");
    }
}
