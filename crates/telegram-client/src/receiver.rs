//! Message receiver with long polling.

use crate::client::TelegramClient;
use crate::types::*;
use std::time::Duration;
use tokio::time::sleep;
use tokio_stream::Stream;
use tracing::{debug, error};

/// Message receiver that long-polls `getUpdates`.
pub struct UpdateReceiver {
    client: TelegramClient,
    poll_timeout: Duration,
    retry_delay: Duration,
}

impl UpdateReceiver {
    /// Create a new receiver.
    pub fn new(client: TelegramClient, poll_timeout: Duration) -> Self {
        Self {
            client,
            poll_timeout,
            retry_delay: Duration::from_secs(5),
        }
    }

    /// Set the back-off after a failed poll.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Start receiving text messages as an async stream.
    pub fn stream(self) -> impl Stream<Item = BotMessage> {
        async_stream::stream! {
            let mut offset: Option<i64> = None;
            loop {
                match self.client.get_updates(offset, self.poll_timeout).await {
                    Ok(updates) => {
                        for update in updates {
                            offset = Some(update.update_id + 1);
                            if let Some(bot_msg) = BotMessage::from_update(&update) {
                                debug!("Received: {} from chat {}",
                                    bot_msg.text.chars().take(50).collect::<String>(),
                                    bot_msg.chat_id
                                );
                                yield bot_msg;
                            }
                        }
                    }
                    Err(e) => {
                        error!("Receive error: {}", e);
                        sleep(self.retry_delay).await;
                    }
                }
            }
        }
    }
}
