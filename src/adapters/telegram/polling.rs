use super::client::TelegramClient;
use super::types::Update;
use crate::core::menu::MenuController;
use crate::domain::model::Outcome;
use crate::utils::error::Result;
use std::future::Future;
use std::time::Duration;

const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Long-polling loop. Each update is handled to completion before the next one.
pub struct Poller {
    client: TelegramClient,
    controller: MenuController,
    poll_timeout: Duration,
    offset: Option<i64>,
}

impl Poller {
    pub fn new(client: TelegramClient, controller: MenuController, poll_timeout: Duration) -> Self {
        Self {
            client,
            controller,
            poll_timeout,
            offset: None,
        }
    }

    /// Offset that will be confirmed on the next `getUpdates` call.
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    pub async fn run_until<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        tracing::info!("🚀 Polling for updates");

        loop {
            let batch = tokio::select! {
                _ = &mut shutdown => None,
                batch = self.client.get_updates(self.offset, self.poll_timeout) => Some(batch),
            };

            let delay = match batch {
                None => {
                    tracing::info!("🛑 Shutdown requested, stopping poller");
                    return Ok(());
                }
                Some(Ok(updates)) => {
                    self.process_batch(updates).await;
                    continue;
                }
                Some(Err(e)) if e.is_retryable() => {
                    let delay = e.retry_after().unwrap_or(RETRY_DELAY);
                    tracing::warn!("❌ Polling failed: {}. Retrying in {:?}", e, delay);
                    delay
                }
                Some(Err(e)) => {
                    tracing::error!("❌ Polling stopped: {}", e);
                    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                    return Err(e);
                }
            };

            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("🛑 Shutdown requested, stopping poller");
                    return Ok(());
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// Handles a batch in order. Handler failures are logged and never stop the loop.
    pub async fn process_batch(&mut self, updates: Vec<Update>) -> Vec<Outcome> {
        let mut outcomes = Vec::with_capacity(updates.len());

        for update in updates {
            let update_id = update.update_id;
            self.offset = Some(self.offset.map_or(update_id + 1, |o| o.max(update_id + 1)));

            let Some(inbound) = update.into_inbound() else {
                tracing::debug!("Skipping update {} with no supported payload", update_id);
                continue;
            };

            match self.controller.handle(&self.client, inbound).await {
                Ok(outcome) => {
                    tracing::debug!("Update {} handled: {:?}", update_id, outcome);
                    outcomes.push(outcome);
                }
                Err(e) => {
                    tracing::warn!(
                        "Update {} failed: {} (Category: {:?})",
                        update_id,
                        e,
                        e.category()
                    );
                }
            }
        }

        outcomes
    }
}
