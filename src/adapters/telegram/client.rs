use super::types::{
    AnswerCallbackQuery, ApiResponse, EditMessageText, GetUpdates, InlineKeyboardMarkup, Message,
    SendMessage, Update,
};
use crate::domain::model::{ChatId, Keyboard, MessageRef};
use crate::domain::ports::ChatTransport;
use crate::utils::error::{BotError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Extra time on top of the long-poll timeout before the HTTP call gives up.
const POLL_GRACE: Duration = Duration::from_secs(10);

const NOT_MODIFIED: &str = "message is not modified";

/// Bot API client. Holds the bot token, so it deliberately has no `Debug` impl.
pub struct TelegramClient {
    client: Client,
    method_base: String,
}

impl TelegramClient {
    pub fn new(api_base: &str, token: &str, poll_timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(poll_timeout + POLL_GRACE).build()?;
        Ok(Self {
            client,
            method_base: format!("{}/bot{}", api_base.trim_end_matches('/'), token),
        })
    }

    async fn call<P, R>(&self, method: &str, payload: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.method_base, method);
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| BotError::HttpError(e.without_url()))?;

        let status = response.status();
        tracing::debug!("Telegram {} responded with {}", method, status);

        // error statuses still carry a JSON envelope with a description
        let bytes = response
            .bytes()
            .await
            .map_err(|e| BotError::HttpError(e.without_url()))?;
        let body: ApiResponse<R> = serde_json::from_slice(&bytes)?;

        if !body.ok {
            return Err(BotError::TelegramApiError {
                method: method.to_string(),
                description: body
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
                code: body
                    .error_code
                    .or_else(|| (!status.is_success()).then(|| status.as_u16())),
                retry_after: body.parameters.and_then(|p| p.retry_after),
            });
        }

        body.result.ok_or_else(|| BotError::TelegramApiError {
            method: method.to_string(),
            description: "response has no result".to_string(),
            code: None,
            retry_after: None,
        })
    }

    pub async fn get_updates(&self, offset: Option<i64>, timeout: Duration) -> Result<Vec<Update>> {
        let request = GetUpdates {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: vec!["message", "callback_query"],
        };
        self.call("getUpdates", &request).await
    }
}

impl ChatTransport for TelegramClient {
    async fn send_text(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef> {
        let request = SendMessage {
            chat_id: chat.0,
            text,
            reply_markup: keyboard.map(InlineKeyboardMarkup::from),
        };
        let message: Message = self.call("sendMessage", &request).await?;
        Ok(MessageRef {
            chat: ChatId(message.chat.id),
            message_id: message.message_id,
        })
    }

    async fn edit_text(&self, message: MessageRef, text: &str) -> Result<()> {
        let request = EditMessageText {
            chat_id: message.chat.0,
            message_id: message.message_id,
            text,
        };
        match self
            .call::<_, serde_json::Value>("editMessageText", &request)
            .await
        {
            Ok(_) => Ok(()),
            Err(BotError::TelegramApiError { description, .. })
                if description.contains(NOT_MODIFIED) =>
            {
                tracing::debug!("Edit skipped, message {} already up to date", message.message_id);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn acknowledge(&self, callback_id: &str) -> Result<()> {
        let request = AnswerCallbackQuery {
            callback_query_id: callback_id,
        };
        let _: bool = self.call("answerCallbackQuery", &request).await?;
        Ok(())
    }
}
