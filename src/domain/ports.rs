use crate::domain::model::{ChatId, Keyboard, MessageRef, PhoneNumber};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ChatTransport: Send + Sync {
    fn send_text(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> impl std::future::Future<Output = Result<MessageRef>> + Send;

    fn edit_text(
        &self,
        message: MessageRef,
        text: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn acknowledge(&self, callback_id: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait BotSettings: Send + Sync {
    fn bot_token(&self) -> &str;
    fn telegram_api_base(&self) -> &str;
    fn numverify_endpoint(&self) -> &str;
    fn numverify_key(&self) -> &str;
    fn abstractapi_endpoint(&self) -> &str;
    fn abstractapi_key(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn poll_timeout(&self) -> Duration;
}

#[async_trait]
pub trait LookupClient: Send + Sync {
    async fn lookup(&self, phone: &PhoneNumber) -> Result<String>;
}
