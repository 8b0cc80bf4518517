use crate::core::services::ServiceRegistry;
use crate::core::session::SessionStore;
use crate::domain::model::{ChatId, Inbound, MessageRef, Outcome, PhoneNumber, Sender, ServiceId};
use crate::domain::ports::ChatTransport;
use crate::utils::error::Result;
use std::sync::Arc;

pub const INVALID_PHONE_MESSAGE: &str =
    "❌ Invalid number format. Use the international format: +79123456789";
pub const SESSION_EXPIRED_MESSAGE: &str = "❌ Session expired. Send the number again.";

pub fn greeting(sender: &Sender) -> String {
    let name = sender.first_name.as_deref().unwrap_or("there");
    format!(
        "🔍 Hi, {}! I am a bot for looking up phone numbers.\n\
         Send me a number in international format (for example: +79123456789)",
        name
    )
}

pub fn menu_prompt(phone: &PhoneNumber) -> String {
    format!("📱 Number: {}\nChoose a lookup:", phone)
}

pub fn searching_message(label: &str) -> String {
    format!("⌛ Searching via {}...", label)
}

pub struct MenuController {
    sessions: Arc<SessionStore>,
    services: Arc<ServiceRegistry>,
}

impl MenuController {
    pub fn new(sessions: Arc<SessionStore>, services: Arc<ServiceRegistry>) -> Self {
        Self { sessions, services }
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    pub async fn handle<T: ChatTransport>(&self, transport: &T, inbound: Inbound) -> Result<Outcome> {
        match inbound {
            Inbound::Command { sender, chat, name } => {
                self.handle_command(transport, &sender, chat, &name).await
            }
            Inbound::Text { sender, chat, text } => {
                self.handle_phone(transport, &sender, chat, &text).await
            }
            Inbound::Selection {
                sender,
                callback_id,
                message,
                token,
            } => {
                transport.acknowledge(&callback_id).await?;
                self.handle_selection(transport, &sender, message, &token)
                    .await
            }
            Inbound::StaleSelection {
                sender,
                callback_id,
            } => {
                transport.acknowledge(&callback_id).await?;
                tracing::debug!("User {} pressed a button on an unavailable message", sender.id.0);
                Ok(Outcome::Ignored)
            }
        }
    }

    async fn handle_command<T: ChatTransport>(
        &self,
        transport: &T,
        sender: &Sender,
        chat: ChatId,
        name: &str,
    ) -> Result<Outcome> {
        match name {
            "start" | "help" => {
                transport.send_text(chat, &greeting(sender), None).await?;
                Ok(Outcome::Greeting)
            }
            other => {
                tracing::debug!("Ignoring unsupported command /{}", other);
                Ok(Outcome::Ignored)
            }
        }
    }

    async fn handle_phone<T: ChatTransport>(
        &self,
        transport: &T,
        sender: &Sender,
        chat: ChatId,
        text: &str,
    ) -> Result<Outcome> {
        let Some(phone) = PhoneNumber::parse(text.trim()) else {
            tracing::debug!("User {} sent a malformed number", sender.id.0);
            transport.send_text(chat, INVALID_PHONE_MESSAGE, None).await?;
            return Ok(Outcome::InvalidPhone);
        };

        self.sessions.set(sender.id, phone.clone()).await;
        tracing::info!("User {} submitted a number, showing {} services", sender.id.0, self.services.len());

        let keyboard = self.services.keyboard();
        transport
            .send_text(chat, &menu_prompt(&phone), Some(&keyboard))
            .await?;
        Ok(Outcome::Menu { phone })
    }

    async fn handle_selection<T: ChatTransport>(
        &self,
        transport: &T,
        sender: &Sender,
        message: MessageRef,
        token: &str,
    ) -> Result<Outcome> {
        let Some(descriptor) = ServiceId::from_token(token).and_then(|id| self.services.get(id))
        else {
            tracing::warn!("Unknown service token '{}' from user {}", token, sender.id.0);
            return Ok(Outcome::Ignored);
        };

        let Some(phone) = self.sessions.get(sender.id).await else {
            tracing::info!("User {} selected '{}' without a session", sender.id.0, descriptor.id);
            transport.edit_text(message, SESSION_EXPIRED_MESSAGE).await?;
            return Ok(Outcome::SessionExpired);
        };

        transport
            .edit_text(message, &searching_message(&descriptor.label))
            .await?;
        let outcome = descriptor.lookup(&phone).await;
        transport.edit_text(message, &outcome.render()).await?;

        tracing::info!(
            "User {} lookup '{}' finished (error: {})",
            sender.id.0,
            descriptor.id,
            outcome.is_error()
        );
        Ok(Outcome::Lookup {
            service: descriptor.id,
            outcome,
        })
    }
}
