use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

/// A message the bot has sent and may later edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub chat: ChatId,
    pub message_id: i64,
}

/// A phone number that passed [`crate::core::validator::validate_phone`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(raw: &str) -> Option<Self> {
        if crate::core::validator::validate_phone(raw) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digits only, without the leading `+`.
    pub fn digits(&self) -> &str {
        &self.0[1..]
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const TOKEN_PREFIX: &str = "svc:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    PrimaryInfo,
    SocialMedia,
    Breaches,
    Geolocation,
}

impl ServiceId {
    pub const ALL: [ServiceId; 4] = [
        ServiceId::PrimaryInfo,
        ServiceId::SocialMedia,
        ServiceId::Breaches,
        ServiceId::Geolocation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ServiceId::PrimaryInfo => "Basic information",
            ServiceId::SocialMedia => "Social networks",
            ServiceId::Breaches => "Data breaches",
            ServiceId::Geolocation => "Geolocation",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            ServiceId::PrimaryInfo => "primary",
            ServiceId::SocialMedia => "social",
            ServiceId::Breaches => "breaches",
            ServiceId::Geolocation => "geo",
        }
    }

    /// Callback payload carried by the keyboard button.
    pub fn token(self) -> String {
        format!("{}{}", TOKEN_PREFIX, self.slug())
    }

    pub fn from_token(token: &str) -> Option<Self> {
        let slug = token.strip_prefix(TOKEN_PREFIX)?;
        Self::ALL.into_iter().find(|id| id.slug() == slug)
    }

    /// Prefix used when an upstream call for this service fails.
    pub fn failure_prefix(self) -> &'static str {
        match self {
            ServiceId::Breaches => "Error while checking breaches",
            _ => "Error while fetching data",
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    pub label: String,
    pub token: String,
}

/// Inline keyboard, one button per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<KeyboardButton>>,
}

impl Keyboard {
    pub fn single_column<I>(buttons: I) -> Self
    where
        I: IntoIterator<Item = KeyboardButton>,
    {
        Self {
            rows: buttons.into_iter().map(|b| vec![b]).collect(),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flatten()
            .map(|b| b.label.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: UserId,
    pub first_name: Option<String>,
}

/// Transport-independent inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Command {
        sender: Sender,
        chat: ChatId,
        name: String,
    },
    Text {
        sender: Sender,
        chat: ChatId,
        text: String,
    },
    Selection {
        sender: Sender,
        callback_id: String,
        message: MessageRef,
        token: String,
    },
    /// Button press whose message is no longer available.
    StaleSelection { sender: Sender, callback_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Report(String),
    UpstreamError {
        service: ServiceId,
        description: String,
    },
}

impl LookupOutcome {
    pub fn render(&self) -> String {
        match self {
            LookupOutcome::Report(text) => text.clone(),
            LookupOutcome::UpstreamError {
                service,
                description,
            } => format!("⚠️ {}: {}", service.failure_prefix(), description),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LookupOutcome::UpstreamError { .. })
    }
}

/// What the menu controller did with an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Greeting,
    InvalidPhone,
    Menu { phone: PhoneNumber },
    SessionExpired,
    Lookup {
        service: ServiceId,
        outcome: LookupOutcome,
    },
    Ignored,
}
