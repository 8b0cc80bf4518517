pub mod menu;
pub mod services;
pub mod session;
pub mod validator;

pub use crate::domain::model::{Inbound, LookupOutcome, Outcome, PhoneNumber, ServiceId};
pub use crate::domain::ports::{BotSettings, ChatTransport, LookupClient};
pub use crate::utils::error::Result;
