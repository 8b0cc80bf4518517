//! Lookup clients behind the service menu.
//!
//! `numverify` and `breach` call real HTTP providers; `social` and
//! `geolocation` produce sample output without any network access.

pub mod breach;
pub mod geolocation;
pub mod numverify;
pub mod social;

pub use breach::BreachClient;
pub use geolocation::GeolocationClient;
pub use numverify::NumverifyClient;
pub use social::SocialMediaClient;

use crate::core::services::ServiceRegistry;
use crate::domain::model::ServiceId;
use crate::domain::ports::{BotSettings, LookupClient};
use crate::utils::error::{BotError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub fn http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("phone-lookup-bot/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Request URLs carry API keys, so they are dropped before the error can reach a chat.
pub(crate) fn redact(err: reqwest::Error) -> BotError {
    BotError::HttpError(err.without_url())
}

pub(crate) fn ensure_success(response: &reqwest::Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(BotError::UpstreamStatusError {
            status: status.as_u16(),
        })
    }
}

/// Reads the body and decodes it; payloads that are not JSON become
/// [`BotError::SerializationError`].
pub(crate) async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let body = response.bytes().await.map_err(redact)?;
    Ok(serde_json::from_slice(&body)?)
}

/// Providers are loose with types: `null`, `0`, `""` and empty
/// containers all read as false.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// The four menu services wired to the configured providers.
pub fn standard_registry<S: BotSettings>(settings: &S) -> Result<ServiceRegistry> {
    let client = http_client(settings.request_timeout())?;

    let numverify = NumverifyClient::new(
        client.clone(),
        settings.numverify_endpoint(),
        settings.numverify_key(),
    );
    let breach = BreachClient::new(
        client,
        settings.abstractapi_endpoint(),
        settings.abstractapi_key(),
    );

    Ok(ServiceRegistry::new([
        (ServiceId::PrimaryInfo, Arc::new(numverify) as Arc<dyn LookupClient>),
        (ServiceId::SocialMedia, Arc::new(SocialMediaClient) as Arc<dyn LookupClient>),
        (ServiceId::Breaches, Arc::new(breach) as Arc<dyn LookupClient>),
        (ServiceId::Geolocation, Arc::new(GeolocationClient) as Arc<dyn LookupClient>),
    ]))
}
