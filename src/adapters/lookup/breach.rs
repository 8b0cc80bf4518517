use super::{decode_json, ensure_success, is_truthy, redact};
use crate::domain::model::PhoneNumber;
use crate::domain::ports::LookupClient;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

pub const NO_BREACHES_MESSAGE: &str = "✅ Number not found in known data breaches";
pub const UNAVAILABLE_MESSAGE: &str = "❌ Breach information is unavailable";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BreachResponse {
    pub security: Option<Value>,
}

/// An absent, `null` or empty `security` block means the provider had no
/// data; a `null` breach list inside a populated block counts as empty.
pub fn summarize(data: &BreachResponse) -> String {
    let security = match &data.security {
        Some(security) if is_truthy(security) => security,
        _ => return UNAVAILABLE_MESSAGE.to_string(),
    };

    let count = security
        .get("breaches")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    if count > 0 {
        format!("⚠️ Number found in {} data breaches!", count)
    } else {
        NO_BREACHES_MESSAGE.to_string()
    }
}

pub struct BreachClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl BreachClient {
    pub fn new(client: Client, endpoint: &str, api_key: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl LookupClient for BreachClient {
    async fn lookup(&self, phone: &PhoneNumber) -> Result<String> {
        tracing::debug!("Making breach request to: {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("api_key", self.api_key.as_str()), ("phone", phone.as_str())])
            .send()
            .await
            .map_err(redact)?;

        tracing::debug!("Breach response status: {}", response.status());
        ensure_success(&response)?;

        let data: BreachResponse = decode_json(response).await?;
        Ok(summarize(&data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::lookup::http_client;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn phone() -> PhoneNumber {
        PhoneNumber::parse("+79123456789").unwrap()
    }

    fn client_for(endpoint: &str) -> BreachClient {
        BreachClient::new(
            http_client(Duration::from_secs(5)).unwrap(),
            endpoint,
            "abstract-key",
        )
    }

    #[tokio::test]
    async fn test_breaches_are_counted() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/")
                .query_param("api_key", "abstract-key")
                .query_param("phone", "+79123456789");
            then.status(200).json_body(serde_json::json!({
                "phone": "79123456789",
                "security": {"breaches": [{"name": "a"}, {"name": "b"}, {"name": "c"}]}
            }));
        });

        let result = client_for(&server.url("/v1/")).lookup(&phone()).await.unwrap();

        api_mock.assert();
        assert_eq!(result, "⚠️ Number found in 3 data breaches!");
    }

    #[tokio::test]
    async fn test_no_breaches() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/");
            then.status(200)
                .json_body(serde_json::json!({"security": {"breaches": []}}));
        });

        let result = client_for(&server.url("/v1/")).lookup(&phone()).await.unwrap();
        assert_eq!(result, NO_BREACHES_MESSAGE);
    }

    #[tokio::test]
    async fn test_missing_security_block() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/");
            then.status(200)
                .json_body(serde_json::json!({"phone": "79123456789", "valid": true}));
        });

        let result = client_for(&server.url("/v1/")).lookup(&phone()).await.unwrap();
        assert_eq!(result, UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_empty_security_block_is_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/");
            then.status(200).json_body(serde_json::json!({"security": {}}));
        });

        let result = client_for(&server.url("/v1/")).lookup(&phone()).await.unwrap();
        assert_eq!(result, UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_null_breach_list_counts_as_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/");
            then.status(200)
                .json_body(serde_json::json!({"security": {"breaches": null}}));
        });

        let result = client_for(&server.url("/v1/")).lookup(&phone()).await.unwrap();
        assert_eq!(result, NO_BREACHES_MESSAGE);
    }

    #[test]
    fn test_null_security_is_unavailable() {
        let data: BreachResponse = serde_json::from_str(r#"{"security": null}"#).unwrap();
        assert_eq!(summarize(&data), UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_unauthorized_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/");
            then.status(401).json_body(serde_json::json!({"error": "bad key"}));
        });

        let err = client_for(&server.url("/v1/"))
            .lookup(&phone())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_connection_refused_hides_api_key() {
        // nothing listens on the discard port
        let err = client_for("http://127.0.0.1:9/v1/")
            .lookup(&phone())
            .await
            .unwrap_err();

        let description = err.to_string();
        assert!(description.starts_with("HTTP request failed"));
        assert!(!description.contains("abstract-key"));
    }
}
