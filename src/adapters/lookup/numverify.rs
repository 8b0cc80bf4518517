use super::{decode_json, ensure_success, is_truthy, redact};
use crate::domain::model::PhoneNumber;
use crate::domain::ports::LookupClient;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

pub const NOT_FOUND_MESSAGE: &str = "❌ Number is invalid or not found";

/// Every field stays raw JSON so a number or `null` where a string is
/// documented still renders.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NumverifyResponse {
    pub valid: Option<Value>,
    pub country_name: Option<Value>,
    pub carrier: Option<Value>,
    pub line_type: Option<Value>,
    pub location: Option<Value>,
    pub country_code: Option<Value>,
}

impl NumverifyResponse {
    pub fn is_valid(&self) -> bool {
        self.valid.as_ref().is_some_and(is_truthy)
    }
}

fn field(value: &Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => "n/a".to_string(),
        Some(Value::String(s)) if s.is_empty() => "n/a".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn format_summary(data: &NumverifyResponse) -> String {
    if !data.is_valid() {
        return NOT_FOUND_MESSAGE.to_string();
    }

    format!(
        "📋 Basic information:\n\
         • Country: {}\n\
         • Carrier: {}\n\
         • Line type: {}\n\
         • Location: {}\n\
         • Country code: {}\n\
         • Active number: Yes",
        field(&data.country_name),
        field(&data.carrier),
        field(&data.line_type),
        field(&data.location),
        field(&data.country_code),
    )
}

pub struct NumverifyClient {
    client: Client,
    endpoint: String,
    access_key: String,
}

impl NumverifyClient {
    pub fn new(client: Client, endpoint: &str, access_key: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            access_key: access_key.to_string(),
        }
    }
}

#[async_trait]
impl LookupClient for NumverifyClient {
    async fn lookup(&self, phone: &PhoneNumber) -> Result<String> {
        tracing::debug!("Making validation request to: {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("access_key", self.access_key.as_str()),
                ("number", phone.as_str()),
            ])
            .send()
            .await
            .map_err(redact)?;

        tracing::debug!("Validation response status: {}", response.status());
        ensure_success(&response)?;

        let data: NumverifyResponse = decode_json(response).await?;
        Ok(format_summary(&data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::lookup::http_client;
    use crate::utils::error::BotError;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn phone() -> PhoneNumber {
        PhoneNumber::parse("+79123456789").unwrap()
    }

    fn client_for(endpoint: &str) -> NumverifyClient {
        NumverifyClient::new(
            http_client(Duration::from_secs(5)).unwrap(),
            endpoint,
            "test-key",
        )
    }

    #[tokio::test]
    async fn test_valid_number_summary_contains_every_field() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/validate")
                .query_param("access_key", "test-key")
                .query_param("number", "+79123456789");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "valid": true,
                    "number": "79123456789",
                    "country_name": "Russian Federation",
                    "carrier": "MTS",
                    "line_type": "mobile",
                    "location": "Moscow",
                    "country_code": "RU"
                }));
        });

        let result = client_for(&server.url("/api/validate"))
            .lookup(&phone())
            .await
            .unwrap();

        api_mock.assert();
        for expected in ["Russian Federation", "MTS", "mobile", "Moscow", "RU", "Yes"] {
            assert!(result.contains(expected), "missing {} in {}", expected, result);
        }
    }

    #[tokio::test]
    async fn test_invalid_flag_returns_not_found_message() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/validate");
            then.status(200).json_body(serde_json::json!({
                "valid": false,
                "country_name": "Russian Federation",
                "carrier": "MTS"
            }));
        });

        let result = client_for(&server.url("/api/validate"))
            .lookup(&phone())
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(result, NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_missing_flag_returns_not_found_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/validate");
            then.status(200).json_body(serde_json::json!({
                "success": false,
                "error": {"code": 101, "info": "invalid access key"}
            }));
        });

        let result = client_for(&server.url("/api/validate"))
            .lookup(&phone())
            .await
            .unwrap();

        assert_eq!(result, NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_server_error_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/validate");
            then.status(500);
        });

        let err = client_for(&server.url("/api/validate"))
            .lookup(&phone())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/validate");
            then.status(200).body("<html>not json</html>");
        });

        let result = client_for(&server.url("/api/validate"))
            .lookup(&phone())
            .await;

        assert!(matches!(result, Err(BotError::SerializationError(_))));
    }

    #[tokio::test]
    async fn test_false_flag_wins_over_unexpected_field_types() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/validate");
            then.status(200)
                .json_body(serde_json::json!({"valid": false, "country_code": 7}));
        });

        let result = client_for(&server.url("/api/validate"))
            .lookup(&phone())
            .await
            .unwrap();

        assert_eq!(result, NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_null_flag_is_not_found() {
        let data: NumverifyResponse = serde_json::from_str(r#"{"valid": null}"#).unwrap();
        assert_eq!(format_summary(&data), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_non_string_fields_are_rendered() {
        let data: NumverifyResponse = serde_json::from_str(
            r#"{"valid": 1, "country_code": 7, "carrier": null, "location": "Moscow"}"#,
        )
        .unwrap();

        let summary = format_summary(&data);
        assert!(summary.contains("• Country code: 7"));
        assert!(summary.contains("• Carrier: n/a"));
        assert!(summary.contains("• Location: Moscow"));
        assert!(summary.ends_with("• Active number: Yes"));
    }

    #[test]
    fn test_missing_fields_render_placeholder() {
        let data = NumverifyResponse {
            valid: Some(Value::Bool(true)),
            country_name: Some(Value::from("Russia")),
            carrier: Some(Value::from("")),
            ..Default::default()
        };

        let summary = format_summary(&data);
        assert!(summary.contains("• Country: Russia"));
        assert!(summary.contains("• Carrier: n/a"));
        assert!(summary.contains("• Location: n/a"));
    }
}
