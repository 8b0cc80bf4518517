use crate::domain::model::PhoneNumber;
use crate::domain::ports::LookupClient;
use crate::utils::error::Result;
use async_trait::async_trait;

pub const SAMPLE_LOCATION: &str = "📍 Approximate geolocation (sample data):\n\
     • City: Moscow\n\
     • Region: Central Federal District\n\
     • Coordinates: 55.7558° N, 37.6173° E\n\n\
     ℹ️ Accuracy depends on the availability of cell tower data";

/// Fixed sample output. No cell-tower database is queried.
pub struct GeolocationClient;

#[async_trait]
impl LookupClient for GeolocationClient {
    async fn lookup(&self, phone: &PhoneNumber) -> Result<String> {
        tracing::debug!("Returning sample geolocation for {} digits", phone.digits().len());
        Ok(SAMPLE_LOCATION.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_sample_location() {
        let phone = PhoneNumber::parse("+12025550123").unwrap();
        let result = GeolocationClient.lookup(&phone).await.unwrap();
        assert_eq!(result, SAMPLE_LOCATION);
    }
}
