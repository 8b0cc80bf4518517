use crate::domain::model::PhoneNumber;
use crate::domain::ports::LookupClient;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Sample profile links. No social network is queried.
pub struct SocialMediaClient;

#[async_trait]
impl LookupClient for SocialMediaClient {
    async fn lookup(&self, phone: &PhoneNumber) -> Result<String> {
        let digits = phone.digits();
        Ok(format!(
            "🔍 Social network search results:\n\
             • VK: https://vk.com/phone/{digits}\n\
             • Telegram: https://t.me/{digits}\n\
             • WhatsApp: https://wa.me/{digits}\n\n\
             ℹ️ These are example links. Actual results may differ."
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_links_embed_the_number() {
        let phone = PhoneNumber::parse("+79123456789").unwrap();
        let result = SocialMediaClient.lookup(&phone).await.unwrap();

        assert!(result.contains("https://vk.com/phone/79123456789"));
        assert!(result.contains("https://t.me/79123456789"));
        assert!(!result.contains('+'));
        assert!(result.contains("https://wa.me/79123456789"));
        assert!(!result.contains('{'));
    }
}
