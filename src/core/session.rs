use crate::domain::model::{PhoneNumber, UserId};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Last valid phone number per user. Entries live as long as the process.
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: RwLock<HashMap<UserId, PhoneNumber>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, user: UserId, phone: PhoneNumber) {
        let mut entries = self.entries.write().await;
        entries.insert(user, phone);
    }

    pub async fn get(&self, user: UserId) -> Option<PhoneNumber> {
        let entries = self.entries.read().await;
        entries.get(&user).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn phone(raw: &str) -> PhoneNumber {
        PhoneNumber::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_get_unknown_user_is_absent() {
        let store = SessionStore::new();
        assert_eq!(store.get(UserId(1)).await, None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_number() {
        let store = SessionStore::new();
        store.set(UserId(1), phone("+79123456789")).await;
        store.set(UserId(1), phone("+79998887766")).await;

        assert_eq!(store.get(UserId(1)).await, Some(phone("+79998887766")));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = SessionStore::new();
        store.set(UserId(1), phone("+79123456789")).await;
        store.set(UserId(2), phone("+12025550123")).await;

        assert_eq!(store.get(UserId(1)).await, Some(phone("+79123456789")));
        assert_eq!(store.get(UserId(2)).await, Some(phone("+12025550123")));
    }

    #[tokio::test]
    async fn test_concurrent_writers() {
        let store = Arc::new(SessionStore::new());
        let mut handles = Vec::new();

        for i in 0..16i64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let raw = format!("+7912345{:04}", i);
                store.set(UserId(i), PhoneNumber::parse(&raw).unwrap()).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len().await, 16);
        assert_eq!(store.get(UserId(3)).await, Some(phone("+79123450003")));
    }
}
