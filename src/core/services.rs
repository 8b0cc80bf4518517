use crate::domain::model::{Keyboard, KeyboardButton, LookupOutcome, PhoneNumber, ServiceId};
use crate::domain::ports::LookupClient;
use std::sync::Arc;

pub struct ServiceDescriptor {
    pub id: ServiceId,
    pub label: String,
    client: Arc<dyn LookupClient>,
}

impl ServiceDescriptor {
    /// Runs one lookup. Client errors are folded into [`LookupOutcome::UpstreamError`].
    pub async fn lookup(&self, phone: &PhoneNumber) -> LookupOutcome {
        match self.client.lookup(phone).await {
            Ok(text) => {
                tracing::debug!("Lookup '{}' succeeded", self.id);
                LookupOutcome::Report(text)
            }
            Err(e) => {
                tracing::warn!("Lookup '{}' failed: {}", self.id, e);
                LookupOutcome::UpstreamError {
                    service: self.id,
                    description: e.to_string(),
                }
            }
        }
    }
}

/// Fixed set of lookup services, in menu order.
pub struct ServiceRegistry {
    services: Vec<ServiceDescriptor>,
}

impl ServiceRegistry {
    /// Later registrations of the same id are dropped; the first one wins.
    pub fn new<I>(clients: I) -> Self
    where
        I: IntoIterator<Item = (ServiceId, Arc<dyn LookupClient>)>,
    {
        let mut services: Vec<ServiceDescriptor> = Vec::new();
        for (id, client) in clients {
            if services.iter().any(|s| s.id == id) {
                tracing::warn!("Duplicate registration for service '{}' ignored", id);
                continue;
            }
            services.push(ServiceDescriptor {
                id,
                label: id.label().to_string(),
                client,
            });
        }
        Self { services }
    }

    pub fn get(&self, id: ServiceId) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.services.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn keyboard(&self) -> Keyboard {
        Keyboard::single_column(self.services.iter().map(|s| KeyboardButton {
            label: s.label.clone(),
            token: s.id.token(),
        }))
    }
}
