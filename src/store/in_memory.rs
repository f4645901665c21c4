use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::{Subscriber, SubscriberEmail, SubscriptionToken};

use super::{StoreError, SubscriberStore};

/// Hash-map backend for tests and local development. The write lock around
/// the entry API gives the same conditional-insert atomicity the Postgres
/// backend gets from `ON CONFLICT DO NOTHING`.
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<String, Subscriber>>,
}

impl InMemoryStore {
    pub fn get(&self, email: &str) -> Option<Subscriber> {
        self.records.read().get(email).cloned()
    }

    pub fn count(&self) -> usize {
        self.records.read().len()
    }
}

#[async_trait]
impl SubscriberStore for InMemoryStore {
    async fn insert_new(&self, subscriber: &Subscriber) -> Result<(), StoreError> {
        let mut records = self.records.write();
        match records.entry(subscriber.email.as_ref().to_string()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists),
            Entry::Vacant(entry) => {
                entry.insert(subscriber.clone());
                Ok(())
            }
        }
    }

    async fn find_by_confirmation_token(
        &self,
        token: &SubscriptionToken,
    ) -> Result<Option<Subscriber>, StoreError> {
        let records = self.records.read();
        Ok(records
            .values()
            .find(|s| s.confirmation_token == *token)
            .cloned())
    }

    async fn find_by_unsubscribe_token(
        &self,
        token: &SubscriptionToken,
    ) -> Result<Option<Subscriber>, StoreError> {
        let records = self.records.read();
        Ok(records
            .values()
            .find(|s| s.unsubscribe_token == *token)
            .cloned())
    }

    async fn mark_confirmed(
        &self,
        email: &SubscriberEmail,
        at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut records = self.records.write();
        match records.get_mut(email.as_ref()) {
            Some(record) => {
                record.confirmed = true;
                record.updated_at = at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, email: &SubscriberEmail) -> Result<bool, StoreError> {
        let mut records = self.records.write();
        Ok(records.remove(email.as_ref()).is_some())
    }
}
