mod in_memory;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Subscriber, SubscriberEmail, SubscriptionToken};

pub use in_memory::InMemoryStore;
pub use postgres::PostgresStore;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("A record with this key already exists.")]
    AlreadyExists,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Durable key-value store of subscriber records, keyed by email.
///
/// `insert_new` is the sole concurrency-control mechanism: it must be an
/// atomic conditional insert, so at most one subscribe per email succeeds
/// even under concurrent invocation across instances.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    async fn insert_new(&self, subscriber: &Subscriber) -> Result<(), StoreError>;

    async fn find_by_confirmation_token(
        &self,
        token: &SubscriptionToken,
    ) -> Result<Option<Subscriber>, StoreError>;

    async fn find_by_unsubscribe_token(
        &self,
        token: &SubscriptionToken,
    ) -> Result<Option<Subscriber>, StoreError>;

    /// Returns `false` when no row matched, e.g. the record was deleted
    /// between lookup and update.
    async fn mark_confirmed(
        &self,
        email: &SubscriberEmail,
        at: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    /// Returns `false` when no row matched.
    async fn delete(&self, email: &SubscriberEmail) -> Result<bool, StoreError>;
}
