use chrono::{DateTime, Utc};

use super::{NewSubscriber, SubscriberEmail, SubscriptionToken};

/// The persisted subscription record, one per unique email.
#[derive(Debug, Clone)]
pub struct Subscriber {
    pub email: SubscriberEmail,
    pub confirmation_token: SubscriptionToken,
    pub unsubscribe_token: SubscriptionToken,
    pub confirmed: bool,
    pub gdpr_consent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscriber {
    /// Builds a fresh PENDING record: both tokens minted here and never
    /// reissued, one timestamp shared by `created_at` and `updated_at`.
    pub fn pending(new_subscriber: NewSubscriber) -> Self {
        let now = Utc::now();
        Self {
            email: new_subscriber.email,
            confirmation_token: SubscriptionToken::new(),
            unsubscribe_token: SubscriptionToken::new(),
            confirmed: false,
            gdpr_consent: new_subscriber.gdpr_consent.granted(),
            created_at: now,
            updated_at: now,
        }
    }
}
