use std::sync::Arc;

use chrono::Utc;

use crate::domain::{NewSubscriber, Subscriber, SubscriptionToken};
use crate::email_client::EmailClient;
use crate::store::{StoreError, SubscriberStore};

use super::errors::{ConfirmError, SubscribeError, UnsubscribeError};
use super::helpers::{get_email_html, get_email_text};

/// Owns the subscription lifecycle:
///
/// ```text
/// [no record] --subscribe--> PENDING --confirm--> CONFIRMED
/// PENDING   --unsubscribe--> [deleted]
/// CONFIRMED --unsubscribe--> [deleted]
/// ```
///
/// All state lives in the store; the service itself is stateless and safe to
/// share across request handlers.
pub struct SubscriptionService {
    store: Arc<dyn SubscriberStore>,
    email_client: EmailClient,
    base_url: String,
}

impl SubscriptionService {
    pub fn new(store: Arc<dyn SubscriberStore>, email_client: EmailClient, base_url: String) -> Self {
        Self {
            store,
            email_client,
            base_url,
        }
    }

    #[tracing::instrument(
        name = "Adding a new subscriber.",
        skip(self, new_subscriber),
        fields(subscriber_email = %new_subscriber.email.as_ref())
    )]
    pub async fn subscribe(&self, new_subscriber: NewSubscriber) -> Result<(), SubscribeError> {
        let subscriber = Subscriber::pending(new_subscriber);

        self.store
            .insert_new(&subscriber)
            .await
            .map_err(|e| match e {
                StoreError::AlreadyExists => SubscribeError::Duplicate,
                other => SubscribeError::Storage(other),
            })?;

        // A mail failure past this point leaves the record PENDING on
        // purpose: the insert is not rolled back.
        self.send_confirmation_email(&subscriber)
            .await
            .map_err(SubscribeError::Mail)?;

        Ok(())
    }

    #[tracing::instrument(name = "Confirming a pending subscriber.", skip_all)]
    pub async fn confirm(&self, token: &SubscriptionToken) -> Result<(), ConfirmError> {
        let subscriber = self
            .store
            .find_by_confirmation_token(token)
            .await?
            .ok_or(ConfirmError::InvalidToken)?;

        // The token stays valid after use: repeat confirms re-apply the same
        // transition. A record deleted between lookup and update surfaces as
        // InvalidToken, same as a miss.
        let updated = self
            .store
            .mark_confirmed(&subscriber.email, Utc::now())
            .await?;

        if !updated {
            return Err(ConfirmError::InvalidToken);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Removing a subscriber.", skip_all)]
    pub async fn unsubscribe(&self, token: &SubscriptionToken) -> Result<(), UnsubscribeError> {
        let subscriber = self
            .store
            .find_by_unsubscribe_token(token)
            .await?
            .ok_or(UnsubscribeError::InvalidToken)?;

        let deleted = self.store.delete(&subscriber.email).await?;

        if !deleted {
            return Err(UnsubscribeError::InvalidToken);
        }

        Ok(())
    }

    #[tracing::instrument(
        name = "Sending a confirmation email to a new subscriber",
        skip(self, subscriber)
    )]
    async fn send_confirmation_email(&self, subscriber: &Subscriber) -> Result<(), reqwest::Error> {
        let confirm_link = format!(
            "{}/subscribe/confirm?token={}",
            self.base_url,
            subscriber.confirmation_token.as_ref()
        );
        let unsubscribe_link = format!(
            "{}/subscribe/unsubscribe?token={}",
            self.base_url,
            subscriber.unsubscribe_token.as_ref()
        );

        self.email_client
            .send_email(
                &subscriber.email,
                "Confirm your subscription",
                &get_email_html(&confirm_link, &unsubscribe_link),
                &get_email_text(&confirm_link, &unsubscribe_link),
            )
            .await
    }
}
