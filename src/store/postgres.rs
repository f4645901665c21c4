use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::domain::{Subscriber, SubscriberEmail, SubscriptionToken};

use super::{StoreError, SubscriberStore};

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(name = "Initializing subscribers schema", skip(self))]
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS subscribers (
                email TEXT PRIMARY KEY,
                confirmation_token TEXT NOT NULL,
                unsubscribe_token TEXT NOT NULL,
                confirmed BOOLEAN NOT NULL,
                gdpr_consent BOOLEAN NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create the subscribers table.")?;

        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS subscribers_confirmation_token_idx \
             ON subscribers (confirmation_token)",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create the confirmation token index.")?;

        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS subscribers_unsubscribe_token_idx \
             ON subscribers (unsubscribe_token)",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create the unsubscribe token index.")?;

        Ok(())
    }

    async fn find_by_token_column(
        &self,
        column: &str,
        token: &SubscriptionToken,
    ) -> Result<Option<Subscriber>, StoreError> {
        let query = format!(
            "SELECT email, confirmation_token, unsubscribe_token, confirmed, \
             gdpr_consent, created_at, updated_at FROM subscribers WHERE {column} = $1"
        );

        let row = sqlx::query(&query)
            .bind(token.as_ref())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to query subscribers by token.")?;

        row.map(parse_row).transpose()
    }
}

fn parse_row(row: PgRow) -> Result<Subscriber, StoreError> {
    let email: String = row.try_get("email").context("Missing email column.")?;
    let confirmation_token: String = row
        .try_get("confirmation_token")
        .context("Missing confirmation_token column.")?;
    let unsubscribe_token: String = row
        .try_get("unsubscribe_token")
        .context("Missing unsubscribe_token column.")?;

    Ok(Subscriber {
        email: SubscriberEmail::parse(email)
            .map_err(|e| StoreError::Backend(anyhow::anyhow!(e)))?,
        confirmation_token: SubscriptionToken::parse(confirmation_token)
            .map_err(|e| StoreError::Backend(anyhow::anyhow!(e)))?,
        unsubscribe_token: SubscriptionToken::parse(unsubscribe_token)
            .map_err(|e| StoreError::Backend(anyhow::anyhow!(e)))?,
        confirmed: row.try_get("confirmed").context("Missing confirmed column.")?,
        gdpr_consent: row
            .try_get("gdpr_consent")
            .context("Missing gdpr_consent column.")?,
        created_at: row
            .try_get("created_at")
            .context("Missing created_at column.")?,
        updated_at: row
            .try_get("updated_at")
            .context("Missing updated_at column.")?,
    })
}

#[async_trait]
impl SubscriberStore for PostgresStore {
    #[tracing::instrument(
        name = "Inserting a new subscriber record",
        skip(self, subscriber),
        fields(subscriber_email = %subscriber.email.as_ref())
    )]
    async fn insert_new(&self, subscriber: &Subscriber) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO subscribers
                (email, confirmation_token, unsubscribe_token, confirmed,
                 gdpr_consent, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(subscriber.email.as_ref())
        .bind(subscriber.confirmation_token.as_ref())
        .bind(subscriber.unsubscribe_token.as_ref())
        .bind(subscriber.confirmed)
        .bind(subscriber.gdpr_consent)
        .bind(subscriber.created_at)
        .bind(subscriber.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert the subscriber record.")?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AlreadyExists);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Looking up subscriber by confirmation token", skip_all)]
    async fn find_by_confirmation_token(
        &self,
        token: &SubscriptionToken,
    ) -> Result<Option<Subscriber>, StoreError> {
        self.find_by_token_column("confirmation_token", token).await
    }

    #[tracing::instrument(name = "Looking up subscriber by unsubscribe token", skip_all)]
    async fn find_by_unsubscribe_token(
        &self,
        token: &SubscriptionToken,
    ) -> Result<Option<Subscriber>, StoreError> {
        self.find_by_token_column("unsubscribe_token", token).await
    }

    #[tracing::instrument(
        name = "Marking subscriber as confirmed",
        skip(self, at),
        fields(subscriber_email = %email.as_ref())
    )]
    async fn mark_confirmed(
        &self,
        email: &SubscriberEmail,
        at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let result =
            sqlx::query("UPDATE subscribers SET confirmed = TRUE, updated_at = $2 WHERE email = $1")
                .bind(email.as_ref())
                .bind(at)
                .execute(&self.pool)
                .await
                .context("Failed to update the subscriber record.")?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(
        name = "Deleting subscriber record",
        skip(self),
        fields(subscriber_email = %email.as_ref())
    )]
    async fn delete(&self, email: &SubscriberEmail) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM subscribers WHERE email = $1")
            .bind(email.as_ref())
            .execute(&self.pool)
            .await
            .context("Failed to delete the subscriber record.")?;

        Ok(result.rows_affected() > 0)
    }
}
