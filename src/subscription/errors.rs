use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::routes::{ApiResponse, error_chain_fmt};
use crate::store::StoreError;

#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("{0}")]
    ValidationError(String),
    #[error("A subscriber with this email already exists.")]
    Duplicate,
    #[error("Failed to store the new subscriber.")]
    Storage(#[source] StoreError),
    #[error("Failed to send the confirmation email.")]
    Mail(#[source] reqwest::Error),
}

impl std::fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscribeError::ValidationError(_) | SubscribeError::Duplicate => {
                StatusCode::BAD_REQUEST
            }
            SubscribeError::Storage(_) | SubscribeError::Mail(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            SubscribeError::ValidationError(reason) => reason.clone(),
            SubscribeError::Duplicate => "This email is already subscribed".into(),
            SubscribeError::Storage(_) | SubscribeError::Mail(_) => "Subscription failed".into(),
        };
        HttpResponse::build(self.status_code()).json(ApiResponse::failure(message))
    }
}

#[derive(thiserror::Error)]
pub enum ConfirmError {
    #[error("There is no subscriber with the supplied confirmation token.")]
    InvalidToken,
    #[error("Failed to confirm the subscription.")]
    Storage(#[from] StoreError),
}

impl std::fmt::Debug for ConfirmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ConfirmError {
    fn status_code(&self) -> StatusCode {
        match self {
            ConfirmError::InvalidToken => StatusCode::NOT_FOUND,
            ConfirmError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ConfirmError::InvalidToken => "Invalid confirmation token",
            ConfirmError::Storage(_) => "Confirmation failed",
        };
        HttpResponse::build(self.status_code()).json(ApiResponse::failure(message))
    }
}

#[derive(thiserror::Error)]
pub enum UnsubscribeError {
    #[error("There is no subscriber with the supplied unsubscribe token.")]
    InvalidToken,
    #[error("Failed to remove the subscription.")]
    Storage(#[from] StoreError),
}

impl std::fmt::Debug for UnsubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for UnsubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            UnsubscribeError::InvalidToken => StatusCode::NOT_FOUND,
            UnsubscribeError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            UnsubscribeError::InvalidToken => "Invalid unsubscribe token",
            UnsubscribeError::Storage(_) => "Unsubscribe failed",
        };
        HttpResponse::build(self.status_code()).json(ApiResponse::failure(message))
    }
}
