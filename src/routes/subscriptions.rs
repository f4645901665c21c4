use actix_web::{HttpResponse, web};

use crate::domain::NewSubscriber;
use crate::subscription::{SubscribeError, SubscriptionService};

use super::types::{ApiResponse, SubscribeRequest};

impl TryFrom<SubscribeRequest> for NewSubscriber {
    type Error = String;

    fn try_from(request: SubscribeRequest) -> Result<Self, Self::Error> {
        NewSubscriber::parse(request.email, request.gdpr_consent)
    }
}

#[tracing::instrument(
    name = "Handling a subscribe request.",
    skip(body, service),
    fields(subscriber_email = %body.email)
)]
pub async fn subscribe(
    body: web::Json<SubscribeRequest>,
    service: web::Data<SubscriptionService>,
) -> Result<HttpResponse, SubscribeError> {
    let new_subscriber: NewSubscriber =
        body.0.try_into().map_err(SubscribeError::ValidationError)?;

    service.subscribe(new_subscriber).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        "Please check your email to confirm your subscription",
    )))
}
