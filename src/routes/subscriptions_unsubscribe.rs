use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::domain::SubscriptionToken;
use crate::subscription::{SubscriptionService, UnsubscribeError};

use super::types::ApiResponse;

#[derive(Deserialize)]
pub struct Parameters {
    token: SubscriptionToken,
}

#[tracing::instrument(name = "Removing a subscriber.", skip(parameters, service))]
pub async fn unsubscribe(
    parameters: web::Query<Parameters>,
    service: web::Data<SubscriptionService>,
) -> Result<HttpResponse, UnsubscribeError> {
    service.unsubscribe(&parameters.token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("You have been successfully unsubscribed")))
}
