use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::domain::SubscriptionToken;
use crate::subscription::{ConfirmError, SubscriptionService};

use super::types::ApiResponse;

#[derive(Deserialize)]
pub struct Parameters {
    token: SubscriptionToken,
}

#[tracing::instrument(name = "Confirming a pending subscriber.", skip(parameters, service))]
pub async fn confirm(
    parameters: web::Query<Parameters>,
    service: web::Data<SubscriptionService>,
) -> Result<HttpResponse, ConfirmError> {
    service.confirm(&parameters.token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Your subscription has been confirmed")))
}
