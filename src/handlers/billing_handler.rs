use actix_web::{web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_role, AuthenticatedUser},
    errors::AppError,
    models::{
        domain::UserRole,
        dto::{
            request::{CustomerPortalRequest, WebhookEnvelope},
            response::{PortalResponse, ReceivedResponse},
        },
    },
};

/// Called by the payment provider, so there is no user session here.
pub async fn lemon_squeezy_webhook(
    state: web::Data<AppState>,
    event: web::Json<WebhookEnvelope>,
) -> Result<HttpResponse, AppError> {
    state.billing_service.handle_webhook(&event).await?;
    Ok(HttpResponse::Ok().json(ReceivedResponse { received: true }))
}

pub async fn lemon_squeezy_customer_portal(
    state: web::Data<AppState>,
    request: web::Json<CustomerPortalRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_role(&auth.0, UserRole::Parent)?;

    let url = state
        .billing_service
        .customer_portal_url(request.customer_id.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(PortalResponse { url }))
}
