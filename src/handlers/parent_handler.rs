use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_role, AuthenticatedUser},
    errors::AppError,
    models::{
        domain::UserRole,
        dto::{request::AddChildRequest, response::SubscriptionStatusDto},
    },
};

#[get("/api/parent/children")]
async fn list_children(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_role(&auth.0, UserRole::Parent)?;

    let children = state.parent_service.list_children(&auth.0.user_id).await?;
    Ok(HttpResponse::Ok().json(children))
}

#[post("/api/parent/children")]
async fn add_child(
    state: web::Data<AppState>,
    request: web::Json<AddChildRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_role(&auth.0, UserRole::Parent)?;

    let child = state
        .parent_service
        .add_child(&auth.0.user_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(child))
}

#[get("/api/parent/children/{id}/overview")]
async fn child_overview(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_role(&auth.0, UserRole::Parent)?;

    let overview = state
        .parent_service
        .child_overview(&auth.0.user_id, &id)
        .await?;
    Ok(HttpResponse::Ok().json(overview))
}

#[get("/api/subscription")]
async fn subscription_status(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_role(&auth.0, UserRole::Parent)?;

    let is_premium = state.parent_service.is_premium(&auth.0.user_id).await?;
    Ok(HttpResponse::Ok().json(SubscriptionStatusDto { is_premium }))
}
