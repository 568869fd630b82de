use actix_web::{get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, require_role, AuthenticatedUser},
    errors::AppError,
    models::{
        domain::UserRole,
        dto::request::{ChangeRoleRequest, CreateProfileRequest, RecordActivityRequest},
    },
};

#[post("/api/profile")]
async fn create_profile(
    state: web::Data<AppState>,
    request: web::Json<CreateProfileRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state
        .user_service
        .create_profile(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(profile))
}

#[get("/api/profile")]
async fn get_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state.user_service.get_profile(&auth.0.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[get("/api/students/me/achievements")]
async fn my_achievements(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let achievements = state.user_service.achievements(&auth.0.user_id).await?;
    Ok(HttpResponse::Ok().json(achievements))
}

#[get("/api/students/me/activity")]
async fn my_recent_activity(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_role(&auth.0, UserRole::Student)?;

    let activity = state.activity_service.recent(&auth.0.user_id).await?;
    Ok(HttpResponse::Ok().json(activity))
}

#[post("/api/students/me/activity")]
async fn record_activity(
    state: web::Data<AppState>,
    request: web::Json<RecordActivityRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_role(&auth.0, UserRole::Student)?;

    let activity = state
        .activity_service
        .record(&auth.0.user_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(activity))
}

#[get("/api/admin/users")]
async fn list_users(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let users = state.user_service.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[put("/api/admin/users/{id}/role")]
async fn change_role(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<ChangeRoleRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let user = state
        .user_service
        .change_role(&auth.0.user_id, &id, request.into_inner().role)
        .await?;
    Ok(HttpResponse::Ok().json(user))
}
