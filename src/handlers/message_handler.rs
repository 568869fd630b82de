use actix_web::{get, http::header, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{AuthenticatedUser, Session},
    errors::{AppError, AppResult},
    models::dto::request::{ConversationQuery, SendMessageRequest},
};

/// Only the two participants (or an admin) see a conversation.
fn require_participant(session: &Session, parent_id: &str, teacher_id: &str) -> AppResult<()> {
    if session.is_admin() || session.user_id == parent_id || session.user_id == teacher_id {
        return Ok(());
    }
    Err(AppError::Forbidden(
        "You are not part of this conversation".to_string(),
    ))
}

pub async fn list_messages(
    state: web::Data<AppState>,
    query: web::Query<ConversationQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    query.validate()?;
    require_participant(&auth.0, &query.parent_id, &query.teacher_id)?;

    let messages = state
        .messaging_service
        .list(&query.parent_id, &query.teacher_id)
        .await?;
    Ok(HttpResponse::Ok().json(messages))
}

pub async fn send_message(
    state: web::Data<AppState>,
    request: web::Json<SendMessageRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    require_participant(&auth.0, &request.parent_id, &request.teacher_id)?;

    let message = state.messaging_service.send(request).await?;
    Ok(HttpResponse::Created().json(message))
}

#[get("/messages/stream")]
async fn message_stream(
    state: web::Data<AppState>,
    query: web::Query<ConversationQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    query.validate()?;
    require_participant(&auth.0, &query.parent_id, &query.teacher_id)?;

    log::info!(
        "User {} subscribed to conversation {}/{}",
        auth.0.user_id,
        query.parent_id,
        query.teacher_id
    );
    let events = state
        .messaging_service
        .feed()
        .subscribe(&query.parent_id, &query.teacher_id);

    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .streaming(events))
}
