use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_role, AuthenticatedUser},
    errors::AppError,
    models::{domain::UserRole, dto::request::QuizAnswerRequest},
};

/// An empty path (rather than an error) when storage cannot be read.
#[get("/api/learning-path")]
async fn get_learning_path(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_role(&auth.0, UserRole::Student)?;

    let path = state
        .learning_path_service
        .learning_path_or_empty(&auth.0.user_id)
        .await;
    Ok(HttpResponse::Ok().json(path))
}

#[get("/api/lessons/{id}")]
async fn get_lesson(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let lesson = state.learning_path_service.open_lesson(&id).await?;
    Ok(HttpResponse::Ok().json(lesson))
}

#[post("/api/lessons/{id}/complete")]
async fn complete_lesson(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_role(&auth.0, UserRole::Student)?;

    let path = state
        .learning_path_service
        .mark_complete(&auth.0.user_id, &id)
        .await?;
    Ok(HttpResponse::Ok().json(path))
}

#[post("/api/lessons/{id}/quiz")]
async fn start_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let question = state.quiz_service.start(&auth.0.user_id, &id).await?;
    Ok(HttpResponse::Ok().json(question))
}

#[get("/api/quiz")]
async fn current_quiz_question(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let question = state.quiz_service.current(&auth.0.user_id).await?;
    Ok(HttpResponse::Ok().json(question))
}

#[post("/api/quiz/answer")]
async fn answer_quiz_question(
    state: web::Data<AppState>,
    request: web::Json<QuizAnswerRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let feedback = state
        .quiz_service
        .answer(&auth.0.user_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(feedback))
}

#[post("/api/quiz/next")]
async fn next_quiz_question(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let next = state.quiz_service.advance(&auth.0.user_id).await?;
    Ok(HttpResponse::Ok().json(next))
}
