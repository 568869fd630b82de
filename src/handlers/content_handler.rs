//! Admin-only curriculum management.

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{
        LessonListQuery, LessonRequest, QuestionListQuery, QuestionRequest, SubjectRequest,
        TopicListQuery, TopicRequest,
    },
};

#[get("/api/admin/subjects")]
async fn list_subjects(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let subjects = state.content_service.list_subjects().await?;
    Ok(HttpResponse::Ok().json(subjects))
}

#[post("/api/admin/subjects")]
async fn create_subject(
    state: web::Data<AppState>,
    request: web::Json<SubjectRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let subject = state
        .content_service
        .create_subject(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(subject))
}

#[put("/api/admin/subjects/{id}")]
async fn update_subject(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubjectRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let subject = state
        .content_service
        .update_subject(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(subject))
}

#[delete("/api/admin/subjects/{id}")]
async fn delete_subject(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.content_service.delete_subject(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/admin/topics")]
async fn list_topics(
    state: web::Data<AppState>,
    query: web::Query<TopicListQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let topics = state.content_service.list_topics(&query.subject_id).await?;
    Ok(HttpResponse::Ok().json(topics))
}

#[post("/api/admin/topics")]
async fn create_topic(
    state: web::Data<AppState>,
    request: web::Json<TopicRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let topic = state.content_service.create_topic(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(topic))
}

#[put("/api/admin/topics/{id}")]
async fn update_topic(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<TopicRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let topic = state
        .content_service
        .update_topic(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(topic))
}

#[delete("/api/admin/topics/{id}")]
async fn delete_topic(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.content_service.delete_topic(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/admin/lessons")]
async fn list_lessons(
    state: web::Data<AppState>,
    query: web::Query<LessonListQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let lessons = state.content_service.list_lessons(&query.topic_id).await?;
    Ok(HttpResponse::Ok().json(lessons))
}

#[post("/api/admin/lessons")]
async fn create_lesson(
    state: web::Data<AppState>,
    request: web::Json<LessonRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let lesson = state
        .content_service
        .create_lesson(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(lesson))
}

#[put("/api/admin/lessons/{id}")]
async fn update_lesson(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<LessonRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let lesson = state
        .content_service
        .update_lesson(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(lesson))
}

#[delete("/api/admin/lessons/{id}")]
async fn delete_lesson(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.content_service.delete_lesson(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/admin/questions")]
async fn list_questions(
    state: web::Data<AppState>,
    query: web::Query<QuestionListQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let questions = state.content_service.list_questions(&query).await?;
    Ok(HttpResponse::Ok().json(questions))
}

#[post("/api/admin/questions")]
async fn create_question(
    state: web::Data<AppState>,
    request: web::Json<QuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let question = state
        .content_service
        .create_question(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(question))
}

#[put("/api/admin/questions/{id}")]
async fn update_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<QuestionRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    let question = state
        .content_service
        .update_question(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(question))
}

#[delete("/api/admin/questions/{id}")]
async fn delete_question(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;
    state.content_service.delete_question(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
