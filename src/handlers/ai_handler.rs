use actix_web::{web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{GradeAnswerRequest, TutorRequest},
        response::TutorResponse,
    },
};

/// `userId` in the body is informational; the caller is the session user.
pub async fn ai_tutor(
    state: web::Data<AppState>,
    request: web::Json<TutorRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let TutorRequest { messages, user_id } = request.into_inner();
    if let Some(claimed) = user_id.as_deref().filter(|id| *id != auth.0.user_id) {
        log::debug!(
            "Tutor request for {} sent by session user {}",
            claimed,
            auth.0.user_id
        );
    }

    let message = state
        .tutor_service
        .reply(messages, Some(auth.0.user_id.as_str()))
        .await?;
    Ok(HttpResponse::Ok().json(TutorResponse { message }))
}

pub async fn ai_assessment(
    state: web::Data<AppState>,
    request: web::Json<GradeAnswerRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let grade = state
        .grading_service
        .grade(
            request.question.as_deref(),
            request.answer.as_deref(),
            request.answer_type.as_deref(),
        )
        .await?;
    Ok(HttpResponse::Ok().json(grade))
}
