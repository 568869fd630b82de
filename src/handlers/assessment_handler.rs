use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_role, require_self_or_admin, AuthenticatedUser},
    errors::AppError,
    models::{
        domain::UserRole,
        dto::{
            request::{SaveAssessmentRequest, SubmitAssessmentAnswerRequest, ValidSaveAssessment},
            response::SuccessResponse,
        },
    },
};

#[get("/api/assessment/status")]
async fn assessment_status(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let completed = state
        .assessment_service
        .has_completed_initial(&auth.0.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "completed": completed })))
}

#[post("/api/assessment/start")]
async fn start_assessment(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_role(&auth.0, UserRole::Student)?;

    let step = state.assessment_service.start(&auth.0.user_id).await?;
    Ok(HttpResponse::Ok().json(step))
}

#[get("/api/assessment")]
async fn current_assessment_step(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let step = state.assessment_service.current(&auth.0.user_id).await?;
    Ok(HttpResponse::Ok().json(step))
}

#[post("/api/assessment/begin")]
async fn begin_assessment(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let step = state.assessment_service.begin(&auth.0.user_id).await?;
    Ok(HttpResponse::Ok().json(step))
}

#[post("/api/assessment/answer")]
async fn answer_assessment_question(
    state: web::Data<AppState>,
    request: web::Json<SubmitAssessmentAnswerRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let feedback = state
        .assessment_service
        .submit_answer(&auth.0.user_id, request.selected_index)
        .await?;
    Ok(HttpResponse::Ok().json(feedback))
}

#[post("/api/assessment/next")]
async fn next_assessment_question(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let next = state.assessment_service.advance(&auth.0.user_id).await?;
    Ok(HttpResponse::Ok().json(next))
}

/// Stores one graded answer and the student's path position.
pub async fn save_assessment(
    state: web::Data<AppState>,
    request: web::Json<SaveAssessmentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = ValidSaveAssessment::try_from(request.into_inner())?;
    require_self_or_admin(&auth.0, &request.student_id)?;

    state.assessment_service.save_result(request).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}
