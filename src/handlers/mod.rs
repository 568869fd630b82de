pub mod ai_handler;
pub mod assessment_handler;
pub mod billing_handler;
pub mod content_handler;
pub mod graphql_handler;
pub mod health_handler;
pub mod learning_handler;
pub mod message_handler;
pub mod parent_handler;
pub mod profile_handler;

use actix_web::{web, HttpResponse};

use crate::errors::AppError;

pub use health_handler::{health_check, health_check_live, health_check_ready};

/// Malformed JSON bodies get the same `{error, code}` 400 as other
/// validation failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid request body: {}", err)).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid query string: {}", err)).into()
    })
}

pub async fn method_not_allowed() -> Result<HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed)
}

/// Registers every route. The proxy endpoints are resources so that any
/// other method gets a 405 instead of a 404.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(health_check)
        .service(health_check_ready)
        .service(health_check_live)
        .service(
            web::resource("/ai-tutor")
                .route(web::post().to(ai_handler::ai_tutor))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/ai-assessment")
                .route(web::post().to(ai_handler::ai_assessment))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/save-assessment")
                .route(web::post().to(assessment_handler::save_assessment))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/lemon-squeezy-webhook")
                .route(web::post().to(billing_handler::lemon_squeezy_webhook))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/lemon-squeezy-customer-portal")
                .route(web::post().to(billing_handler::lemon_squeezy_customer_portal))
                .default_service(web::to(method_not_allowed)),
        )
        .service(message_handler::message_stream)
        .service(
            web::resource("/messages")
                .route(web::get().to(message_handler::list_messages))
                .route(web::post().to(message_handler::send_message))
                .default_service(web::to(method_not_allowed)),
        )
        .service(profile_handler::create_profile)
        .service(profile_handler::get_profile)
        .service(profile_handler::my_achievements)
        .service(profile_handler::my_recent_activity)
        .service(profile_handler::record_activity)
        .service(profile_handler::list_users)
        .service(profile_handler::change_role)
        .service(assessment_handler::assessment_status)
        .service(assessment_handler::start_assessment)
        .service(assessment_handler::current_assessment_step)
        .service(assessment_handler::begin_assessment)
        .service(assessment_handler::answer_assessment_question)
        .service(assessment_handler::next_assessment_question)
        .service(learning_handler::get_learning_path)
        .service(learning_handler::get_lesson)
        .service(learning_handler::complete_lesson)
        .service(learning_handler::start_quiz)
        .service(learning_handler::current_quiz_question)
        .service(learning_handler::answer_quiz_question)
        .service(learning_handler::next_quiz_question)
        .service(parent_handler::list_children)
        .service(parent_handler::add_child)
        .service(parent_handler::child_overview)
        .service(parent_handler::subscription_status)
        .service(content_handler::list_subjects)
        .service(content_handler::create_subject)
        .service(content_handler::update_subject)
        .service(content_handler::delete_subject)
        .service(content_handler::list_topics)
        .service(content_handler::create_topic)
        .service(content_handler::update_topic)
        .service(content_handler::delete_topic)
        .service(content_handler::list_lessons)
        .service(content_handler::create_lesson)
        .service(content_handler::update_lesson)
        .service(content_handler::delete_lesson)
        .service(content_handler::list_questions)
        .service(content_handler::create_question)
        .service(content_handler::update_question)
        .service(content_handler::delete_question)
        .service(graphql_handler::graphql)
        .service(graphql_handler::graphiql);
}
