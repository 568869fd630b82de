pub mod activity_service;
pub mod assessment_flow;
pub mod assessment_service;
pub mod billing_service;
pub mod content_service;
pub mod grading_service;
pub mod learning_path_service;
pub mod message_feed;
pub mod messaging_service;
pub mod model_service;
pub mod parent_service;
pub mod quiz_engine;
pub mod quiz_service;
pub mod session_store;
pub mod tutor_service;
pub mod user_service;
