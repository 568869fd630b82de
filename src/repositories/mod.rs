pub mod achievement_repository;
pub mod assessment_repository;
pub mod curriculum_repository;
pub mod message_repository;
pub mod parent_repository;
pub mod progress_repository;
pub mod question_repository;
pub mod session_repository;
pub mod student_repository;
pub mod subscription_repository;
pub mod user_repository;

pub use achievement_repository::{AchievementRepository, MongoAchievementRepository};
pub use assessment_repository::{AssessmentRepository, MongoAssessmentRepository};
pub use curriculum_repository::{CurriculumRepository, MongoCurriculumRepository};
pub use message_repository::{MessageRepository, MongoMessageRepository};
pub use parent_repository::{MongoParentRepository, ParentRepository};
pub use progress_repository::{MongoProgressRepository, ProgressRepository};
pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use session_repository::{MongoSessionRepository, SessionRepository};
pub use student_repository::{MongoStudentRepository, StudentRepository};
pub use subscription_repository::{MongoSubscriptionRepository, SubscriptionRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
