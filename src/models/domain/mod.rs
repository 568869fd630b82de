pub mod achievement;
pub mod assessment;
pub mod curriculum;
pub mod learning_session;
pub mod message;
pub mod progress;
pub mod question;
pub mod student;
pub mod subscription;
pub mod user;

pub use achievement::Achievement;
pub use assessment::{
    AnswerRecord, Assessment, AssessmentResult, AssessmentSnapshot, AssessmentType,
    LearningPathState,
};
pub use curriculum::{Lesson, LessonContent, Subject, Topic};
pub use learning_session::LearningSession;
pub use message::Message;
pub use progress::{LearningProgress, ProgressSnapshot};
pub use question::{Question, QuestionKind, QuestionOption, QuestionScope};
pub use student::{Parent, Student, SubscriptionStatus};
pub use subscription::Subscription;
pub use user::{User, UserRole};
