use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::domain::{
    Achievement, LearningSession, Lesson, Parent, ProgressSnapshot, Question, Student, User,
};

use super::request::ChatMessageDto;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, SimpleObject)]
pub struct ProgressDto {
    pub completed: bool,
    pub score: f64,
    pub time_spent: i64,
}

impl From<ProgressSnapshot> for ProgressDto {
    fn from(snapshot: ProgressSnapshot) -> Self {
        ProgressDto {
            completed: snapshot.completed,
            score: snapshot.score,
            time_spent: snapshot.time_spent,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct LessonSummaryDto {
    pub id: String,
    pub title: String,
    pub content_type: String,
    pub order: i32,
    pub estimated_duration_minutes: Option<i32>,
    pub progress: ProgressDto,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct TopicPathDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub order: i32,
    pub lessons: Vec<LessonSummaryDto>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct SubjectPathDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub topics: Vec<TopicPathDto>,
}

/// Subject → topic → lesson tree with one progress entry per lesson.
/// `subjects` stays empty while the initial assessment is outstanding.
#[derive(Debug, Clone, Default, Serialize, SimpleObject)]
pub struct LearningPathDto {
    pub assessment_required: bool,
    pub subjects: Vec<SubjectPathDto>,
}

impl LearningPathDto {
    pub fn lessons(&self) -> impl Iterator<Item = &LessonSummaryDto> {
        self.subjects
            .iter()
            .flat_map(|s| s.topics.iter())
            .flat_map(|t| t.lessons.iter())
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct LessonDto {
    pub id: String,
    pub topic_id: String,
    pub title: String,
    pub content_type: String,
    pub content_markdown: Option<String>,
    pub content_url: Option<String>,
    pub estimated_duration_minutes: Option<i32>,
    pub order: i32,
}

impl From<Lesson> for LessonDto {
    fn from(lesson: Lesson) -> Self {
        LessonDto {
            content_type: lesson.content.content_type().to_string(),
            content_markdown: lesson.content.markdown().map(str::to_string),
            content_url: lesson.content.url().map(str::to_string),
            id: lesson.id,
            topic_id: lesson.topic_id,
            title: lesson.title,
            estimated_duration_minutes: lesson.estimated_duration_minutes,
            order: lesson.order,
        }
    }
}

/// A question as a student sees it, without the answer.
#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
pub struct QuestionView {
    pub id: String,
    pub question_text: String,
    pub question_type: String,
    pub options: Vec<String>,
    pub difficulty: i32,
    pub grade_level: String,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        QuestionView {
            id: question.id.clone(),
            question_text: question.question_text.clone(),
            question_type: question.kind.type_name().to_string(),
            options: question.kind.choice_labels(),
            difficulty: question.difficulty,
            grade_level: question.grade_level.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct LessonDetailDto {
    pub lesson: LessonDto,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentQuestionView {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub subject: String,
}

/// Where an assessment flow stands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AssessmentStepDto {
    Intro {
        grade: String,
        total_questions: usize,
    },
    Questions {
        question_index: usize,
        total_questions: usize,
        question: AssessmentQuestionView,
        /// Set once the current question has been submitted.
        feedback: Option<String>,
    },
    Complete {
        score: usize,
        total: usize,
        percentage: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentFeedbackDto {
    pub correct: bool,
    pub feedback: String,
    pub correct_index: usize,
    pub is_last: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentCompleteDto {
    pub score: usize,
    pub total: usize,
    pub percentage: i32,
    /// False when the record could not be written. The flow completes anyway.
    pub saved: bool,
    pub proceed_after_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizQuestionDto {
    pub question_index: usize,
    pub total_questions: usize,
    pub question: QuestionView,
    pub answered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizAnswerDto {
    pub correct: bool,
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
    pub score: usize,
    pub is_last: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SimpleObject)]
pub struct QuizSummaryDto {
    pub score: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TutorResponse {
    pub message: ChatMessageDto,
}

/// Grading reply. `score` is `null` when the model reply was not gradable,
/// which callers must read as "ungraded" rather than zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GradeResponse {
    pub score: Option<f64>,
    pub feedback: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReceivedResponse {
    pub received: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortalResponse {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionStatusDto {
    pub is_premium: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileDto {
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<Student>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Parent>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AchievementDto {
    pub id: String,
    pub achievement_type: String,
    pub title: String,
    pub description: Option<String>,
    pub achieved_at: DateTime<Utc>,
}

impl From<Achievement> for AchievementDto {
    fn from(a: Achievement) -> Self {
        AchievementDto {
            id: a.id,
            achievement_type: a.achievement_type,
            title: a.title,
            description: a.description,
            achieved_at: a.achieved_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityDto {
    pub subject: String,
    pub activity_type: String,
    pub duration_minutes: i64,
    pub points_earned: i64,
    pub accuracy: f64,
    pub completed_at: DateTime<Utc>,
}

impl From<LearningSession> for ActivityDto {
    fn from(s: LearningSession) -> Self {
        ActivityDto {
            subject: s.subject,
            activity_type: s.activity_type,
            duration_minutes: s.duration_minutes,
            points_earned: s.points_earned,
            accuracy: s.accuracy,
            completed_at: s.completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChildOverviewDto {
    pub student: Student,
    pub completed_lessons: usize,
    pub total_lessons: usize,
    /// Mean score over completed lessons, 0 when none are completed.
    pub average_score: f64,
    pub achievements: Vec<AchievementDto>,
    /// Newest first.
    pub recent_activity: Vec<ActivityDto>,
}
