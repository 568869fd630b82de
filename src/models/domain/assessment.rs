use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentType {
    /// The one-time diagnostic that gates the learning path.
    Initial,
    AdHoc,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub selected_index: usize,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssessmentSnapshot {
    pub answers: Vec<AnswerRecord>,
    pub grade: String,
    pub subjects_tested: Vec<String>,
}

/// Immutable record of one completed assessment attempt.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Assessment {
    pub id: String,
    pub student_id: String,
    pub assessment_type: AssessmentType,
    /// Percentage in `[0, 100]`.
    pub score: i32,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub completed: bool,
    pub assessment_data: AssessmentSnapshot,
    pub created_at: DateTime<Utc>,
}

impl Assessment {
    pub fn initial(
        student_id: &str,
        score: i32,
        total_questions: i32,
        correct_answers: i32,
        assessment_data: AssessmentSnapshot,
    ) -> Self {
        Assessment {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            assessment_type: AssessmentType::Initial,
            score,
            total_questions,
            correct_answers,
            completed: true,
            assessment_data,
            created_at: Utc::now(),
        }
    }
}

/// Row written by the save-assessment endpoint. Score and feedback come from
/// AI grading and may be missing when the model reply was not gradable.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AssessmentResult {
    pub id: String,
    pub student_id: String,
    pub question_id: String,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AssessmentResult {
    pub fn new(
        student_id: &str,
        question_id: &str,
        score: Option<f64>,
        feedback: Option<String>,
    ) -> Self {
        AssessmentResult {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            question_id: question_id.to_string(),
            score,
            feedback,
            created_at: Utc::now(),
        }
    }
}

/// Where a student currently is. One per student.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LearningPathState {
    pub student_id: String,
    pub current_topic: String,
    pub progress: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl LearningPathState {
    pub fn new(student_id: &str, current_topic: &str, progress: serde_json::Value) -> Self {
        LearningPathState {
            student_id: student_id.to_string(),
            current_topic: current_topic.to_string(),
            progress,
            updated_at: Utc::now(),
        }
    }
}
