use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row per (student, lesson). Created on first completion and upserted
/// afterwards.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LearningProgress {
    pub id: String,
    pub student_id: String,
    pub lesson_id: String,
    pub completed: bool,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub time_spent: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl LearningProgress {
    pub fn completed_now(student_id: &str, lesson_id: &str) -> Self {
        let now = Utc::now();
        LearningProgress {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            lesson_id: lesson_id.to_string(),
            completed: true,
            score: 0.0,
            time_spent: 0,
            completed_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            completed: self.completed,
            score: self.score,
            time_spent: self.time_spent,
        }
    }
}

/// Progress as shown on the learning path. A lesson with no row yet reads as
/// the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ProgressSnapshot {
    pub completed: bool,
    pub score: f64,
    pub time_spent: i64,
}
