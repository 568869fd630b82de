use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One finished stretch of study, shown as recent activity on the dashboards.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LearningSession {
    pub id: String,
    pub student_id: String,
    pub subject: String,
    pub activity_type: String,
    pub duration_minutes: i64,
    pub points_earned: i64,
    /// Percentage, 0 to 100.
    pub accuracy: f64,
    pub completed_at: DateTime<Utc>,
}

impl LearningSession {
    pub fn new(student_id: &str, subject: &str, activity_type: &str) -> Self {
        LearningSession {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            subject: subject.to_string(),
            activity_type: activity_type.to_string(),
            duration_minutes: 0,
            points_earned: 0,
            accuracy: 0.0,
            completed_at: Utc::now(),
        }
    }
}
