use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Achievement {
    pub id: String,
    pub student_id: String,
    #[serde(rename = "type")]
    pub achievement_type: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub achieved_at: DateTime<Utc>,
}

impl Achievement {
    pub fn new(student_id: &str, achievement_type: &str, title: &str) -> Self {
        Achievement {
            id: Uuid::new_v4().to_string(),
            student_id: student_id.to_string(),
            achievement_type: achievement_type.to_string(),
            title: title.to_string(),
            description: None,
            achieved_at: Utc::now(),
        }
    }
}
