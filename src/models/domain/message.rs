use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Message {
    pub id: String,
    pub parent_id: String,
    pub teacher_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(parent_id: &str, teacher_id: &str, content: &str) -> Self {
        Message {
            id: Uuid::new_v4().to_string(),
            parent_id: parent_id.to_string(),
            teacher_id: teacher_id.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn belongs_to(&self, parent_id: &str, teacher_id: &str) -> bool {
        self.parent_id == parent_id && self.teacher_id == teacher_id
    }
}
