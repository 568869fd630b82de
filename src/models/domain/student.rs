use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_WEEKLY_GOAL: i32 = 20;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Student {
    pub id: String,
    /// Set when the student signed up with their own account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Set when a parent added the student as a child.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub grade: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    pub points: i64,
    pub streak_days: i32,
    pub weekly_goal: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Student {
    /// Student record for a self-registered account. The record shares the
    /// account id so progress keyed by the session subject lines up.
    pub fn for_account(user_id: &str, grade: Option<&str>) -> Self {
        Student {
            id: user_id.to_string(),
            user_id: Some(user_id.to_string()),
            parent_id: None,
            first_name: None,
            last_name: None,
            grade: grade.unwrap_or("K").to_string(),
            date_of_birth: None,
            points: 0,
            streak_days: 0,
            weekly_goal: DEFAULT_WEEKLY_GOAL,
            created_at: Some(Utc::now()),
        }
    }

    pub fn new_child(
        parent_id: &str,
        first_name: &str,
        last_name: &str,
        grade: &str,
        date_of_birth: Option<NaiveDate>,
    ) -> Self {
        Student {
            id: Uuid::new_v4().to_string(),
            user_id: None,
            parent_id: Some(parent_id.to_string()),
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            grade: grade.to_string(),
            date_of_birth,
            points: 0,
            streak_days: 0,
            weekly_goal: DEFAULT_WEEKLY_GOAL,
            created_at: Some(Utc::now()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Free,
    Paid,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Parent {
    /// Same as the parent's account id.
    pub id: String,
    /// Ordered by the time each child was added.
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub subscription_status: SubscriptionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Parent {
    pub fn new(user_id: &str) -> Self {
        let now = Utc::now();
        Parent {
            id: user_id.to_string(),
            children: Vec::new(),
            subscription_status: SubscriptionStatus::Free,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn has_child(&self, student_id: &str) -> bool {
        self.children.iter().any(|c| c == student_id)
    }
}
