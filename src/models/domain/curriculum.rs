use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Subject {
    pub fn new(name: &str, description: Option<&str>) -> Self {
        Subject {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at: Some(Utc::now()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Topic {
    pub id: String,
    pub subject_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Topic {
    pub fn new(subject_id: &str, name: &str, description: Option<&str>, order: i32) -> Self {
        Topic {
            id: Uuid::new_v4().to_string(),
            subject_id: subject_id.to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
            order,
            created_at: Some(Utc::now()),
        }
    }
}

/// What a lesson renders. The tag is stored as `content_type`; only the field
/// belonging to the tag is kept.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "content_type", rename_all = "snake_case")]
pub enum LessonContent {
    Markdown { content_markdown: String },
    Video { content_url: String },
    QuizLink { content_url: String },
}

impl LessonContent {
    pub fn content_type(&self) -> &'static str {
        match self {
            LessonContent::Markdown { .. } => "markdown",
            LessonContent::Video { .. } => "video",
            LessonContent::QuizLink { .. } => "quiz_link",
        }
    }

    /// Builds the content from the flat admin form fields.
    pub fn from_parts(content_type: &str, body: &str) -> Option<Self> {
        let body = body.trim().to_string();
        match content_type {
            "markdown" => Some(LessonContent::Markdown {
                content_markdown: body,
            }),
            "video" => Some(LessonContent::Video { content_url: body }),
            "quiz_link" => Some(LessonContent::QuizLink { content_url: body }),
            _ => None,
        }
    }

    pub fn markdown(&self) -> Option<&str> {
        match self {
            LessonContent::Markdown { content_markdown } => Some(content_markdown),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            LessonContent::Video { content_url } | LessonContent::QuizLink { content_url } => {
                Some(content_url)
            }
            LessonContent::Markdown { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Lesson {
    pub id: String,
    pub topic_id: String,
    pub title: String,
    #[serde(flatten)]
    pub content: LessonContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration_minutes: Option<i32>,
    /// Unique within the topic.
    pub order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Lesson {
    pub fn new(
        topic_id: &str,
        title: &str,
        content: LessonContent,
        order: i32,
        estimated_duration_minutes: Option<i32>,
    ) -> Self {
        Lesson {
            id: Uuid::new_v4().to_string(),
            topic_id: topic_id.to_string(),
            title: title.to_string(),
            content,
            estimated_duration_minutes,
            order,
            created_at: Some(Utc::now()),
        }
    }
}
