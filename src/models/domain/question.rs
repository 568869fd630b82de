use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Labels of the two fixed true/false choices, by option index.
pub const TRUE_FALSE_LABELS: [&str; 2] = ["True", "False"];

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionOption {
    pub text: String,
}

/// Where a question is attached. Exactly one level of the curriculum.
///
/// Stored as a single `lesson_id`, `topic_id` or `subject_id` field. When a
/// record carries more than one, the most specific level wins.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum QuestionScope {
    Lesson { lesson_id: String },
    Topic { topic_id: String },
    Subject { subject_id: String },
}

impl QuestionScope {
    pub fn field_and_id(&self) -> (&'static str, &str) {
        match self {
            QuestionScope::Lesson { lesson_id } => ("lesson_id", lesson_id),
            QuestionScope::Topic { topic_id } => ("topic_id", topic_id),
            QuestionScope::Subject { subject_id } => ("subject_id", subject_id),
        }
    }
}

/// Type-specific payload. Each variant carries only what grading it needs.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "question_type", rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<QuestionOption>,
        correct_option_index: usize,
    },
    /// `correct_answer_text` is the literal `"true"` or `"false"`.
    TrueFalse { correct_answer_text: String },
    ShortAnswer { correct_answer_text: String },
}

impl QuestionKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => "multiple_choice",
            QuestionKind::TrueFalse { .. } => "true_false",
            QuestionKind::ShortAnswer { .. } => "short_answer",
        }
    }

    /// Labels a student chooses from. Empty for free-text questions.
    pub fn choice_labels(&self) -> Vec<String> {
        match self {
            QuestionKind::MultipleChoice { options, .. } => {
                options.iter().map(|o| o.text.clone()).collect()
            }
            QuestionKind::TrueFalse { .. } => {
                TRUE_FALSE_LABELS.iter().map(|l| l.to_string()).collect()
            }
            QuestionKind::ShortAnswer { .. } => Vec::new(),
        }
    }

    /// Human-readable correct answer, shown after the question is answered.
    pub fn correct_answer_label(&self) -> Option<String> {
        match self {
            QuestionKind::MultipleChoice {
                options,
                correct_option_index,
            } => options.get(*correct_option_index).map(|o| o.text.clone()),
            QuestionKind::TrueFalse {
                correct_answer_text,
            } => match correct_answer_text.as_str() {
                "true" => Some(TRUE_FALSE_LABELS[0].to_string()),
                "false" => Some(TRUE_FALSE_LABELS[1].to_string()),
                _ => None,
            },
            QuestionKind::ShortAnswer {
                correct_answer_text,
            } => Some(correct_answer_text.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    #[serde(flatten)]
    pub scope: QuestionScope,
    pub question_text: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub difficulty: i32,
    #[serde(default)]
    pub grade_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default)]
    pub standard_codes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Question {
    pub fn new(scope: QuestionScope, question_text: &str, kind: QuestionKind, difficulty: i32) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            scope,
            question_text: question_text.to_string(),
            kind,
            difficulty,
            grade_level: String::new(),
            explanation: None,
            standard_codes: Vec::new(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn with_explanation(mut self, explanation: &str) -> Self {
        self.explanation = Some(explanation.to_string());
        self
    }
}
