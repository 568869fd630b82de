use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::errors::AppError;
use crate::models::domain::{
    LessonContent, QuestionKind, QuestionOption, QuestionScope, UserRole,
};

/// Distinguishes a field sent as `null` (`Some(None)`) from one left out
/// (`None`). Pair with `#[serde(default)]`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub role: String,
    pub content: String,
}

/// `messages` is kept raw so a non-array value gets a specific 400.
#[derive(Debug, Clone, Deserialize)]
pub struct TutorRequest {
    #[serde(default)]
    pub messages: Option<serde_json::Value>,
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradeAnswerRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    /// `mcq`, anything else grades as open-ended.
    #[serde(default, rename = "type")]
    pub answer_type: Option<String>,
}

/// Every field is required. `score` and `feedback` may be sent as `null`
/// (ungraded) but must not be left out.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveAssessmentRequest {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub question_id: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub score: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub feedback: Option<Option<String>>,
    #[serde(default)]
    pub current_topic: Option<String>,
    #[serde(default)]
    pub progress: Option<serde_json::Value>,
}

/// A save-assessment request with every required field checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSaveAssessment {
    pub student_id: String,
    pub question_id: String,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub current_topic: String,
    pub progress: serde_json::Value,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<SaveAssessmentRequest> for ValidSaveAssessment {
    type Error = AppError;

    fn try_from(req: SaveAssessmentRequest) -> Result<Self, Self::Error> {
        let missing = || AppError::ValidationError("Missing required fields".to_string());

        let progress = req.progress.filter(|p| !p.is_null()).ok_or_else(missing)?;
        Ok(ValidSaveAssessment {
            student_id: non_empty(req.student_id).ok_or_else(missing)?,
            question_id: non_empty(req.question_id).ok_or_else(missing)?,
            score: req.score.ok_or_else(missing)?,
            feedback: req.feedback.ok_or_else(missing)?,
            current_topic: non_empty(req.current_topic).ok_or_else(missing)?,
            progress,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerPortalRequest {
    #[serde(default, rename = "customerId")]
    pub customer_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookCustomData {
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookMeta {
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub custom_data: Option<WebhookCustomData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookAttributes {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub variant_name: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub custom_data: Option<WebhookCustomData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: Option<WebhookAttributes>,
}

/// Payment-provider event envelope. Only the fields the webhook reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEnvelope {
    #[serde(default)]
    pub meta: Option<WebhookMeta>,
    #[serde(default)]
    pub data: Option<WebhookData>,
}

impl WebhookEnvelope {
    pub fn event_name(&self) -> Option<&str> {
        self.meta.as_ref()?.event_name.as_deref().filter(|e| !e.is_empty())
    }

    /// Read from the subscription attributes, then from the event meta.
    pub fn parent_id(&self) -> Option<&str> {
        let from_attributes = self
            .attributes()
            .and_then(|a| a.custom_data.as_ref())
            .and_then(|c| c.parent_id.as_deref());
        let from_meta = self
            .meta
            .as_ref()
            .and_then(|m| m.custom_data.as_ref())
            .and_then(|c| c.parent_id.as_deref());
        from_attributes.or(from_meta).filter(|p| !p.is_empty())
    }

    pub fn subscription_id(&self) -> Option<&str> {
        self.data.as_ref()?.id.as_deref()
    }

    pub fn attributes(&self) -> Option<&WebhookAttributes> {
        self.data.as_ref()?.attributes.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.attributes()?.status.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1))]
    pub parent_id: String,
    #[validate(length(min = 1))]
    pub teacher_id: String,
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConversationQuery {
    #[validate(length(min = 1))]
    pub parent_id: String,
    #[validate(length(min = 1))]
    pub teacher_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAssessmentAnswerRequest {
    pub selected_index: usize,
}

/// One of the two fields is used depending on the question type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizAnswerRequest {
    #[serde(default)]
    pub selected_index: Option<usize>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub role: UserRole,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(min = 1, max = 2))]
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddChildRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(min = 1, max = 2))]
    pub grade: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

/// A finished activity reported by the student client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordActivityRequest {
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    #[validate(length(min = 1, max = 50))]
    pub activity_type: String,
    #[validate(range(min = 0, max = 1440))]
    pub duration_minutes: i64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub points_earned: i64,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default)]
    pub accuracy: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubjectRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TopicRequest {
    #[validate(length(min = 1))]
    pub subject_id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub order: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopicListQuery {
    pub subject_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LessonRequest {
    #[validate(length(min = 1))]
    pub topic_id: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub content_type: String,
    #[serde(default)]
    pub content_markdown: Option<String>,
    #[serde(default)]
    #[validate(url)]
    pub content_url: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, max = 600))]
    pub estimated_duration_minutes: Option<i32>,
    #[validate(range(min = 0))]
    pub order: i32,
}

impl LessonRequest {
    /// Picks the field that belongs to `content_type`. The other one is ignored.
    pub fn content(&self) -> Result<LessonContent, AppError> {
        let body = match self.content_type.as_str() {
            "markdown" => self.content_markdown.as_deref(),
            "video" | "quiz_link" => self.content_url.as_deref(),
            other => {
                return Err(AppError::ValidationError(format!(
                    "Unknown content type '{}'",
                    other
                )))
            }
        };
        let body = body.filter(|b| !b.trim().is_empty()).ok_or_else(|| {
            AppError::ValidationError(format!(
                "Content type '{}' requires {}",
                self.content_type,
                if self.content_type == "markdown" {
                    "content_markdown"
                } else {
                    "content_url"
                }
            ))
        })?;
        LessonContent::from_parts(&self.content_type, body)
            .ok_or_else(|| AppError::ValidationError("Invalid lesson content".to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LessonListQuery {
    pub topic_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionOptionInput {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// Flat admin form for a question. Converted into the tagged domain shape.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuestionRequest {
    #[serde(default)]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub topic_id: Option<String>,
    #[serde(default)]
    pub lesson_id: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub question_text: String,
    pub question_type: String,
    #[serde(default)]
    pub options: Vec<QuestionOptionInput>,
    #[serde(default)]
    pub correct_answer_text: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub difficulty: i32,
    #[serde(default)]
    pub grade_level: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub standard_codes: Vec<String>,
}

impl QuestionRequest {
    pub fn scope(&self) -> Result<QuestionScope, AppError> {
        let scopes = [
            self.lesson_id.as_deref().map(|id| QuestionScope::Lesson {
                lesson_id: id.to_string(),
            }),
            self.topic_id.as_deref().map(|id| QuestionScope::Topic {
                topic_id: id.to_string(),
            }),
            self.subject_id.as_deref().map(|id| QuestionScope::Subject {
                subject_id: id.to_string(),
            }),
        ];
        let mut set = scopes.into_iter().flatten();
        match (set.next(), set.next()) {
            (Some(scope), None) => Ok(scope),
            (None, _) => Err(AppError::ValidationError(
                "A question needs a subject, topic or lesson".to_string(),
            )),
            (Some(_), Some(_)) => Err(AppError::ValidationError(
                "A question belongs to exactly one of subject, topic or lesson".to_string(),
            )),
        }
    }

    pub fn kind(&self) -> Result<QuestionKind, AppError> {
        match self.question_type.as_str() {
            "multiple_choice" => {
                if self.options.len() < 2 {
                    return Err(AppError::ValidationError(
                        "Multiple choice needs at least two options".to_string(),
                    ));
                }
                if self.options.iter().any(|o| o.text.trim().is_empty()) {
                    return Err(AppError::ValidationError(
                        "Option text cannot be empty".to_string(),
                    ));
                }
                let correct: Vec<usize> = self
                    .options
                    .iter()
                    .enumerate()
                    .filter(|(_, o)| o.is_correct)
                    .map(|(i, _)| i)
                    .collect();
                let [correct_option_index] = correct[..] else {
                    return Err(AppError::ValidationError(
                        "Exactly one option must be correct".to_string(),
                    ));
                };
                Ok(QuestionKind::MultipleChoice {
                    options: self
                        .options
                        .iter()
                        .map(|o| QuestionOption {
                            text: o.text.trim().to_string(),
                        })
                        .collect(),
                    correct_option_index,
                })
            }
            "true_false" => match self
                .correct_answer_text
                .as_deref()
                .map(|a| a.trim().to_lowercase())
                .as_deref()
            {
                Some(answer @ ("true" | "false")) => Ok(QuestionKind::TrueFalse {
                    correct_answer_text: answer.to_string(),
                }),
                _ => Err(AppError::ValidationError(
                    "True/false questions need an answer of true or false".to_string(),
                )),
            },
            "short_answer" => {
                let answer = non_empty(self.correct_answer_text.clone()).ok_or_else(|| {
                    AppError::ValidationError(
                        "Short answer questions need the correct answer text".to_string(),
                    )
                })?;
                Ok(QuestionKind::ShortAnswer {
                    correct_answer_text: answer.trim().to_string(),
                })
            }
            other => Err(AppError::ValidationError(format!(
                "Unknown question type '{}'",
                other
            ))),
        }
    }
}

/// Lesson scope wins over topic, topic over subject.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionListQuery {
    #[serde(default)]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub topic_id: Option<String>,
    #[serde(default)]
    pub lesson_id: Option<String>,
}

impl QuestionListQuery {
    pub fn scope(&self) -> Option<QuestionScope> {
        if let Some(lesson_id) = &self.lesson_id {
            return Some(QuestionScope::Lesson {
                lesson_id: lesson_id.clone(),
            });
        }
        if let Some(topic_id) = &self.topic_id {
            return Some(QuestionScope::Topic {
                topic_id: topic_id.clone(),
            });
        }
        self.subject_id.as_ref().map(|subject_id| QuestionScope::Subject {
            subject_id: subject_id.clone(),
        })
    }
}
