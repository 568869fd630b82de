use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

use crate::{
    constants::prompts::{
        multiple_choice_grading_prompt, open_ended_grading_prompt, GRADING_MAX_TOKENS,
        GRADING_NO_FEEDBACK, GRADING_TEMPERATURE,
    },
    errors::{AppError, AppResult},
    models::dto::{request::ChatMessageDto, response::GradeResponse},
    services::model_service::{CompletionModel, CompletionRequest},
};

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```[a-zA-Z]*\s*(.*?)\s*```\s*$").expect("CODE_FENCE is a valid regex")
});

/// Reads `{score, feedback}` out of a model reply. A reply that is not a JSON
/// object comes back whole as feedback with no score.
pub fn parse_grade_reply(text: &str) -> GradeResponse {
    let body = CODE_FENCE
        .captures(text)
        .and_then(|c| c.get(1))
        .map_or(text, |m| m.as_str());

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => GradeResponse {
            score: fields.get("score").and_then(Value::as_f64),
            feedback: fields
                .get("feedback")
                .and_then(Value::as_str)
                .unwrap_or(GRADING_NO_FEEDBACK)
                .to_string(),
        },
        _ => GradeResponse {
            score: None,
            feedback: text.to_string(),
        },
    }
}

fn response_format() -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "grade",
            "schema": schemars::schema_for!(GradeResponse),
        }
    })
}

pub struct GradingService {
    model: Arc<dyn CompletionModel>,
}

impl GradingService {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    /// `answer_type` `mcq` grades 0 or 1, anything else 0 to 100.
    pub async fn grade(
        &self,
        question: Option<&str>,
        answer: Option<&str>,
        answer_type: Option<&str>,
    ) -> AppResult<GradeResponse> {
        let (question, answer) = match (question, answer) {
            (Some(q), Some(a)) if !q.is_empty() && !a.is_empty() => (q, a),
            _ => {
                return Err(AppError::ValidationError(
                    "Missing question or answer".to_string(),
                ))
            }
        };

        let prompt = if answer_type == Some("mcq") {
            multiple_choice_grading_prompt(question, answer)
        } else {
            open_ended_grading_prompt(question, answer)
        };

        let reply = self
            .model
            .complete(CompletionRequest {
                messages: vec![ChatMessageDto {
                    role: "user".to_string(),
                    content: prompt,
                }],
                temperature: GRADING_TEMPERATURE,
                max_tokens: GRADING_MAX_TOKENS,
                response_format: Some(response_format()),
            })
            .await?;

        Ok(parse_grade_reply(reply.as_deref().unwrap_or("")))
    }
}
