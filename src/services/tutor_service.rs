use std::sync::Arc;

use serde_json::Value;

use crate::{
    constants::prompts::{
        TUTOR_FALLBACK_REPLY, TUTOR_MAX_TOKENS, TUTOR_SYSTEM_PROMPT, TUTOR_TEMPERATURE,
    },
    errors::{AppError, AppResult},
    models::dto::request::ChatMessageDto,
    services::model_service::{CompletionModel, CompletionRequest},
};

pub struct TutorService {
    model: Arc<dyn CompletionModel>,
}

impl TutorService {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    /// Answers the latest turn of a conversation. The whole history comes in
    /// with every call; nothing is kept between calls.
    pub async fn reply(&self, messages: Option<Value>, user_id: Option<&str>) -> AppResult<ChatMessageDto> {
        let history = parse_history(messages)?;

        log::info!(
            "Tutor request from {} with {} messages",
            user_id.unwrap_or("anonymous"),
            history.len()
        );

        let mut prompt = Vec::with_capacity(history.len() + 1);
        prompt.push(ChatMessageDto {
            role: "system".to_string(),
            content: TUTOR_SYSTEM_PROMPT.to_string(),
        });
        prompt.extend(history);

        let reply = self
            .model
            .complete(CompletionRequest {
                messages: prompt,
                temperature: TUTOR_TEMPERATURE,
                max_tokens: TUTOR_MAX_TOKENS,
                response_format: None,
            })
            .await?;

        Ok(ChatMessageDto {
            role: "assistant".to_string(),
            content: reply.unwrap_or_else(|| TUTOR_FALLBACK_REPLY.to_string()),
        })
    }
}

/// Anything but `user` is sent to the model as an assistant turn.
fn parse_history(messages: Option<Value>) -> AppResult<Vec<ChatMessageDto>> {
    let invalid = || AppError::ValidationError("Invalid messages format".to_string());

    let messages = match messages {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(invalid()),
    };

    messages
        .into_iter()
        .map(|item| {
            let message: ChatMessageDto = serde_json::from_value(item).map_err(|_| invalid())?;
            let role = if message.role == "user" { "user" } else { "assistant" };
            Ok(ChatMessageDto {
                role: role.to_string(),
                content: message.content,
            })
        })
        .collect()
}
