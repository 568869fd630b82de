use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use crate::{config::Config, errors::AppResult, models::dto::request::ChatMessageDto};

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessageDto>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// OpenAI `response_format` object, when structured output is wanted.
    pub response_format: Option<Value>,
}

/// A chat-completion backend. `Ok(None)` means the model answered with no text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> AppResult<Option<String>>;
}

pub struct OpenAiCompletionModel {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompletionModel {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.openai_api_key.expose_secret())
            .with_api_base(&config.openai_api_base);

        Self {
            client: Client::with_config(openai_config),
            model: config.ai_model.clone(),
        }
    }

    fn request_body(&self, request: &CompletionRequest) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": request.messages,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });
        if let Some(format) = &request.response_format {
            body["response_format"] = format.clone();
        }
        body
    }
}

#[async_trait]
impl CompletionModel for OpenAiCompletionModel {
    async fn complete(&self, request: CompletionRequest) -> AppResult<Option<String>> {
        let body = self.request_body(&request);
        let response: Value = self.client.chat().create_byot(body).await?;

        Ok(response
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string))
    }
}
