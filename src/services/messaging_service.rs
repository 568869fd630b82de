use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::AppResult,
    models::{domain::Message, dto::request::SendMessageRequest},
    repositories::MessageRepository,
    services::message_feed::MessageFeed,
};

pub struct MessagingService {
    messages: Arc<dyn MessageRepository>,
    feed: MessageFeed,
}

impl MessagingService {
    pub fn new(messages: Arc<dyn MessageRepository>, feed: MessageFeed) -> Self {
        Self { messages, feed }
    }

    pub fn feed(&self) -> &MessageFeed {
        &self.feed
    }

    pub async fn list(&self, parent_id: &str, teacher_id: &str) -> AppResult<Vec<Message>> {
        self.messages.list_conversation(parent_id, teacher_id).await
    }

    /// Stores the message, then pushes it to live subscribers.
    pub async fn send(&self, mut request: SendMessageRequest) -> AppResult<Message> {
        request.content = request.content.trim().to_string();
        request.validate()?;
        let message = Message::new(&request.parent_id, &request.teacher_id, &request.content);
        let message = self.messages.create(message).await?;
        self.feed.publish(message.clone());
        Ok(message)
    }
}
