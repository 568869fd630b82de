use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, MESSAGES},
    errors::AppResult,
    models::domain::Message,
};

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: Message) -> AppResult<Message>;
    /// Oldest first.
    async fn list_conversation(&self, parent_id: &str, teacher_id: &str)
        -> AppResult<Vec<Message>>;
}

pub struct MongoMessageRepository {
    collection: Collection<Message>,
}

impl MongoMessageRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(MESSAGES);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let model = IndexModel::builder()
            .keys(doc! { "parent_id": 1, "teacher_id": 1, "created_at": 1 })
            .options(
                IndexOptions::builder()
                    .name("conversation_created_at".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(model).await?;
        Ok(())
    }
}

#[async_trait]
impl MessageRepository for MongoMessageRepository {
    async fn create(&self, message: Message) -> AppResult<Message> {
        self.collection.insert_one(&message).await?;
        Ok(message)
    }

    async fn list_conversation(
        &self,
        parent_id: &str,
        teacher_id: &str,
    ) -> AppResult<Vec<Message>> {
        let cursor = self
            .collection
            .find(doc! { "parent_id": parent_id, "teacher_id": teacher_id })
            .sort(doc! { "created_at": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
