use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, LEARNING_SESSIONS},
    errors::AppResult,
    models::domain::LearningSession,
};

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: LearningSession) -> AppResult<LearningSession>;
    /// Newest first, at most `limit` rows.
    async fn list_recent(&self, student_id: &str, limit: i64) -> AppResult<Vec<LearningSession>>;
}

pub struct MongoSessionRepository {
    collection: Collection<LearningSession>,
}

impl MongoSessionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(LEARNING_SESSIONS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let model = IndexModel::builder()
            .keys(doc! { "student_id": 1, "completed_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("student_completed_at".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(model).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for MongoSessionRepository {
    async fn create(&self, session: LearningSession) -> AppResult<LearningSession> {
        self.collection.insert_one(&session).await?;
        Ok(session)
    }

    async fn list_recent(&self, student_id: &str, limit: i64) -> AppResult<Vec<LearningSession>> {
        let cursor = self
            .collection
            .find(doc! { "student_id": student_id })
            .sort(doc! { "completed_at": -1 })
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
