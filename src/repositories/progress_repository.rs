use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    options::IndexOptions,
    Collection, IndexModel,
};
use uuid::Uuid;

use crate::{
    db::{Database, LEARNING_PROGRESS},
    errors::{AppError, AppResult},
    models::domain::LearningProgress,
};

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn find_for_student(&self, student_id: &str) -> AppResult<Vec<LearningProgress>>;
    /// Upsert keyed by (student, lesson). Repeating it leaves one completed row.
    async fn mark_completed(&self, student_id: &str, lesson_id: &str)
        -> AppResult<LearningProgress>;
}

pub struct MongoProgressRepository {
    collection: Collection<LearningProgress>,
}

impl MongoProgressRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(LEARNING_PROGRESS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let model = IndexModel::builder()
            .keys(doc! { "student_id": 1, "lesson_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("student_lesson_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created indexes for learning_progress collection");

        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for MongoProgressRepository {
    async fn find_for_student(&self, student_id: &str) -> AppResult<Vec<LearningProgress>> {
        let cursor = self
            .collection
            .find(doc! { "student_id": student_id })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn mark_completed(
        &self,
        student_id: &str,
        lesson_id: &str,
    ) -> AppResult<LearningProgress> {
        let now = to_bson(&chrono::Utc::now())?;
        let filter = doc! { "student_id": student_id, "lesson_id": lesson_id };

        self.collection
            .update_one(
                filter.clone(),
                doc! {
                    "$set": {
                        "completed": true,
                        "completed_at": now.clone(),
                        "updated_at": now,
                    },
                    "$setOnInsert": {
                        "id": Uuid::new_v4().to_string(),
                        "score": 0.0,
                        "time_spent": 0_i64,
                    },
                },
            )
            .upsert(true)
            .await?;

        self.collection.find_one(filter).await?.ok_or_else(|| {
            AppError::InternalError(format!(
                "Progress for lesson '{}' missing after upsert",
                lesson_id
            ))
        })
    }
}
