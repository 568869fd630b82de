use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, ACHIEVEMENTS},
    errors::AppResult,
    models::domain::Achievement,
};

#[async_trait]
pub trait AchievementRepository: Send + Sync {
    /// Newest first.
    async fn list_for_student(&self, student_id: &str) -> AppResult<Vec<Achievement>>;
    async fn create(&self, achievement: Achievement) -> AppResult<Achievement>;
}

pub struct MongoAchievementRepository {
    collection: Collection<Achievement>,
}

impl MongoAchievementRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(ACHIEVEMENTS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let model = IndexModel::builder()
            .keys(doc! { "student_id": 1, "achieved_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("student_achieved_at".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(model).await?;
        Ok(())
    }
}

#[async_trait]
impl AchievementRepository for MongoAchievementRepository {
    async fn list_for_student(&self, student_id: &str) -> AppResult<Vec<Achievement>> {
        let cursor = self
            .collection
            .find(doc! { "student_id": student_id })
            .sort(doc! { "achieved_at": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn create(&self, achievement: Achievement) -> AppResult<Achievement> {
        self.collection.insert_one(&achievement).await?;
        Ok(achievement)
    }
}
