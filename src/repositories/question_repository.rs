use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, QUESTIONS},
    errors::{AppError, AppResult},
    models::domain::{Question, QuestionScope},
};

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Ordered by difficulty, easiest first.
    async fn list_by_scope(&self, scope: &QuestionScope) -> AppResult<Vec<Question>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Question>>;
    async fn create(&self, question: Question) -> AppResult<Question>;
    async fn update(&self, question: Question) -> AppResult<Question>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUESTIONS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(id_index).await?;

        for field in ["lesson_id", "topic_id", "subject_id"] {
            let scope_index = IndexModel::builder()
                .keys(doc! { field: 1, "difficulty": 1 })
                .options(
                    IndexOptions::builder()
                        .name(format!("{}_difficulty", field))
                        .sparse(true)
                        .build(),
                )
                .build();
            self.collection.create_index(scope_index).await?;
        }
        log::info!("Created indexes for questions collection");

        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn list_by_scope(&self, scope: &QuestionScope) -> AppResult<Vec<Question>> {
        let (field, id) = scope.field_and_id();
        let cursor = self
            .collection
            .find(doc! { field: id })
            .sort(doc! { "difficulty": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Question>> {
        Ok(self.collection.find_one(doc! { "id": id }).await?)
    }

    async fn create(&self, question: Question) -> AppResult<Question> {
        self.collection.insert_one(&question).await?;
        Ok(question)
    }

    async fn update(&self, question: Question) -> AppResult<Question> {
        let result = self
            .collection
            .replace_one(doc! { "id": question.id.as_str() }, &question)
            .await?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question '{}' not found",
                question.id
            )));
        }
        Ok(question)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Question '{}' not found", id)));
        }
        Ok(())
    }
}
