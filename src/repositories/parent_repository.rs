use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::{Database, PARENTS},
    errors::{AppError, AppResult},
    models::domain::{Parent, SubscriptionStatus},
};

#[async_trait]
pub trait ParentRepository: Send + Sync {
    async fn create(&self, parent: Parent) -> AppResult<Parent>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Parent>>;
    /// Appends to the ordered child list. Adding the same child twice is a no-op.
    async fn add_child(&self, parent_id: &str, student_id: &str) -> AppResult<Parent>;
    /// Returns false when no parent has this id.
    async fn set_subscription_status(
        &self,
        parent_id: &str,
        status: SubscriptionStatus,
    ) -> AppResult<bool>;
}

pub struct MongoParentRepository {
    collection: Collection<Parent>,
}

impl MongoParentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(PARENTS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let model = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created indexes for parents collection");

        Ok(())
    }
}

#[async_trait]
impl ParentRepository for MongoParentRepository {
    async fn create(&self, parent: Parent) -> AppResult<Parent> {
        self.collection.insert_one(&parent).await?;
        Ok(parent)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Parent>> {
        let parent = self.collection.find_one(doc! { "id": id }).await?;
        Ok(parent)
    }

    async fn add_child(&self, parent_id: &str, student_id: &str) -> AppResult<Parent> {
        let result = self
            .collection
            .update_one(
                doc! { "id": parent_id },
                doc! {
                    "$addToSet": { "children": student_id },
                    "$set": { "updated_at": to_bson(&chrono::Utc::now())? },
                },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Parent '{}' not found", parent_id)));
        }

        self.find_by_id(parent_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Parent '{}' not found", parent_id)))
    }

    async fn set_subscription_status(
        &self,
        parent_id: &str,
        status: SubscriptionStatus,
    ) -> AppResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "id": parent_id },
                doc! { "$set": {
                    "subscription_status": to_bson(&status)?,
                    "updated_at": to_bson(&chrono::Utc::now())?,
                } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }
}
