use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::{Database, SUBSCRIPTIONS},
    errors::AppResult,
    models::domain::Subscription,
};

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert or replace by provider subscription id.
    async fn upsert(&self, subscription: Subscription) -> AppResult<()>;
    /// Returns false when the subscription is unknown.
    async fn deactivate(&self, subscription_id: &str) -> AppResult<bool>;
    async fn find_by_id(&self, subscription_id: &str) -> AppResult<Option<Subscription>>;
}

pub struct MongoSubscriptionRepository {
    collection: Collection<Subscription>,
}

impl MongoSubscriptionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(SUBSCRIPTIONS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let model = IndexModel::builder()
            .keys(doc! { "subscription_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("subscription_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(model).await?;
        Ok(())
    }
}

#[async_trait]
impl SubscriptionRepository for MongoSubscriptionRepository {
    async fn upsert(&self, subscription: Subscription) -> AppResult<()> {
        self.collection
            .replace_one(
                doc! { "subscription_id": subscription.subscription_id.as_str() },
                &subscription,
            )
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn deactivate(&self, subscription_id: &str) -> AppResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "subscription_id": subscription_id },
                doc! { "$set": {
                    "is_active": false,
                    "updated_at": to_bson(&chrono::Utc::now())?,
                } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn find_by_id(&self, subscription_id: &str) -> AppResult<Option<Subscription>> {
        Ok(self
            .collection
            .find_one(doc! { "subscription_id": subscription_id })
            .await?)
    }
}
