use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::{
        domain::{Subscription, SubscriptionStatus},
        dto::request::WebhookEnvelope,
    },
    repositories::{ParentRepository, SubscriptionRepository},
};

pub const SUBSCRIPTION_CREATED: &str = "subscription_created";
pub const SUBSCRIPTION_UPDATED: &str = "subscription_updated";
pub const SUBSCRIPTION_CANCELLED: &str = "subscription_cancelled";

#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// A provider-hosted page where the customer manages their subscription.
    async fn customer_portal_url(&self, customer_id: &str) -> AppResult<String>;
}

pub struct LemonSqueezyClient {
    http: reqwest::Client,
    api_key: SecretString,
    api_base: String,
}

impl LemonSqueezyClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            api_key: config.lemon_squeezy_api_key.clone(),
            api_base: config.lemon_squeezy_api_base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl BillingProvider for LemonSqueezyClient {
    async fn customer_portal_url(&self, customer_id: &str) -> AppResult<String> {
        let response = self
            .http
            .post(format!("{}/v1/customer_portal", self.api_base))
            .bearer_auth(self.api_key.expose_secret())
            .json(&json!({ "customer_id": customer_id }))
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await?;
            return Err(AppError::Upstream(body));
        }

        let body: Value = response.json().await?;
        body.pointer("/data/attributes/url")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::Upstream("Payment provider response has no portal URL".to_string())
            })
    }
}

pub struct BillingService {
    provider: Arc<dyn BillingProvider>,
    parents: Arc<dyn ParentRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl BillingService {
    pub fn new(
        provider: Arc<dyn BillingProvider>,
        parents: Arc<dyn ParentRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            provider,
            parents,
            subscriptions,
        }
    }

    pub async fn customer_portal_url(&self, customer_id: Option<&str>) -> AppResult<String> {
        let customer_id = customer_id
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::ValidationError("Missing customerId".to_string()))?;
        self.provider.customer_portal_url(customer_id).await
    }

    /// Applies a provider event. Delivering the same event again leaves the
    /// same state behind.
    pub async fn handle_webhook(&self, event: &WebhookEnvelope) -> AppResult<()> {
        let (parent_id, event_name) = match (event.parent_id(), event.event_name()) {
            (Some(p), Some(e)) => (p, e),
            _ => {
                return Err(AppError::ValidationError(
                    "Missing parentId or eventType".to_string(),
                ))
            }
        };

        match event_name {
            SUBSCRIPTION_CREATED | SUBSCRIPTION_UPDATED => {
                let active = event.status() == Some("active");
                let status = if active {
                    SubscriptionStatus::Paid
                } else {
                    SubscriptionStatus::Free
                };
                if !self.parents.set_subscription_status(parent_id, status).await? {
                    log::warn!("Webhook {} for unknown parent {}", event_name, parent_id);
                }

                match event.subscription_id() {
                    Some(subscription_id) => {
                        let attributes = event.attributes();
                        self.subscriptions
                            .upsert(Subscription {
                                subscription_id: subscription_id.to_string(),
                                parent_id: parent_id.to_string(),
                                plan_type: attributes.and_then(|a| a.variant_name.clone()),
                                price: attributes.and_then(|a| a.total),
                                is_active: active,
                                updated_at: Utc::now(),
                            })
                            .await?;
                    }
                    None => log::warn!(
                        "Webhook {} for parent {} has no subscription id",
                        event_name,
                        parent_id
                    ),
                }
                log::info!("Parent {} subscription is now {:?}", parent_id, status);
            }
            SUBSCRIPTION_CANCELLED => {
                self.parents
                    .set_subscription_status(parent_id, SubscriptionStatus::Free)
                    .await?;
                if let Some(subscription_id) = event.subscription_id() {
                    self.subscriptions.deactivate(subscription_id).await?;
                }
                log::info!("Parent {} subscription cancelled", parent_id);
            }
            other => log::info!("Ignoring webhook event {}", other),
        }

        Ok(())
    }
}
