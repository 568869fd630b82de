use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Local mirror of a payment-provider subscription, keyed by the provider id.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Subscription {
    pub subscription_id: String,
    pub parent_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}
