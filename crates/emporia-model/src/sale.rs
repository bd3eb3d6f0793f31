//! Sales reporting records.

use chrono::{DateTime, Utc};
use emporia_core::Identify;
use serde::{Deserialize, Serialize};

/// One settled sale, as reported by the sales endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Server-assigned identity.
    #[serde(rename = "_id")]
    pub id: String,
    /// The order this sale settled.
    #[serde(rename = "orderId")]
    pub order_id: String,
    /// Settled amount.
    pub amount: f64,
    /// Number of line items settled.
    #[serde(rename = "itemsCount", default)]
    pub items_count: u32,
    /// Settlement time.
    #[serde(rename = "soldAt", default)]
    pub sold_at: Option<DateTime<Utc>>,
}

impl Identify for SaleRecord {
    fn id(&self) -> &str {
        &self.id
    }
}
