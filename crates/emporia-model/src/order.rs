//! Order records.
//!
//! Orders embed a customer snapshot and line items as delivered by the
//! server; no client-side referential integrity is enforced against the
//! users or products collections.

use chrono::{DateTime, Utc};
use emporia_core::Identify;
use serde::{Deserialize, Serialize};

/// A placed order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Server-assigned identity.
    #[serde(rename = "_id")]
    pub id: String,
    /// Customer snapshot embedded by the server, when expanded.
    #[serde(default)]
    pub user: Option<OrderCustomer>,
    /// Line items.
    #[serde(default)]
    pub items: Vec<OrderLine>,
    /// Order total.
    pub total: f64,
    /// Fulfilment status.
    pub status: OrderStatus,
    /// Placement time.
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Customer snapshot embedded in an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderCustomer {
    /// Identity of the user who placed the order.
    #[serde(rename = "_id")]
    pub id: String,
    /// Name at placement time.
    pub name: String,
    /// Email at placement time.
    #[serde(default)]
    pub email: Option<String>,
}

/// One line item of an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product identity.
    #[serde(rename = "productId")]
    pub product_id: String,
    /// Product name at placement time.
    pub name: String,
    /// Quantity ordered.
    pub quantity: u32,
    /// Unit price at placement time.
    pub price: f64,
}

/// Fulfilment status of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet handled.
    Pending,
    /// Being prepared.
    Processing,
    /// Handed to the courier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Cancelled before fulfilment.
    Cancelled,
}

impl OrderStatus {
    /// Wire representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Identify for Order {
    fn id(&self) -> &str {
        &self.id
    }
}
