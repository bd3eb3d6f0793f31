//! Delivery records.

use chrono::{DateTime, Utc};
use emporia_core::Identify;
use serde::{Deserialize, Serialize};

/// A delivery job for one order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    /// Server-assigned identity.
    #[serde(rename = "_id")]
    pub id: String,
    /// The order being delivered.
    #[serde(rename = "orderId")]
    pub order_id: String,
    /// Assigned courier, once dispatched.
    #[serde(default)]
    pub courier: Option<String>,
    /// Destination address.
    pub address: String,
    /// Delivery progress.
    pub status: DeliveryStatus,
    /// Expected arrival, when the courier has committed to one.
    #[serde(rename = "estimatedAt", default)]
    pub estimated_at: Option<DateTime<Utc>>,
}

/// Progress of a delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Created, no courier yet.
    Pending,
    /// Courier assigned.
    Assigned,
    /// On the road.
    InTransit,
    /// Dropped off.
    Delivered,
    /// Attempted and failed.
    Failed,
}

impl DeliveryStatus {
    /// Wire representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
        }
    }
}

/// Fields for creating a delivery; the server assigns the identity.
#[derive(Clone, Debug, Serialize)]
pub struct DeliveryDraft {
    /// The order being delivered.
    #[serde(rename = "orderId")]
    pub order_id: String,
    /// Destination address.
    pub address: String,
}

impl Identify for Delivery {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wire_delivery() {
        let json = r#"{
            "_id": "d3",
            "orderId": "o1",
            "courier": "northwind",
            "address": "12 Elm St",
            "status": "in_transit"
        }"#;
        let delivery: Delivery = serde_json::from_str(json).unwrap();
        assert_eq!(delivery.id, "d3");
        assert_eq!(delivery.status, DeliveryStatus::InTransit);
        assert_eq!(delivery.courier.as_deref(), Some("northwind"));
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&DeliveryStatus::InTransit).unwrap(),
            "\"in_transit\""
        );
        assert_eq!(DeliveryStatus::InTransit.as_str(), "in_transit");
    }
}
