//! Per-resource configuration: descriptors, aliases, typed helpers.
//!
//! Everything resource-specific about the admin API lives here; the engine
//! in [`container`](crate::container) is shared. Adding a resource means
//! adding a descriptor, an alias, and a constructor.

use emporia_core::ResourceDescriptor;
use emporia_model::{Delivery, DeliveryStatus, Order, OrderStatus, Product, SaleRecord, User};

use crate::container::ResourceContainer;
use crate::gateway::Gateway;

/// `/users`.
pub const USERS: ResourceDescriptor = ResourceDescriptor::new("users", "users");
/// `/products`.
pub const PRODUCTS: ResourceDescriptor = ResourceDescriptor::new("products", "products");
/// `/orders`.
pub const ORDERS: ResourceDescriptor = ResourceDescriptor::new("orders", "orders");
/// `/deliveries`.
pub const DELIVERIES: ResourceDescriptor = ResourceDescriptor::new("deliveries", "deliveries");
/// `/sales`.
pub const SALES: ResourceDescriptor = ResourceDescriptor::new("sales", "sales");

/// Container over `/users`.
pub type UserContainer = ResourceContainer<User>;
/// Container over `/products`.
pub type ProductContainer = ResourceContainer<Product>;
/// Container over `/orders`.
pub type OrderContainer = ResourceContainer<Order>;
/// Container over `/deliveries`.
pub type DeliveryContainer = ResourceContainer<Delivery>;
/// Container over `/sales`.
pub type SaleContainer = ResourceContainer<SaleRecord>;

/// Users container.
pub fn users(gateway: Gateway) -> UserContainer {
    ResourceContainer::new(USERS, gateway)
}

/// Products container.
pub fn products(gateway: Gateway) -> ProductContainer {
    ResourceContainer::new(PRODUCTS, gateway)
}

/// Orders container.
pub fn orders(gateway: Gateway) -> OrderContainer {
    ResourceContainer::new(ORDERS, gateway)
}

/// Deliveries container.
pub fn deliveries(gateway: Gateway) -> DeliveryContainer {
    ResourceContainer::new(DELIVERIES, gateway)
}

/// Sales container.
pub fn sales(gateway: Gateway) -> SaleContainer {
    ResourceContainer::new(SALES, gateway)
}

impl OrderContainer {
    /// Change an order's fulfilment status
    /// (`PUT /orders/:id/status`).
    pub async fn update_order_status(&self, id: &str, status: OrderStatus) {
        self.update_status(id, status.as_str()).await;
    }
}

impl DeliveryContainer {
    /// Change a delivery's progress status
    /// (`PUT /deliveries/:id/status`).
    pub async fn update_delivery_status(&self, id: &str, status: DeliveryStatus) {
        self.update_status(id, status.as_str()).await;
    }
}
