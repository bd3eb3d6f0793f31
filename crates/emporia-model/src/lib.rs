//! Emporia Model — typed records for the retail API wire contract.
//!
//! One module per REST resource. Every record type carries an explicit
//! schema and decodes at the gateway boundary, so a malformed server
//! response fails fast with a typed error instead of propagating missing
//! fields into consumers. Records are opaque to the container engine beyond
//! the [`Identify`](emporia_core::Identify) implementation.
//!
//! Wire conventions: Mongo-style `_id` identity fields and camelCase
//! member names, handled with serde renames.

pub mod delivery;
pub mod order;
pub mod product;
pub mod sale;
pub mod user;

pub use delivery::{Delivery, DeliveryDraft, DeliveryStatus};
pub use order::{Order, OrderCustomer, OrderLine, OrderStatus};
pub use product::{Product, ProductCategory, ProductDraft};
pub use sale::SaleRecord;
pub use user::{User, UserDraft, UserRole};
