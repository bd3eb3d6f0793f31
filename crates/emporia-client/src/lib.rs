//! Emporia Client — resource state containers over the retail admin API.
//!
//! The admin panel consumes one REST convention per resource (users,
//! products, orders, deliveries, sales): a paginated list, a stats
//! aggregate, and create/update/delete mutations. This crate implements the
//! list-query state pattern once, generically, instead of once per resource:
//!
//! - [`container::ResourceContainer`] — the generic engine translating
//!   intents (fetch, create, update, delete, filter, page) into state
//!   transitions over [`emporia_core::ResourceState`];
//! - [`gateway::Gateway`] — the typed HTTP surface, fire-once by design (no
//!   retry, backoff, caching, or deduplication);
//! - [`auth::AuthSession`] — the admin login/logout state machine with
//!   durable token storage;
//! - [`dashboard::Dashboard`] — point-of-read aggregation of several
//!   resources' stats via parallel, independent requests;
//! - [`resources`] — the thin per-resource configuration.
//!
//! Gateway failures never escape a container as errors: they are recorded in
//! the container's state (`error` string, prior data left intact) for the
//! consuming view to render. The only session-fatal condition is an
//! authentication rejection on a profile fetch, which clears the stored
//! token.

pub mod auth;
pub mod config;
pub mod container;
pub mod dashboard;
pub mod gateway;
pub mod resources;
pub mod testing;
pub mod token;
pub mod transport;

pub use auth::{AuthSession, AuthState};
pub use config::EmporiaConfig;
pub use container::ResourceContainer;
pub use dashboard::{Dashboard, DashboardSnapshot};
pub use gateway::{Gateway, ListPage};
pub use resources::{
    DeliveryContainer, OrderContainer, ProductContainer, SaleContainer, UserContainer,
};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use transport::{ApiRequest, HttpTransport, Method, Transport};

// Re-export the foundational crates so consumers need only one dependency.
pub use emporia_core as core;
pub use emporia_model as model;
