//! Operations dashboard aggregation.
//!
//! The dashboard reads across several resources but never mutates another
//! container's state: it issues independent parallel stats requests and
//! assembles the results at the point of read. A failed leg keeps its
//! previous snapshot; the first failure message is recorded as the
//! dashboard's error.

use emporia_core::StatMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::gateway::Gateway;
use crate::resources;

/// Stats snapshots assembled from the per-resource endpoints.
#[derive(Clone, Debug, Default)]
pub struct DashboardSnapshot {
    /// `/users/stats`.
    pub users: StatMap,
    /// `/products/stats`.
    pub products: StatMap,
    /// `/orders/stats`.
    pub orders: StatMap,
    /// `/sales/stats`.
    pub sales: StatMap,
}

struct Inner {
    snapshot: DashboardSnapshot,
    loading: bool,
    error: Option<String>,
}

/// The dashboard container.
#[derive(Clone)]
pub struct Dashboard {
    gateway: Gateway,
    inner: Arc<RwLock<Inner>>,
}

impl Dashboard {
    /// Create an empty dashboard.
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            inner: Arc::new(RwLock::new(Inner {
                snapshot: DashboardSnapshot::default(),
                loading: false,
                error: None,
            })),
        }
    }

    /// Snapshot of the assembled stats.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.inner.read().await.snapshot.clone()
    }

    /// True strictly while a refresh is in flight.
    pub async fn loading(&self) -> bool {
        self.inner.read().await.loading
    }

    /// Latest refresh error, if any.
    pub async fn error(&self) -> Option<String> {
        self.inner.read().await.error.clone()
    }

    /// Refresh all four stats legs in parallel.
    ///
    /// Successful legs replace their snapshot wholesale; failed legs keep
    /// the previous one. The error field carries the first failure, or is
    /// cleared when every leg succeeded.
    pub async fn refresh(&self) {
        {
            let mut inner = self.inner.write().await;
            inner.loading = true;
            inner.error = None;
        }

        let (users, products, orders, sales) = futures::join!(
            self.gateway.fetch_stats(&resources::USERS),
            self.gateway.fetch_stats(&resources::PRODUCTS),
            self.gateway.fetch_stats(&resources::ORDERS),
            self.gateway.fetch_stats(&resources::SALES),
        );

        let mut inner = self.inner.write().await;
        let mut first_error = None;
        let mut apply = |slot: &mut StatMap, leg: emporia_core::Result<StatMap>| match leg {
            Ok(stats) => *slot = stats,
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e.to_string());
                }
            }
        };
        apply(&mut inner.snapshot.users, users);
        apply(&mut inner.snapshot.products, products);
        apply(&mut inner.snapshot.orders, orders);
        apply(&mut inner.snapshot.sales, sales);

        inner.loading = false;
        inner.error = first_error;
    }
}
