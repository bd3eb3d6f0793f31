//! Per-resource REST descriptors.
//!
//! The admin API follows one URL convention for every resource:
//! `/{resource}` for lists and creation, `/{resource}/:id` for single
//! records, `/{resource}/:id/status` for the narrow status update, and
//! `/{resource}/stats` for aggregates. A [`ResourceDescriptor`] captures the
//! two points where resources differ: the path segment and the key under
//! which the list envelope nests its records (`{"orders": [..], ...}`).

/// Static description of one REST resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// URL path segment, e.g. `"orders"`.
    pub path: &'static str,
    /// Envelope key holding the record array, e.g. `"orders"`.
    pub collection_key: &'static str,
}

impl ResourceDescriptor {
    /// Create a descriptor.
    pub const fn new(path: &'static str, collection_key: &'static str) -> Self {
        Self {
            path,
            collection_key,
        }
    }

    /// Collection path: `/{resource}`.
    pub fn collection_path(&self) -> String {
        format!("/{}", self.path)
    }

    /// Single-record path: `/{resource}/:id`.
    pub fn item_path(&self, id: &str) -> String {
        format!("/{}/{}", self.path, id)
    }

    /// Status-update path: `/{resource}/:id/status`.
    pub fn status_path(&self, id: &str) -> String {
        format!("/{}/{}/status", self.path, id)
    }

    /// Stats path: `/{resource}/stats`.
    pub fn stats_path(&self) -> String {
        format!("/{}/stats", self.path)
    }
}
