//! The state record a resource container owns and mutates.
//!
//! [`ResourceState`] is plain data plus the reconciliation rules that the
//! container engine applies after each resolved request. The rules are pure
//! so they can be tested without a gateway:
//!
//! - create prepends the server's returned entity (newest first);
//! - update replaces in place by identity, preserving position, and is a
//!   silent no-op when the identity is not on the loaded page;
//! - delete removes by identity but leaves `page.total` stale until the next
//!   list fetch (accepted product behavior, not corrected client-side);
//! - any filter change resets the page cursor to 1.

use std::collections::BTreeMap;

use serde_json::Number;

use crate::page::PageState;
use crate::traits::Identify;

/// Resource-specific aggregates, opaque to the container.
///
/// Keyed by aggregate name; values are whatever numbers the server's
/// `/stats` endpoint reports.
pub type StatMap = BTreeMap<String, Number>;

/// In-memory state for one REST resource.
#[derive(Clone, Debug)]
pub struct ResourceState<T> {
    /// Currently loaded page of records, in server order.
    pub items: Vec<T>,
    /// Latest stats snapshot for this resource.
    pub stats: StatMap,
    /// The last single-record fetch/selection result.
    pub current: Option<T>,
    /// True strictly between dispatch of a request and its resolution.
    pub loading: bool,
    /// Latest failure message; cleared on the next successful resolution.
    pub error: Option<String>,
    /// Pagination cursor, rebuilt from each list envelope.
    pub page: PageState,
    /// Active list filters, merged incrementally.
    pub filters: BTreeMap<String, String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            stats: StatMap::new(),
            current: None,
            loading: false,
            error: None,
            page: PageState::default(),
            filters: BTreeMap::new(),
        }
    }
}

impl<T> ResourceState<T> {
    /// Create an empty, at-rest state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a partial filter set and reset the page cursor to 1.
    ///
    /// Changing any filter invalidates the meaning of the previous page,
    /// so the reset is unconditional.
    pub fn merge_filters<I, K, V>(&mut self, partial: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in partial {
            self.filters.insert(key.into(), value.into());
        }
        self.page.page = 1;
    }

    /// Set the page cursor without bounds validation.
    ///
    /// Out-of-range values are passed through to the next list fetch; the
    /// server clamps or rejects them.
    pub fn set_page(&mut self, page: u32) {
        self.page.page = page;
    }

    /// Clear the error message.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

impl<T: Identify> ResourceState<T> {
    /// Prepend a freshly created record (newest-first visibility).
    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Replace a record in place by identity, preserving its position.
    ///
    /// Also replaces `current` when its identity matches. Returns false
    /// when the identity is not on the loaded page, which is a no-op, not
    /// an error: the record may live on a different page.
    pub fn replace(&mut self, item: T) -> bool
    where
        T: Clone,
    {
        if let Some(cur) = &self.current {
            if cur.id() == item.id() {
                self.current = Some(item.clone());
            }
        }
        match self.items.iter_mut().find(|it| it.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove a record by identity.
    ///
    /// `page.total` is deliberately not adjusted; it stays stale until the
    /// next list fetch.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|it| it.id() != id);
        if let Some(cur) = &self.current {
            if cur.id() == id {
                self.current = None;
            }
        }
        self.items.len() < before
    }
}
