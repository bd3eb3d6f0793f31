//! The generic resource state container.
//!
//! One [`ResourceContainer`] owns the state of one REST resource and is its
//! sole mutator. Intents (fetch, create, update, delete, filter, page) are
//! async methods that resolve when the underlying request does; failures are
//! recorded in state (`error` string, prior data intact) and never returned
//! to the caller, so a transient list failure cannot flash an empty screen.
//!
//! # Stale responses
//!
//! Fetches carry a monotonically increasing sequence ticket per container.
//! A resolution whose ticket is no longer the latest issued is discarded
//! entirely: it neither overwrites newer data nor clears the newer
//! request's loading flag. List and single-record fetches share the
//! container's sequence; stats and mutations are not sequenced.
//!
//! # Mutations
//!
//! Reconciliation is optimistic-on-success: the server's returned entity is
//! the source of truth for that record only, with no follow-up list
//! refresh. After a delete, `page.total` stays stale until the next list
//! fetch.

use emporia_core::{Identify, ListParams, PageState, ResourceDescriptor, ResourceState};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::gateway::Gateway;

struct Inner<T> {
    state: RwLock<ResourceState<T>>,
    seq: AtomicU64,
}

/// State container for one REST resource.
///
/// Cheap to clone; clones share the same state.
pub struct ResourceContainer<T: Identify> {
    desc: ResourceDescriptor,
    gateway: Gateway,
    inner: Arc<Inner<T>>,
}

impl<T: Identify> Clone for ResourceContainer<T> {
    fn clone(&self) -> Self {
        Self {
            desc: self.desc,
            gateway: self.gateway.clone(),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> ResourceContainer<T>
where
    T: Identify + Clone + DeserializeOwned,
{
    /// Create a container for the described resource, empty and at rest.
    pub fn new(desc: ResourceDescriptor, gateway: Gateway) -> Self {
        Self {
            desc,
            gateway,
            inner: Arc::new(Inner {
                state: RwLock::new(ResourceState::new()),
                seq: AtomicU64::new(0),
            }),
        }
    }

    /// The descriptor this container serves.
    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.desc
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> ResourceState<T> {
        self.inner.state.read().await.clone()
    }

    // ------------------------------------------------------------------
    // Fetch intents
    // ------------------------------------------------------------------

    /// Fetch one page of records with explicit parameters.
    pub async fn fetch_list(&self, params: ListParams) {
        let limit = {
            let state = self.inner.state.read().await;
            params.limit_or(state.page.limit)
        };
        self.run_list_fetch(params.to_query(), limit).await;
    }

    /// Fetch the list described by the container's own filters and cursor.
    pub async fn refresh(&self) {
        let (query, limit) = {
            let state = self.inner.state.read().await;
            let mut query = vec![
                ("page".to_string(), state.page.page.to_string()),
                ("limit".to_string(), state.page.limit.to_string()),
            ];
            for (key, value) in &state.filters {
                query.push((key.clone(), value.clone()));
            }
            (query, state.page.limit)
        };
        self.run_list_fetch(query, limit).await;
    }

    async fn run_list_fetch(&self, query: Vec<(String, String)>, limit: u32) {
        let ticket = self.dispatch().await;
        let result = self.gateway.fetch_page::<T>(&self.desc, query).await;

        let mut state = self.inner.state.write().await;
        if self.is_stale(ticket) {
            log::debug!("{}: discarding stale list response", self.desc.path);
            return;
        }
        match result {
            Ok(page) => {
                state.items = page.items;
                state.page =
                    PageState::from_server(limit, page.total, page.total_pages, page.current_page);
                state.loading = false;
                state.error = None;
            }
            Err(e) => {
                // Items and pagination keep their previous values.
                state.loading = false;
                state.error = Some(e.to_string());
            }
        }
    }

    /// Fetch a single record into `current`.
    pub async fn fetch_one(&self, id: &str) {
        let ticket = self.dispatch().await;
        let result = self.gateway.fetch_item::<T>(&self.desc, id).await;

        let mut state = self.inner.state.write().await;
        if self.is_stale(ticket) {
            log::debug!("{}: discarding stale record response", self.desc.path);
            return;
        }
        match result {
            Ok(item) => {
                state.current = Some(item);
                state.loading = false;
                state.error = None;
            }
            Err(e) => {
                state.loading = false;
                state.error = Some(e.to_string());
            }
        }
    }

    /// Fetch the stats aggregate. Independent of list fetches; a failure
    /// never clears previously loaded records.
    pub async fn fetch_stats(&self) {
        let result = self.gateway.fetch_stats(&self.desc).await;
        let mut state = self.inner.state.write().await;
        match result {
            Ok(stats) => {
                state.stats = stats;
                state.error = None;
            }
            Err(e) => {
                state.error = Some(e.to_string());
            }
        }
    }

    // ------------------------------------------------------------------
    // Mutation intents
    // ------------------------------------------------------------------

    /// Create a record. On success the server's returned entity is
    /// prepended (newest-first visibility) without re-fetching the list.
    pub async fn create<B: Serialize + Sync>(&self, draft: &B) {
        let result = self.gateway.create::<T, B>(&self.desc, draft).await;
        let mut state = self.inner.state.write().await;
        match result {
            Ok(item) => {
                state.prepend(item);
                state.error = None;
            }
            Err(e) => {
                state.error = Some(e.to_string());
            }
        }
    }

    /// Update a record. On success the returned entity replaces the loaded
    /// one in place; a record not on the loaded page is a silent no-op.
    pub async fn update<B: Serialize + Sync>(&self, id: &str, patch: &B) {
        let result = self.gateway.update::<T, B>(&self.desc, id, patch).await;
        self.apply_replacement(result).await;
    }

    /// Narrow status-only update (`PUT /{resource}/:id/status`).
    pub async fn update_status(&self, id: &str, status: &str) {
        let result = self
            .gateway
            .update_status::<T>(&self.desc, id, status)
            .await;
        self.apply_replacement(result).await;
    }

    /// Delete a record. On success it is removed from the loaded page;
    /// `page.total` is left stale until the next list fetch.
    pub async fn delete(&self, id: &str) {
        let result = self.gateway.delete(&self.desc, id).await;
        let mut state = self.inner.state.write().await;
        match result {
            Ok(()) => {
                state.remove(id);
                state.error = None;
            }
            Err(e) => {
                state.error = Some(e.to_string());
            }
        }
    }

    // ------------------------------------------------------------------
    // Local intents
    // ------------------------------------------------------------------

    /// Merge a partial filter set; always resets the page cursor to 1.
    pub async fn set_filters<I, K, V>(&self, partial: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.inner.state.write().await.merge_filters(partial);
    }

    /// Set the page cursor. Unvalidated; the server clamps or rejects
    /// out-of-range values on the next fetch.
    pub async fn set_page(&self, page: u32) {
        self.inner.state.write().await.set_page(page);
    }

    /// Clear the error message.
    pub async fn clear_error(&self) {
        self.inner.state.write().await.clear_error();
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Mark a fetch dispatched: loading on, error cleared, next ticket.
    async fn dispatch(&self) -> u64 {
        let ticket = self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.inner.state.write().await;
        state.loading = true;
        state.error = None;
        ticket
    }

    fn is_stale(&self, ticket: u64) -> bool {
        ticket != self.inner.seq.load(Ordering::SeqCst)
    }

    async fn apply_replacement(&self, result: emporia_core::Result<T>) {
        let mut state = self.inner.state.write().await;
        match result {
            Ok(item) => {
                state.replace(item);
                state.error = None;
            }
            Err(e) => {
                state.error = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::StubTransport;
    use crate::token::MemoryTokenStore;
    use emporia_core::Error;
    use serde::Deserialize;
    use serde_json::json;
    use tokio::sync::Notify;

    #[derive(Clone, Debug, PartialEq, Deserialize)]
    struct Rec {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        status: String,
    }

    impl Identify for Rec {
        fn id(&self) -> &str {
            &self.id
        }
    }

    const RECS: ResourceDescriptor = ResourceDescriptor::new("recs", "recs");

    fn setup() -> (Arc<StubTransport>, ResourceContainer<Rec>) {
        let stub = Arc::new(StubTransport::new());
        let gateway =
            Gateway::with_transport(stub.clone(), Arc::new(MemoryTokenStore::new()));
        (stub, ResourceContainer::new(RECS, gateway))
    }

    fn envelope(ids: &[&str], total: u64, total_pages: u32, current: u32) -> serde_json::Value {
        json!({
            "recs": ids.iter().map(|id| json!({"_id": id})).collect::<Vec<_>>(),
            "total": total,
            "totalPages": total_pages,
            "currentPage": current,
        })
    }

    #[tokio::test]
    async fn test_fetch_list_success() {
        let (stub, container) = setup();
        stub.push_ok(envelope(&["a", "b"], 2, 1, 1));

        container
            .fetch_list(ListParams::new().with_page(1).with_limit(10))
            .await;

        let state = container.state().await;
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.page.page, 1);
        assert_eq!(state.page.limit, 10);
        assert_eq!(state.page.total, 2);
        assert_eq!(state.page.total_pages, 1);
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_fetch_list_failure_keeps_prior_data() {
        let (stub, container) = setup();
        stub.push_ok(envelope(&["a", "b"], 2, 1, 1));
        container.fetch_list(ListParams::new().with_limit(10)).await;
        let before = container.state().await;

        stub.push_err(Error::api(503, "maintenance window"));
        container.fetch_list(ListParams::new().with_page(2)).await;

        let after = container.state().await;
        assert_eq!(after.items, before.items);
        assert_eq!(after.page, before.page);
        assert!(!after.loading);
        assert_eq!(
            after.error.as_deref(),
            Some("API error 503: maintenance window")
        );
    }

    #[tokio::test]
    async fn test_error_cleared_by_next_success() {
        let (stub, container) = setup();
        stub.push_err(Error::transport("connection refused"));
        container.fetch_list(ListParams::new()).await;
        assert!(container.state().await.error.is_some());

        stub.push_ok(envelope(&["a"], 1, 1, 1));
        container.fetch_list(ListParams::new()).await;
        assert!(container.state().await.error.is_none());
    }

    #[tokio::test]
    async fn test_create_prepends_returned_entity() {
        let (stub, container) = setup();
        stub.push_ok(envelope(&["a", "b"], 2, 1, 1));
        container.fetch_list(ListParams::new()).await;

        stub.push_ok(json!({"_id": "c"}));
        container.create(&json!({"status": "new"})).await;

        let state = container.state().await;
        assert_eq!(state.items.len(), 3);
        assert_eq!(state.items[0].id, "c");
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_create_failure_leaves_items() {
        let (stub, container) = setup();
        stub.push_ok(envelope(&["a"], 1, 1, 1));
        container.fetch_list(ListParams::new()).await;

        stub.push_err(Error::api(422, "name required"));
        container.create(&json!({})).await;

        let state = container.state().await;
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.error.as_deref(), Some("API error 422: name required"));
    }

    #[tokio::test]
    async fn test_update_status_replaces_in_place() {
        let (stub, container) = setup();
        stub.push_ok(envelope(&["o0", "o1", "o2"], 3, 1, 1));
        container.fetch_list(ListParams::new()).await;

        stub.push_ok(json!({"_id": "o1", "status": "shipped"}));
        container.update_status("o1", "shipped").await;

        let state = container.state().await;
        assert_eq!(state.items.len(), 3);
        assert_eq!(state.items[1].id, "o1");
        assert_eq!(state.items[1].status, "shipped");
        assert_eq!(state.items[0].id, "o0");
        assert_eq!(state.items[2].id, "o2");

        let requests = stub.requests();
        assert_eq!(requests.last().unwrap().path, "/recs/o1/status");
        assert_eq!(
            requests.last().unwrap().body,
            Some(json!({"status": "shipped"}))
        );
    }

    #[tokio::test]
    async fn test_update_absent_id_is_silent_noop() {
        let (stub, container) = setup();
        stub.push_ok(envelope(&["a", "b"], 2, 1, 1));
        container.fetch_list(ListParams::new()).await;

        // The record lives on another page; the server still returns it.
        stub.push_ok(json!({"_id": "zz", "status": "shipped"}));
        container.update("zz", &json!({"status": "shipped"})).await;

        let state = container.state().await;
        assert_eq!(state.items.len(), 2);
        assert!(state.items.iter().all(|it| it.id != "zz"));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_but_total_stays_stale() {
        let (stub, container) = setup();
        stub.push_ok(envelope(&["a", "b", "c"], 3, 1, 1));
        container.fetch_list(ListParams::new()).await;

        stub.push_ok(json!(null));
        container.delete("b").await;

        let state = container.state().await;
        assert_eq!(state.items.len(), 2);
        assert!(state.items.iter().all(|it| it.id != "b"));
        assert_eq!(state.page.total, 3);
    }

    #[tokio::test]
    async fn test_set_filters_resets_page_then_refresh_sends_them() {
        let (stub, container) = setup();
        stub.push_ok(envelope(&["a"], 30, 3, 3));
        container
            .fetch_list(ListParams::new().with_page(3).with_limit(10))
            .await;
        assert_eq!(container.state().await.page.page, 3);

        container.set_filters([("status", "pending")]).await;
        assert_eq!(container.state().await.page.page, 1);

        stub.push_ok(envelope(&["a"], 12, 2, 1));
        container.refresh().await;

        let requests = stub.requests();
        let query = &requests.last().unwrap().query;
        assert!(query.contains(&("page".to_string(), "1".to_string())));
        assert!(query.contains(&("status".to_string(), "pending".to_string())));
    }

    #[tokio::test]
    async fn test_fetch_stats_failure_keeps_items() {
        let (stub, container) = setup();
        stub.push_ok(envelope(&["a"], 1, 1, 1));
        container.fetch_list(ListParams::new()).await;

        stub.push_err(Error::api(500, "stats offline"));
        container.fetch_stats().await;

        let state = container.state().await;
        assert_eq!(state.items.len(), 1);
        assert!(state.error.is_some());
    }

    #[tokio::test]
    async fn test_fetch_stats_replaces_wholesale() {
        let (stub, container) = setup();
        stub.push_ok(json!({"totalRecs": 5, "revenue": 99.5}));
        container.fetch_stats().await;

        stub.push_ok(json!({"totalRecs": 6}));
        container.fetch_stats().await;

        let stats = container.state().await.stats;
        assert_eq!(stats.len(), 1);
        assert_eq!(stats.get("totalRecs").and_then(|n| n.as_u64()), Some(6));
    }

    #[tokio::test]
    async fn test_stale_list_response_is_discarded() {
        let (stub, container) = setup();
        let gate = Arc::new(Notify::new());
        stub.push_gated_ok(gate.clone(), envelope(&["old"], 1, 1, 1));
        stub.push_ok(envelope(&["new"], 1, 1, 1));

        let slow = container.clone();
        let first = tokio::spawn(async move {
            slow.fetch_list(ListParams::new().with_search("sof")).await;
        });
        // Let the first request reach the transport before the second one.
        while stub.requests().is_empty() {
            tokio::task::yield_now().await;
        }

        container
            .fetch_list(ListParams::new().with_search("sofa"))
            .await;
        gate.notify_one();
        first.await.unwrap();

        let state = container.state().await;
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, "new");
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_fetch_one_sets_current() {
        let (stub, container) = setup();
        stub.push_ok(json!({"_id": "a", "status": "pending"}));
        container.fetch_one("a").await;

        let state = container.state().await;
        assert_eq!(state.current.as_ref().map(|r| r.id.as_str()), Some("a"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_clear_error() {
        let (stub, container) = setup();
        stub.push_err(Error::transport("timed out"));
        container.fetch_list(ListParams::new()).await;
        assert!(container.state().await.error.is_some());

        container.clear_error().await;
        assert!(container.state().await.error.is_none());
    }
}
