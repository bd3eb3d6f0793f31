//! Typed HTTP surface over the admin REST convention.
//!
//! The gateway issues one logical request per invocation, attaches the
//! stored bearer token when present, and decodes responses into typed
//! models at this boundary. A response that does not match the contract
//! fails fast with [`Error::Decode`] instead of letting malformed fields
//! propagate into container state.
//!
//! Pagination totals come from the server alone: [`ListPage`] carries the
//! envelope's `{total, totalPages, currentPage}` verbatim.

use emporia_core::{Error, ResourceDescriptor, Result, StatMap};
use emporia_model::User;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::config::EmporiaConfig;
use crate::token::TokenStore;
use crate::transport::{ApiRequest, HttpTransport, Method, Transport};

/// One decoded page of a resource list.
#[derive(Clone, Debug)]
pub struct ListPage<T> {
    /// Records of this page, in server order.
    pub items: Vec<T>,
    /// Total matching records.
    pub total: u64,
    /// Total pages.
    pub total_pages: u32,
    /// The page the server actually served.
    pub current_page: u32,
}

/// Payload of a successful login.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    /// Session token to persist.
    pub token: String,
    /// The authenticated admin profile.
    pub user: User,
}

/// The HTTP gateway mediating all server communication.
///
/// Cheap to clone; shared by every container of one client instance.
#[derive(Clone)]
pub struct Gateway {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
}

impl Gateway {
    /// Create a gateway over the reqwest transport described by `config`.
    pub fn new(config: &EmporiaConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        let transport = HttpTransport::new(&config.api.base_url, config.timeout())?;
        Ok(Self::with_transport(Arc::new(transport), tokens))
    }

    /// Create a gateway over an explicit transport (tests inject a stub
    /// here).
    pub fn with_transport(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { transport, tokens }
    }

    /// Issue one request with the stored bearer token attached.
    async fn call(
        &self,
        method: Method,
        path: String,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<Value> {
        let bearer = match self.tokens.load() {
            Ok(token) => token,
            Err(e) => {
                log::warn!("token store unreadable, sending unauthenticated: {e}");
                None
            }
        };
        let mut request = ApiRequest::new(method, path)
            .with_query(query)
            .with_bearer(bearer);
        if let Some(body) = body {
            request = request.with_body(body);
        }
        self.transport.execute(request).await
    }

    // ------------------------------------------------------------------
    // Resource convention
    // ------------------------------------------------------------------

    /// `GET /{resource}` — fetch one page of records.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        desc: &ResourceDescriptor,
        query: Vec<(String, String)>,
    ) -> Result<ListPage<T>> {
        let value = self
            .call(Method::Get, desc.collection_path(), query, None)
            .await?;
        decode_list_page(desc, value)
    }

    /// `GET /{resource}/stats` — fetch the aggregate snapshot.
    pub async fn fetch_stats(&self, desc: &ResourceDescriptor) -> Result<StatMap> {
        let value = self
            .call(Method::Get, desc.stats_path(), Vec::new(), None)
            .await?;
        decode_stats(value)
    }

    /// `GET /{resource}/:id` — fetch a single record.
    pub async fn fetch_item<T: DeserializeOwned>(
        &self,
        desc: &ResourceDescriptor,
        id: &str,
    ) -> Result<T> {
        let value = self
            .call(Method::Get, desc.item_path(id), Vec::new(), None)
            .await?;
        decode_entity(value)
    }

    /// `POST /{resource}` — create a record; the server assigns its id.
    pub async fn create<T: DeserializeOwned, B: Serialize>(
        &self,
        desc: &ResourceDescriptor,
        draft: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(draft)
            .map_err(|e| Error::decode(format!("request body: {e}")))?;
        let value = self
            .call(Method::Post, desc.collection_path(), Vec::new(), Some(body))
            .await?;
        decode_entity(value)
    }

    /// `PUT /{resource}/:id` — update a record; returns the full
    /// representation.
    pub async fn update<T: DeserializeOwned, B: Serialize>(
        &self,
        desc: &ResourceDescriptor,
        id: &str,
        patch: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(patch)
            .map_err(|e| Error::decode(format!("request body: {e}")))?;
        let value = self
            .call(Method::Put, desc.item_path(id), Vec::new(), Some(body))
            .await?;
        decode_entity(value)
    }

    /// `PUT /{resource}/:id/status` — the narrow status-only update.
    pub async fn update_status<T: DeserializeOwned>(
        &self,
        desc: &ResourceDescriptor,
        id: &str,
        status: &str,
    ) -> Result<T> {
        let body = serde_json::json!({ "status": status });
        let value = self
            .call(Method::Put, desc.status_path(id), Vec::new(), Some(body))
            .await?;
        decode_entity(value)
    }

    /// `DELETE /{resource}/:id` — success implies removal; no body expected.
    pub async fn delete(&self, desc: &ResourceDescriptor, id: &str) -> Result<()> {
        self.call(Method::Delete, desc.item_path(id), Vec::new(), None)
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Admin session
    // ------------------------------------------------------------------

    /// `POST /admin/auth/login`.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let body = serde_json::json!({ "email": email, "password": password });
        let value = self
            .call(
                Method::Post,
                "/admin/auth/login".to_string(),
                Vec::new(),
                Some(body),
            )
            .await?;
        decode_entity(value)
    }

    /// `GET /admin/auth/me` — resolve the profile behind the stored token.
    pub async fn profile(&self) -> Result<User> {
        let value = self
            .call(Method::Get, "/admin/auth/me".to_string(), Vec::new(), None)
            .await?;
        let envelope = value
            .as_object()
            .and_then(|obj| obj.get("user"))
            .cloned()
            .ok_or_else(|| Error::decode("profile envelope missing `user`"))?;
        decode_entity(envelope)
    }

    /// `POST /admin/auth/logout` — best-effort; callers ignore the outcome.
    pub async fn logout(&self) -> Result<()> {
        self.call(
            Method::Post,
            "/admin/auth/logout".to_string(),
            Vec::new(),
            None,
        )
        .await?;
        Ok(())
    }
}

// ----------------------------------------------------------------------
// Decoding
// ----------------------------------------------------------------------

fn decode_entity<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::decode(e.to_string()))
}

fn decode_list_page<T: DeserializeOwned>(
    desc: &ResourceDescriptor,
    value: Value,
) -> Result<ListPage<T>> {
    let envelope = value
        .as_object()
        .ok_or_else(|| Error::decode("list envelope is not an object"))?;

    let raw_items = envelope
        .get(desc.collection_key)
        .cloned()
        .ok_or_else(|| Error::decode(format!("list envelope missing `{}`", desc.collection_key)))?;
    let items: Vec<T> =
        serde_json::from_value(raw_items).map_err(|e| Error::decode(e.to_string()))?;

    let total = envelope
        .get("total")
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::decode("list envelope missing `total`"))?;
    let total_pages = envelope
        .get("totalPages")
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::decode("list envelope missing `totalPages`"))?;
    let total_pages = u32::try_from(total_pages)
        .map_err(|_| Error::decode(format!("`totalPages` out of range: {total_pages}")))?;
    let current_page = envelope
        .get("currentPage")
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::decode("list envelope missing `currentPage`"))?;
    let current_page = u32::try_from(current_page)
        .map_err(|_| Error::decode(format!("`currentPage` out of range: {current_page}")))?;

    Ok(ListPage {
        items,
        total,
        total_pages,
        current_page,
    })
}

fn decode_stats(value: Value) -> Result<StatMap> {
    let envelope = value
        .as_object()
        .ok_or_else(|| Error::decode("stats payload is not an object"))?;
    let mut stats = StatMap::new();
    for (key, entry) in envelope {
        match entry {
            Value::Number(n) => {
                stats.insert(key.clone(), n.clone());
            }
            // Non-numeric members (labels, breakdown arrays) are not part
            // of the aggregate map.
            _ => log::debug!("skipping non-numeric stat `{key}`"),
        }
    }
    Ok(stats)
}
