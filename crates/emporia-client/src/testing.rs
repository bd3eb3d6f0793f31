//! Scripted transport for tests.
//!
//! [`StubTransport`] stands in for the HTTP layer: responses are queued up
//! front and handed out in execute order, while every request is recorded
//! for assertions. A response can be gated on a [`tokio::sync::Notify`] so
//! tests can hold one request in flight while a later one resolves, which
//! is how the stale-response discard rule is exercised.

use async_trait::async_trait;
use emporia_core::{Error, Result};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::transport::{ApiRequest, Transport};

struct Scripted {
    gate: Option<Arc<Notify>>,
    result: Result<Value>,
}

/// A transport that serves pre-scripted responses.
#[derive(Default)]
pub struct StubTransport {
    script: Mutex<VecDeque<Scripted>>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl StubTransport {
    /// Create an empty stub. Executing against it fails until responses are
    /// pushed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON response.
    pub fn push_ok(&self, value: Value) {
        self.push(None, Ok(value));
    }

    /// Queue a failure.
    pub fn push_err(&self, error: Error) {
        self.push(None, Err(error));
    }

    /// Queue a successful response that is withheld until `gate` is
    /// notified.
    pub fn push_gated_ok(&self, gate: Arc<Notify>, value: Value) {
        self.push(Some(gate), Ok(value));
    }

    fn push(&self, gate: Option<Arc<Notify>>, result: Result<Value>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Scripted { gate, result });
        }
    }

    /// Every request executed so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }

    fn take_next(&self, request: &ApiRequest) -> Result<Scripted> {
        let mut seen = self
            .seen
            .lock()
            .map_err(|_| Error::config("stub transport poisoned"))?;
        seen.push(request.clone());
        drop(seen);

        self.script
            .lock()
            .map_err(|_| Error::config("stub transport poisoned"))?
            .pop_front()
            .ok_or_else(|| {
                Error::transport(format!(
                    "no scripted response for {:?} {}",
                    request.method, request.path
                ))
            })
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        let scripted = self.take_next(&request)?;
        if let Some(gate) = &scripted.gate {
            gate.notified().await;
        }
        scripted.result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::transport::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_stub_serves_in_order_and_records() {
        let stub = StubTransport::new();
        stub.push_ok(json!({"first": true}));
        stub.push_err(Error::api(500, "boom"));

        let first = stub
            .execute(ApiRequest::new(Method::Get, "/orders"))
            .await
            .unwrap();
        assert_eq!(first, json!({"first": true}));

        let second = stub
            .execute(ApiRequest::new(Method::Get, "/orders/stats"))
            .await;
        assert!(second.is_err());

        let requests = stub.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].path, "/orders");
        assert_eq!(requests[1].path, "/orders/stats");
    }

    #[tokio::test]
    async fn test_stub_exhausted_script_fails() {
        let stub = StubTransport::new();
        let result = stub.execute(ApiRequest::new(Method::Get, "/users")).await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
