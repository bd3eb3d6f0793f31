//! Session lifecycle against the scripted transport with the file-backed
//! token store.

use std::sync::Arc;

use emporia_client::core::Error;
use emporia_client::testing::StubTransport;
use emporia_client::{AuthSession, AuthState, FileTokenStore, Gateway, TokenStore};
use serde_json::json;

fn profile_json() -> serde_json::Value {
    json!({"_id": "u1", "name": "Ada", "email": "admin@example.com", "role": "admin"})
}

fn setup(store: Arc<FileTokenStore>) -> (Arc<StubTransport>, AuthSession) {
    let stub = Arc::new(StubTransport::new());
    let gateway = Gateway::with_transport(stub.clone(), store.clone());
    (stub.clone(), AuthSession::new(gateway, store))
}

#[tokio::test]
async fn login_then_logout_removes_stored_token() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(FileTokenStore::in_dir(dir.path()));
    let (stub, session) = setup(store.clone());

    stub.push_ok(json!({"token": "tok-1", "user": profile_json()}));
    session.login("admin@example.com", "hunter2").await;
    assert!(session.is_authenticated().await);
    assert_eq!(store.load().expect("load"), Some("tok-1".to_string()));

    stub.push_ok(json!(null));
    session.logout().await;
    assert!(!session.is_authenticated().await);
    assert_eq!(store.load().expect("load"), None);
}

#[tokio::test]
async fn logout_failure_path_still_removes_stored_token() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(FileTokenStore::in_dir(dir.path()));
    let (stub, session) = setup(store.clone());

    stub.push_ok(json!({"token": "tok-1", "user": profile_json()}));
    session.login("admin@example.com", "hunter2").await;

    stub.push_err(Error::transport("connection reset"));
    session.logout().await;

    assert_eq!(session.state().await, AuthState::Anonymous);
    assert_eq!(store.load().expect("load"), None);
}

#[tokio::test]
async fn restart_restores_session_from_token_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(FileTokenStore::in_dir(dir.path()));
    store.save("tok-1").expect("save");

    let (stub, session) = setup(store);
    stub.push_ok(json!({"user": profile_json()}));

    session.restore(true).await;

    assert!(session.is_authenticated().await);
    let requests = stub.requests();
    assert_eq!(requests[0].path, "/admin/auth/me");
    assert_eq!(requests[0].bearer.as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn rejected_restore_deletes_token_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(FileTokenStore::in_dir(dir.path()));
    store.save("expired").expect("save");

    let (stub, session) = setup(store.clone());
    stub.push_err(Error::auth("token expired"));

    session.restore(false).await;

    assert_eq!(session.state().await, AuthState::Anonymous);
    assert_eq!(store.load().expect("load"), None);
    assert!(session.error().await.is_some());
}
