//! Mock backend tests for armory-http.
//!
//! These tests use wiremock to simulate the REST backend and check login,
//! token attachment and the forced-logout behaviour of the gateway.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use armory_core::{
    ApiUrl, ErrorKind, MemorySessionStore, Navigator, Role, SessionManager, SessionStore,
};
use armory_http::{ApiClient, ApiGateway, HttpAuthBackend};
use chrono::NaiveDate;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &[(&str, &str)] = &[("page", "1")];

/// Records every navigation it is asked to make.
#[derive(Default)]
struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.visits.lock().unwrap().push(route.to_string());
    }
}

struct Harness {
    server: MockServer,
    store: Arc<MemorySessionStore>,
    session: Arc<SessionManager>,
    navigator: Arc<RecordingNavigator>,
    gateway: ApiGateway,
}

/// Helper to create an API URL from a mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}/api", server.address().port())).unwrap()
}

async fn harness() -> Harness {
    let server = MockServer::start().await;
    let client = ApiClient::new(mock_api_url(&server)).unwrap();
    let backend = Arc::new(HttpAuthBackend::from_client(client.clone()));

    let store = Arc::new(MemorySessionStore::new());
    let session = Arc::new(SessionManager::new(
        store.clone(),
        backend.clone(),
        backend,
    ));
    session.hydrate();

    let navigator = Arc::new(RecordingNavigator::default());
    let gateway = ApiGateway::new(client, session.clone(), navigator.clone())
        .with_redirect_delay(Duration::from_millis(10));

    Harness {
        server,
        store,
        session,
        navigator,
        gateway,
    }
}

fn user(id: i64, username: &str, role: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "full_name": format!("User {username}"),
        "role": role,
        "base_id": 1,
        "base_name": "Base Alpha"
    })
}

async fn mount_login(server: &MockServer, username: &str, token: &str, role: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "username": username, "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "user": user(7, username, role)
        })))
        .mount(server)
        .await;
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(150)).await;
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_success_persists_token_and_profile() {
    let h = harness().await;
    mount_login(&h.server, "logistics_alpha", "jwt-1", "logistics_officer").await;

    let profile = h.session.login("logistics_alpha", "pw").await.unwrap();

    assert_eq!(profile.role(), Role::LogisticsOfficer);
    assert!(h.session.is_authenticated());
    assert_eq!(h.store.token().unwrap().unwrap().as_str(), "jwt-1");
    assert_eq!(
        h.store.load().unwrap().unwrap().profile.username(),
        "logistics_alpha"
    );
}

#[tokio::test]
async fn test_login_invalid_credentials_keeps_server_message() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid credentials" })),
        )
        .mount(&h.server)
        .await;

    let err = h.session.login("admin", "wrong").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(!h.session.is_authenticated());
    assert!(h.store.load().unwrap().is_none());

    settle().await;
    assert!(h.navigator.visits().is_empty());
}

#[tokio::test]
async fn test_login_server_error_is_not_a_credentials_problem() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Login failed" })))
        .mount(&h.server)
        .await;

    let err = h.session.login("admin", "pw").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NetworkOrServer);
    assert!(!h.session.is_authenticated());
}

#[tokio::test]
async fn test_login_with_unknown_role_is_rejected() {
    let h = harness().await;
    mount_login(&h.server, "quartermaster", "jwt-q", "quartermaster").await;

    let err = h.session.login("quartermaster", "pw").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NetworkOrServer);
    assert!(!h.session.is_authenticated());
    assert!(h.store.token().unwrap().is_none());
}

// ============================================================================
// Gateway Tests
// ============================================================================

#[tokio::test]
async fn test_gateway_attaches_bearer_token() {
    let h = harness().await;
    mount_login(&h.server, "admin", "jwt-admin", "admin").await;
    h.session.login("admin", "pw").await.unwrap();

    Mock::given(method("GET"))
        .and(path("/api/purchases"))
        .and(header("authorization", "Bearer jwt-admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "purchases": [] })))
        .expect(1)
        .mount(&h.server)
        .await;

    let body = h.gateway.purchases().list(PAGE).await.unwrap();
    assert_eq!(body, json!({ "purchases": [] }));
}

#[tokio::test]
async fn test_gateway_reads_token_fresh_after_relogin() {
    let h = harness().await;
    mount_login(&h.server, "commander_alpha", "jwt-a", "base_commander").await;
    mount_login(&h.server, "commander_bravo", "jwt-b", "base_commander").await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer jwt-a"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "user": user(2, "commander_alpha", "base_commander") })),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer jwt-b"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "user": user(3, "commander_bravo", "base_commander") })),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    h.session.login("commander_alpha", "pw").await.unwrap();
    assert_eq!(h.gateway.me().await.unwrap().username(), "commander_alpha");

    h.session.login("commander_bravo", "pw").await.unwrap();
    assert_eq!(h.gateway.me().await.unwrap().username(), "commander_bravo");
}

#[tokio::test]
async fn test_concurrent_401s_log_out_and_redirect_once() {
    let h = harness().await;
    mount_login(&h.server, "admin", "jwt-admin", "admin").await;
    h.session.login("admin", "pw").await.unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Token expired" })))
        .mount(&h.server)
        .await;

    let mut changes = h.session.subscribe();
    changes.borrow_and_update();

    let purchases_collection = h.gateway.purchases();
    let transfers_collection = h.gateway.transfers();
    let (purchases, transfers, bases) = tokio::join!(
        purchases_collection.list(PAGE),
        transfers_collection.list(PAGE),
        h.gateway.bases(),
    );

    for result in [purchases, transfers, bases] {
        assert_eq!(result.unwrap_err().kind(), ErrorKind::SessionExpired);
    }

    assert!(!h.session.is_authenticated());
    assert!(h.store.load().unwrap().is_none());
    assert!(changes.has_changed().unwrap());
    changes.borrow_and_update();

    settle().await;
    assert_eq!(h.navigator.visits(), vec!["/login".to_string()]);
    assert!(!changes.has_changed().unwrap());
}

#[tokio::test]
async fn test_later_401s_do_not_redirect_again() {
    let h = harness().await;
    mount_login(&h.server, "admin", "jwt-admin", "admin").await;
    h.session.login("admin", "pw").await.unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    h.gateway.users().await.unwrap_err();
    settle().await;
    h.gateway.users().await.unwrap_err();
    settle().await;

    assert_eq!(h.navigator.visits().len(), 1);
}

#[tokio::test]
async fn test_relogin_rearms_the_interceptor() {
    let h = harness().await;
    mount_login(&h.server, "admin", "jwt-admin", "admin").await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    h.session.login("admin", "pw").await.unwrap();
    h.gateway.users().await.unwrap_err();
    settle().await;

    h.session.login("admin", "pw").await.unwrap();
    h.gateway.users().await.unwrap_err();
    settle().await;

    assert_eq!(h.navigator.visits().len(), 2);
    assert!(!h.session.is_authenticated());
}

#[tokio::test]
async fn test_server_error_propagates_without_logout() {
    let h = harness().await;
    mount_login(&h.server, "admin", "jwt-admin", "admin").await;
    h.session.login("admin", "pw").await.unwrap();

    Mock::given(method("GET"))
        .and(path("/api/dashboard/metrics"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
        .mount(&h.server)
        .await;

    let err = h
        .gateway
        .dashboard_metrics(&Default::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NetworkOrServer);
    assert!(h.session.is_authenticated());
    settle().await;
    assert!(h.navigator.visits().is_empty());
}

#[tokio::test]
async fn test_forbidden_is_not_an_expiry() {
    let h = harness().await;
    mount_login(&h.server, "logistics_alpha", "jwt-l", "logistics_officer").await;
    h.session.login("logistics_alpha", "pw").await.unwrap();

    Mock::given(method("GET"))
        .and(path("/api/assignments"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "error": "Forbidden" })))
        .mount(&h.server)
        .await;

    let err = h.gateway.assignments().list(PAGE).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NetworkOrServer);
    assert!(h.session.is_authenticated());
}

#[tokio::test]
async fn test_401_for_superseded_token_leaves_new_session() {
    let h = harness().await;
    mount_login(&h.server, "commander_alpha", "jwt-old", "base_commander").await;
    mount_login(&h.server, "commander_bravo", "jwt-new", "base_commander").await;
    h.session.login("commander_alpha", "pw").await.unwrap();

    Mock::given(method("GET"))
        .and(path("/api/expenditures"))
        .and(header("authorization", "Bearer jwt-old"))
        .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(200)))
        .mount(&h.server)
        .await;

    let gateway = h.gateway.clone();
    let pending = tokio::spawn(async move { gateway.expenditures().list(PAGE).await });

    tokio::time::sleep(Duration::from_millis(50)).await;
    h.session.login("commander_bravo", "pw").await.unwrap();

    let err = pending.await.unwrap().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SessionExpired);

    settle().await;
    assert!(h.session.is_authenticated());
    assert_eq!(h.store.token().unwrap().unwrap().as_str(), "jwt-new");
    assert!(h.navigator.visits().is_empty());
}

#[tokio::test]
async fn test_redirect_waits_for_the_delay() {
    let h = harness().await;
    mount_login(&h.server, "admin", "jwt-admin", "admin").await;
    h.session.login("admin", "pw").await.unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    let gateway = h.gateway.clone().with_redirect_delay(Duration::from_millis(300));

    let err = gateway.bases().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SessionExpired);
    assert!(!h.session.is_authenticated());
    assert!(h.navigator.visits().is_empty());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(h.navigator.visits().is_empty());

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(h.navigator.visits(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn test_transfer_status_and_assignment_return_bodies() {
    let h = harness().await;
    mount_login(&h.server, "admin", "jwt-admin", "admin").await;
    h.session.login("admin", "pw").await.unwrap();

    Mock::given(method("PUT"))
        .and(path("/api/transfers/7/status"))
        .and(body_json(json!({ "status": "in_transit" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/transfers/7/status"))
        .and(body_json(json!({ "status": "completed", "received_date": "2025-03-02" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/assignments/3/return"))
        .and(body_json(json!({ "return_date": "2025-03-05" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;

    let received = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
    let returned = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();

    h.gateway
        .update_transfer_status(7, "in_transit", None)
        .await
        .unwrap();
    h.gateway
        .update_transfer_status(7, "completed", Some(received))
        .await
        .unwrap();
    assert_eq!(
        h.gateway.return_assignment(3, returned).await.unwrap(),
        Value::Null
    );
}
