//! HTTP tests against the in-memory store and a recording dispatcher.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use freshguard_api::{AppState, build_router};
use freshguard_auth::JwtEncoder;
use freshguard_core::config::{AppConfig, DatabaseProvider};
use freshguard_core::traits::ManualClock;
use freshguard_database::{MemoryStore, Stores};
use freshguard_entity::item::NewItem;
use freshguard_entity::user::{NewUser, User};
use freshguard_mailer::RecordingDispatcher;

const CRON_SECRET: &str = "cron-secret-for-tests";

struct TestApp {
    router: Router,
    stores: Stores,
    dispatcher: Arc<RecordingDispatcher>,
    clock: Arc<ManualClock>,
    encoder: JwtEncoder,
}

impl TestApp {
    fn new() -> Self {
        let mut config = AppConfig::default();
        config.cron.secret = Some(CRON_SECRET.to_string());
        config.database.provider = DatabaseProvider::Memory;

        let stores = Stores::memory(Arc::new(MemoryStore::new()));
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let encoder = JwtEncoder::new(&config.auth);

        let state = AppState::new(config, stores.clone(), dispatcher.clone(), clock.clone());
        Self {
            router: build_router(state),
            stores,
            dispatcher,
            clock,
            encoder,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        use freshguard_core::traits::Clock;
        self.clock.now()
    }

    async fn user(&self, email: &str) -> (User, String) {
        let user = self
            .stores
            .users
            .create_user(
                &NewUser {
                    email: email.to_string(),
                    name: "Test User".to_string(),
                },
                self.now(),
            )
            .await
            .unwrap();
        let (token, _) = self.encoder.issue(user.id, &user.email, Utc::now()).unwrap();
        (user, token)
    }

    async fn item(&self, user: &User, name: &str, expires_in: Duration) {
        let now = self.now();
        self.stores
            .items
            .create_item(
                user.id,
                &NewItem {
                    name: name.to_string(),
                    category: "Dairy".to_string(),
                    purchase_date: now - Duration::days(2),
                    expiry_date: now + expires_in,
                    location: "Fridge".to_string(),
                    quantity: 1,
                    unit: "pcs".to_string(),
                    notes: None,
                },
                now,
            )
            .await
            .unwrap();
    }

    async fn send(&self, method: &str, uri: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.call(builder.body(Body::empty()).unwrap()).await
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_inbox_requires_session() {
    let app = TestApp::new();

    let (status, body) = app.send("GET", "/api/notifications", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized");

    let (status, body) = app.send("GET", "/api/notifications", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized");
}

#[tokio::test]
async fn test_session_cookie_is_accepted() {
    let app = TestApp::new();
    let (_, token) = app.user("cookie@example.com").await;

    let request = Request::builder()
        .uri("/api/notifications/unread-count")
        .header(header::COOKIE, format!("auth_token={token}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.call(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_check_expiry_then_rescan_is_deduplicated() {
    let app = TestApp::new();
    let (user, token) = app.user("owner@example.com").await;
    app.item(&user, "Milk", Duration::days(2)).await;
    app.item(&user, "Rice", Duration::days(60)).await;

    let (status, body) = app
        .send("POST", "/api/notifications/check-expiry", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notificationsCreated"], 1);
    assert_eq!(body["itemsChecked"], 1);
    assert_eq!(body["emailsSent"], 1);
    assert_eq!(body["emailsFailed"], 0);
    assert_eq!(body["notifiedItems"][0]["name"], "Milk");
    assert_eq!(body["failed"].as_array().unwrap().len(), 0);
    assert_eq!(body["timedOut"], false);
    assert_eq!(app.dispatcher.sent().len(), 1);

    app.clock.advance(Duration::hours(1));
    let (_, body) = app
        .send("POST", "/api/notifications/check-expiry", Some(&token))
        .await;
    assert_eq!(body["notificationsCreated"], 0);
    assert_eq!(body["emailsSent"], 0);
    assert_eq!(app.dispatcher.sent().len(), 1);
}

#[tokio::test]
async fn test_notification_lifecycle() {
    let app = TestApp::new();
    let (user, token) = app.user("owner@example.com").await;
    app.item(&user, "Yogurt", Duration::days(2)).await;
    app.send("POST", "/api/notifications/check-expiry", Some(&token))
        .await;

    let (status, body) = app.send("GET", "/api/notifications", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unreadCount"], 1);
    let notification = &body["notifications"][0];
    assert_eq!(notification["type"], "expiry_warning");
    assert_eq!(notification["title"], "Yogurt expiring soon");
    assert!(notification["message"].as_str().unwrap().contains("2 days"));
    assert_eq!(notification["is_read"], false);
    let id = notification["id"].as_str().unwrap().to_string();

    let uri = format!("/api/notifications/{id}");
    let (status, body) = app.send("PATCH", &uri, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_read"], true);
    let read_at = body["read_at"].clone();

    // Reading twice is a no-op.
    let (status, body) = app.send("PATCH", &uri, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["read_at"], read_at);

    let (_, body) = app
        .send("GET", "/api/notifications/unread-count", Some(&token))
        .await;
    assert_eq!(body["count"], 0);

    let (status, body) = app.send("DELETE", &uri, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Notification deleted");

    let (status, _) = app.send("DELETE", &uri, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_foreign_notification_looks_missing() {
    let app = TestApp::new();
    let (owner, owner_token) = app.user("owner@example.com").await;
    let (_, other_token) = app.user("other@example.com").await;
    app.item(&owner, "Cheese", Duration::days(1)).await;
    app.send("POST", "/api/notifications/check-expiry", Some(&owner_token))
        .await;

    let (_, body) = app
        .send("GET", "/api/notifications", Some(&owner_token))
        .await;
    let id = body["notifications"][0]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/notifications/{id}");

    let (foreign_status, foreign_body) = app.send("PATCH", &uri, Some(&other_token)).await;
    let missing = format!("/api/notifications/{}", uuid::Uuid::new_v4());
    let (missing_status, missing_body) = app.send("PATCH", &missing, Some(&other_token)).await;
    assert_eq!(foreign_status, StatusCode::NOT_FOUND);
    assert_eq!(foreign_status, missing_status);
    assert_eq!(foreign_body, missing_body);

    let (status, _) = app.send("DELETE", &uri, Some(&other_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app
        .send("GET", "/api/notifications/unread-count", Some(&owner_token))
        .await;
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_malformed_id_is_rejected() {
    let app = TestApp::new();
    let (_, token) = app.user("owner@example.com").await;

    let (status, body) = app
        .send("PATCH", "/api/notifications/not-a-uuid", Some(&token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_cron_requires_secret() {
    let app = TestApp::new();
    let (user, session) = app.user("owner@example.com").await;
    app.item(&user, "Milk", Duration::days(2)).await;

    for bearer in [None, Some("wrong"), Some(session.as_str())] {
        let (status, body) = app.send("GET", "/api/cron/expiry-check", bearer).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Unauthorized");
    }
    assert_eq!(app.dispatcher.sent().len(), 0);
}

#[tokio::test]
async fn test_cron_scans_every_user() {
    let app = TestApp::new();
    let (alice, _) = app.user("alice@example.com").await;
    let (bob, _) = app.user("bob@example.com").await;
    app.item(&alice, "Milk", Duration::days(2)).await;
    app.item(&bob, "Bread", -Duration::days(5)).await;
    app.item(&bob, "Honey", Duration::days(300)).await;

    let (status, body) = app
        .send("GET", "/api/cron/expiry-check", Some(CRON_SECRET))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["itemsProcessed"], 2);
    assert_eq!(body["notificationsCreated"], 2);
    assert_eq!(body["emailsSent"], 2);
    assert_eq!(body["emailsFailed"], 0);
    assert_eq!(body["timedOut"], false);
}

#[tokio::test]
async fn test_cron_reports_failed_emails() {
    let app = TestApp::new();
    let (alice, _) = app.user("alice@example.com").await;
    let (bob, _) = app.user("bob@example.com").await;
    app.item(&alice, "Milk", Duration::days(2)).await;
    app.item(&bob, "Eggs", Duration::days(1)).await;
    app.dispatcher.fail_for("bob@example.com");

    let (status, body) = app
        .send("GET", "/api/cron/expiry-check", Some(CRON_SECRET))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notificationsCreated"], 2);
    assert_eq!(body["emailsSent"], 1);
    assert_eq!(body["emailsFailed"], 1);
}

#[tokio::test]
async fn test_item_stats() {
    let app = TestApp::new();
    let (user, token) = app.user("owner@example.com").await;
    app.item(&user, "Bread", -Duration::days(5)).await;
    app.item(&user, "Rice", Duration::days(60)).await;

    let (status, body) = app.send("GET", "/api/items/stats", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["fresh"], 1);
    assert_eq!(body["expiringSoon"], 0);
    assert_eq!(body["expired"], 1);
}
