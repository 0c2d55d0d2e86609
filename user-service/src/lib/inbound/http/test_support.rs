use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthService;
use auth::ManualClock;
use auth::Role;
use auth::SigningKey;
use axum::body::Body;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use chrono::Duration;
use chrono::Utc;
use mockall::mock;
use tower::ServiceExt;

use super::router::create_router;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserStore;
use crate::outbound::repositories::InMemoryUserStore;
use crate::user::errors::UserError;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

mock! {
    pub TestUserStore {}

    #[async_trait]
    impl UserStore for TestUserStore {
        async fn login(&self, credentials: &Credentials) -> Result<User, UserError>;
        async fn register(&self, user: NewUser) -> Result<User, UserError>;
        async fn list_all(&self) -> Result<Vec<User>, UserError>;
        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
        async fn create(&self, user: NewUser) -> Result<User, UserError>;
        async fn update(&self, id: &UserId, changes: UserChanges) -> Result<User, UserError>;
        async fn delete(&self, id: &UserId) -> Result<(), UserError>;
    }
}

/// Router wired to a controllable clock, driven in-process with `oneshot`.
pub struct TestHarness {
    pub app: Router,
    pub auth: Arc<AuthService>,
    pub clock: Arc<ManualClock>,
}

impl TestHarness {
    pub fn with_store(store: Arc<dyn UserStore>) -> Self {
        Self::build(store, TEST_SECRET)
    }

    pub fn with_memory_store() -> Self {
        Self::with_store(Arc::new(InMemoryUserStore::new()))
    }

    pub fn with_secret(secret: &str) -> Self {
        Self::build(Arc::new(InMemoryUserStore::new()), secret)
    }

    fn build(store: Arc<dyn UserStore>, secret: &str) -> Self {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let auth = Arc::new(AuthService::with_clock(
            SigningKey::from_secret(secret).expect("Invalid test secret"),
            Duration::hours(12),
            clock.clone(),
        ));

        Self {
            app: create_router(store, Arc::clone(&auth)),
            auth,
            clock,
        }
    }

    pub fn token(&self, email: &str, role: Role) -> String {
        self.auth
            .issue_token(email, role)
            .expect("Failed to issue token")
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Body is not JSON")
        };

        (status, body)
    }
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    builder
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    builder.body(Body::empty()).expect("Failed to build request")
}
