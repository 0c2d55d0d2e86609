use std::sync::Arc;

use auth::AuthService;
use auth::Role;
use auth::SigningKey;
use user_service::domain::user::models::EmailAddress;
use user_service::domain::user::models::NewUser;
use user_service::domain::user::models::Password;
use user_service::domain::user::models::Username;
use user_service::domain::user::ports::UserStore;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserStore;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_EMAIL: &str = "root@example.com";
pub const ADMIN_PASSWORD: &str = "root_pass_word!";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub admin_id: String,
    pub api_client: reqwest::Client,
    pub auth: Arc<AuthService>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryUserStore::new());
        let admin = store
            .create(NewUser {
                username: Username::new("root".to_string()).unwrap(),
                email: EmailAddress::new(ADMIN_EMAIL.to_string()).unwrap(),
                password: Password::new(ADMIN_PASSWORD.to_string()).unwrap(),
                role: Role::Admin,
            })
            .await
            .expect("Failed to seed admin");

        let auth = Arc::new(AuthService::new(
            SigningKey::from_secret(TEST_SECRET).expect("Invalid test secret"),
            chrono::Duration::hours(12),
        ));

        let router = create_router(store, Arc::clone(&auth));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            admin_id: admin.id.to_string(),
            api_client: reqwest::Client::new(),
            auth,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Log in and return the session token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }
}
