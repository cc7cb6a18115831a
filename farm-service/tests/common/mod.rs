#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::TokenCodec;
use farm_service::domain::expert::service::ExpertService;
use farm_service::domain::identity::service::AuthService;
use farm_service::domain::inventory::service::InventoryService;
use farm_service::inbound::http::router::create_router;
use farm_service::outbound::repositories::InMemoryIdentityRepository;
use farm_service::outbound::repositories::InMemoryInventoryRepository;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub identities: Arc<InMemoryIdentityRepository>,
    pub inventory: Arc<InMemoryInventoryRepository>,
    pub api_client: reqwest::Client,
    /// Codec sharing the server's secret, for minting tokens with chosen timestamps
    pub codec: TokenCodec,
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

        let identities = Arc::new(InMemoryIdentityRepository::new());
        let inventory = Arc::new(InMemoryInventoryRepository::new());
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));

        let router = create_router(
            Arc::new(AuthService::new(
                Arc::clone(&identities),
                Arc::clone(&authenticator),
            )),
            Arc::new(InventoryService::new(Arc::clone(&inventory))),
            Arc::new(ExpertService::new(Arc::clone(&identities))),
            authenticator,
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            identities,
            inventory,
            api_client: reqwest::Client::new(),
            codec: TokenCodec::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PATCH request
    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.patch(path).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.delete(path).bearer_auth(token)
    }

    /// Sign an account up and return the response body
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/auth/signup")
            .json(&json!({
                "name": name,
                "phone": "+2348000000001",
                "address": "Lagos",
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }

    /// Sign an account up and return its token
    pub async fn signup_token(&self, email: &str) -> String {
        let body = self.signup("Amaka", email, "secret1").await;
        body["token"].as_str().unwrap().to_string()
    }

    /// Register an expert, log it in and return its token
    pub async fn expert_token(
        &self,
        name: &str,
        phone: &str,
        expertise: &[&str],
        languages: &[&str],
    ) -> String {
        let response = self
            .post("/expert/register")
            .json(&json!({
                "name": name,
                "phone": phone,
                "expertise": expertise,
                "languages": languages,
                "password": "secret1"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let response = self
            .post("/expert/login")
            .json(&json!({ "phone": phone, "password": "secret1" }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["token"].as_str().unwrap().to_string()
    }
}

/// Replace one character in the middle of the token's signature segment.
pub fn tamper_signature(token: &str) -> String {
    let (head, signature) = token.rsplit_once('.').expect("token has three segments");
    let mut chars: Vec<char> = signature.chars().collect();
    let mid = chars.len() / 2;
    chars[mid] = if chars[mid] == 'A' { 'B' } else { 'A' };
    format!("{}.{}", head, chars.into_iter().collect::<String>())
}
