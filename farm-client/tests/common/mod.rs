#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use farm_client::ApiClient;
use farm_client::SessionContext;
use farm_client::SignupForm;
use farm_client::TokenStore;
use farm_service::domain::expert::service::ExpertService;
use farm_service::domain::identity::service::AuthService;
use farm_service::domain::inventory::service::InventoryService;
use farm_service::inbound::http::router::create_router;
use farm_service::outbound::repositories::InMemoryIdentityRepository;
use farm_service::outbound::repositories::InMemoryInventoryRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// FarmPal server over in-memory stores, bound to a random port
pub struct TestServer {
    pub address: String,
    pub identities: Arc<InMemoryIdentityRepository>,
    pub inventory: Arc<InMemoryInventoryRepository>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!("http://{}", listener.local_addr().unwrap());

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

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            identities,
            inventory,
        }
    }

    /// Fresh session context over the given store
    pub fn session(&self, store: Arc<dyn TokenStore>) -> SessionContext {
        SessionContext::new(ApiClient::new(&self.address, store))
    }
}

pub fn amaka() -> SignupForm {
    SignupForm {
        name: "Amaka".to_string(),
        phone: "+2348000000001".to_string(),
        address: "Lagos".to_string(),
        email: "amaka@example.com".to_string(),
        password: "secret1".to_string(),
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
