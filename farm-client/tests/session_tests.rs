mod common;

use std::sync::Arc;

use common::amaka;
use common::tamper_signature;
use common::TestServer;
use farm_client::experts;
use farm_client::experts::ContactQuery;
use farm_client::inventory;
use farm_client::inventory::ItemUpdate;
use farm_client::inventory::NewItem;
use farm_client::ClientError;
use farm_client::FileTokenStore;
use farm_client::IdentityStatus;
use farm_client::MemoryTokenStore;
use farm_client::TokenStore;
use farm_client::UserProfile;
use serde_json::json;

#[tokio::test]
async fn test_amaka_signup_survives_restart() {
    let server = TestServer::spawn().await;
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let path = tmp.path().join("session.json");

    let mut session = server.session(Arc::new(FileTokenStore::new(&path)));
    let outcome = session.signup(&amaka()).await;
    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.message, "Signup successful! You are now logged in.");
    assert!(session.is_authenticated());

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
    assert!(raw["jwtToken"].is_string());

    // New process, same storage
    let mut restored = server.session(Arc::new(FileTokenStore::new(&path)));
    let status = restored.initialize().await.unwrap();
    assert_eq!(status, IdentityStatus::Authenticated);
    match restored.user() {
        Some(UserProfile::Account(account)) => assert_eq!(account.email, "amaka@example.com"),
        other => panic!("unexpected user: {:?}", other),
    }

    let outcome = restored.logout().await;
    assert!(outcome.success);
    assert_eq!(outcome.message, "Logged out successfully.");

    let mut after = server.session(Arc::new(FileTokenStore::new(&path)));
    assert_eq!(after.initialize().await.unwrap(), IdentityStatus::Anonymous);
}

#[tokio::test]
async fn test_login_after_signup() {
    let server = TestServer::spawn().await;
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let mut session = server.session(Arc::clone(&store));
    assert!(session.signup(&amaka()).await.success);
    session.logout().await;

    let outcome = session.login("amaka@example.com", "secret1").await;

    assert!(outcome.success);
    assert_eq!(outcome.message, "Login successful!");
    assert!(store.load().await.unwrap().is_some());
}

#[tokio::test]
async fn test_failed_login_reports_server_message_and_clears_token() {
    let server = TestServer::spawn().await;
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let mut session = server.session(Arc::clone(&store));
    assert!(session.signup(&amaka()).await.success);

    let outcome = session.login("amaka@example.com", "wrong").await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Invalid credentials");
    assert!(!session.is_authenticated());
    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_tampered_token_is_cleared_on_initialize() {
    let server = TestServer::spawn().await;
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let mut session = server.session(Arc::clone(&store));
    assert!(session.signup(&amaka()).await.success);

    let token = store.load().await.unwrap().unwrap();
    store.save(&tamper_signature(&token)).await.unwrap();

    let mut restored = server.session(Arc::clone(&store));
    let status = restored.initialize().await.unwrap();

    assert_eq!(status, IdentityStatus::Anonymous);
    assert!(!restored.state().resolving);
    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_protected_call_after_rejection_resets_context() {
    let server = TestServer::spawn().await;
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let mut session = server.session(Arc::clone(&store));
    assert!(session.signup(&amaka()).await.success);

    let token = store.load().await.unwrap().unwrap();
    store.save(&tamper_signature(&token)).await.unwrap();

    let result = inventory::list_items(&mut session).await;

    assert!(matches!(result, Err(ClientError::Unauthorized { status: 403, .. })));
    assert!(!session.is_authenticated());
    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_account_changing_availability_keeps_session() {
    let server = TestServer::spawn().await;
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let mut session = server.session(Arc::clone(&store));
    assert!(session.signup(&amaka()).await.success);

    let err = experts::set_availability(&mut session, false)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ClientError::Api {
            status: 400,
            message: "Only experts can change availability".to_string(),
        }
    );
    assert!(session.is_authenticated());
    assert!(matches!(session.user(), Some(UserProfile::Account(_))));
    assert!(store.load().await.unwrap().is_some());
    assert!(inventory::list_items(&mut session).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_protected_call_after_logout_is_unauthorized() {
    let server = TestServer::spawn().await;
    let mut session = server.session(Arc::new(MemoryTokenStore::new()));
    assert!(session.signup(&amaka()).await.success);
    session.logout().await;

    let err = inventory::list_items(&mut session).await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Unauthorized {
            status: 401,
            message: "User is Unauthorized: No token provided.".to_string(),
        }
    );
    assert!(server.inventory.is_empty().await);
}

#[tokio::test]
async fn test_inventory_round_trip() {
    let server = TestServer::spawn().await;
    let mut session = server.session(Arc::new(MemoryTokenStore::new()));
    assert!(session.signup(&amaka()).await.success);

    let created = inventory::create_item(
        &mut session,
        &NewItem {
            name: "Layer feed".to_string(),
            quantity: 12.0,
            price: 9500.5,
            unit: Some("bag".to_string()),
            category: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(created.unit, "bag");

    let updated = inventory::update_item(
        &mut session,
        &created.id,
        &ItemUpdate {
            quantity: Some(4.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.quantity, 4.0);

    let items = inventory::list_items(&mut session).await.unwrap();
    assert_eq!(items.len(), 1);

    inventory::delete_item(&mut session, &created.id).await.unwrap();

    let err = inventory::get_item(&mut session, &created.id).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 404, .. }));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_expert_flow() {
    let server = TestServer::spawn().await;
    let http = reqwest::Client::new();
    let response = http
        .post(format!("{}/expert/register", server.address))
        .json(&json!({
            "name": "Bola",
            "phone": "+2348000000002",
            "expertise": ["Cassava farming"],
            "languages": ["Yoruba"],
            "password": "secret1"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 201);

    let mut farmer = server.session(Arc::new(MemoryTokenStore::new()));
    assert!(farmer.signup(&amaka()).await.success);

    let query = ContactQuery {
        topic: Some("cassava".to_string()),
        language: None,
    };
    let matches = experts::contact_experts(&mut farmer, &query).await.unwrap();
    assert_eq!(matches.len(), 1);
    assert!(matches[0].whatsapp_link.is_some());

    let listing = experts::list_experts(farmer.api()).await.unwrap();
    assert_eq!(listing.len(), 1);

    let mut expert = server.session(Arc::new(MemoryTokenStore::new()));
    let outcome = expert.login_expert("+2348000000002", "secret1").await;
    assert!(outcome.success, "{}", outcome.message);

    let profile = experts::set_availability(&mut expert, false).await.unwrap();
    assert!(!profile.available);
    assert!(matches!(expert.user(), Some(UserProfile::Expert(e)) if !e.available));

    let matches = experts::contact_experts(&mut farmer, &query).await.unwrap();
    assert!(matches.is_empty());
}
