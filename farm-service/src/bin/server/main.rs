use std::sync::Arc;

use auth::Authenticator;
use farm_service::config::Config;
use farm_service::domain::expert::ports::ExpertDirectory;
use farm_service::domain::expert::ports::ExpertServicePort;
use farm_service::domain::expert::service::ExpertService;
use farm_service::domain::identity::ports::AuthServicePort;
use farm_service::domain::identity::ports::CredentialStore;
use farm_service::domain::identity::service::AuthService;
use farm_service::domain::inventory::ports::InventoryRepository;
use farm_service::domain::inventory::ports::InventoryServicePort;
use farm_service::domain::inventory::service::InventoryService;
use farm_service::inbound::http::router::create_router;
use farm_service::outbound::repositories::InMemoryIdentityRepository;
use farm_service::outbound::repositories::InMemoryInventoryRepository;
use farm_service::outbound::repositories::PostgresIdentityRepository;
use farm_service::outbound::repositories::PostgresInventoryRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type Services = (
    Arc<dyn AuthServicePort>,
    Arc<dyn InventoryServicePort>,
    Arc<dyn ExpertServicePort>,
);

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farm_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "farm-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database = config.database.is_some(),
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));

    let (auth_service, inventory_service, expert_service) = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_services(
                Arc::new(PostgresIdentityRepository::new(pg_pool.clone())),
                Arc::new(PostgresInventoryRepository::new(pg_pool)),
                &authenticator,
            )
        }
        None => {
            tracing::warn!("No database configured; records live in memory and are lost on exit");

            build_services(
                Arc::new(InMemoryIdentityRepository::new()),
                Arc::new(InMemoryInventoryRepository::new()),
                &authenticator,
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        auth_service,
        inventory_service,
        expert_service,
        authenticator,
    );

    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}

/// Domain services over one identity store and one inventory store.
fn build_services<S, I>(
    identities: Arc<S>,
    inventory: Arc<I>,
    authenticator: &Arc<Authenticator>,
) -> Services
where
    S: CredentialStore + ExpertDirectory,
    I: InventoryRepository,
{
    (
        Arc::new(AuthService::new(
            Arc::clone(&identities),
            Arc::clone(authenticator),
        )),
        Arc::new(InventoryService::new(inventory)),
        Arc::new(ExpertService::new(identities)),
    )
}
