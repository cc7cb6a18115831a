use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::contact_experts::contact_experts;
use super::handlers::inventory::create_item::create_item;
use super::handlers::inventory::delete_item::delete_item;
use super::handlers::inventory::get_item::get_item;
use super::handlers::inventory::list_items::list_items;
use super::handlers::inventory::update_item::update_item;
use super::handlers::list_experts::list_experts;
use super::handlers::login::login;
use super::handlers::login_expert::login_expert;
use super::handlers::me::me;
use super::handlers::register_expert::register_expert;
use super::handlers::signup::signup;
use super::handlers::update_availability::update_availability;
use super::handlers::ApiError;
use super::middleware::authenticate as auth_middleware;
use crate::domain::expert::ports::ExpertServicePort;
use crate::domain::identity::ports::AuthServicePort;
use crate::domain::inventory::ports::InventoryServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub inventory_service: Arc<dyn InventoryServicePort>,
    pub expert_service: Arc<dyn ExpertServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    inventory_service: Arc<dyn InventoryServicePort>,
    expert_service: Arc<dyn ExpertServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        auth_service,
        inventory_service,
        expert_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/", get(welcome))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/expert/register", post(register_expert))
        .route("/expert/login", post(login_expert))
        .route("/experts", get(list_experts));

    let protected_routes = Router::new()
        .route("/auth/me", get(me))
        .route("/contact", post(contact_experts))
        .route("/expert/availability", patch(update_availability))
        .route("/inventory/item", get(list_items).post(create_item))
        .route(
            "/inventory/item/:id",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn welcome() -> &'static str {
    "Welcome to the Farm Pal API"
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::InternalServerError(format!("handler panicked: {}", detail)).into_response()
}
