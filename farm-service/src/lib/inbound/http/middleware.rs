use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::identity::models::SessionIdentity;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const NO_TOKEN_MESSAGE: &str = "User is Unauthorized: No token provided.";
const INVALID_TOKEN_MESSAGE: &str = "Forbidden: Invalid or expired token.";

/// Gate for protected routes.
///
/// A request without a usable bearer token is rejected with 401; a token that
/// fails verification (bad signature, malformed, expired) with 403. On success
/// the verified [`SessionIdentity`] is added to the request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(req.headers())
        .ok_or_else(|| ApiError::Unauthorized(NO_TOKEN_MESSAGE.to_string()))?;

    let claims = state.authenticator.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
        ApiError::Forbidden(INVALID_TOKEN_MESSAGE.to_string())
    })?;

    let session = SessionIdentity::try_from(claims).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not an identity ID");
        ApiError::Forbidden(INVALID_TOKEN_MESSAGE.to_string())
    })?;

    tracing::debug!(identity_id = %session.id, role = %session.role, "Request authenticated");

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

/// Token from an `Authorization: Bearer <token>` header.
///
/// Returns `None` when the header is absent, not valid UTF-8, uses another
/// scheme, or carries an empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    Some(token)
}
