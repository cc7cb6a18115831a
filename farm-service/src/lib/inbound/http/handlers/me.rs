use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::IdentityData;
use crate::domain::identity::models::SessionIdentity;
use crate::inbound::http::router::AppState;

/// Current projection of the identity behind the presented token.
pub async fn me(
    State(state): State<AppState>,
    Extension(session): Extension<SessionIdentity>,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    state
        .auth_service
        .identity(&session)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| {
            ApiSuccess::new(
                StatusCode::OK,
                MeResponseData {
                    user: identity.into(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub user: IdentityData,
}
