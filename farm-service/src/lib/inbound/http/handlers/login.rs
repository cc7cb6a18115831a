use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::signup::SessionResponseData;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let session = state
        .auth_service
        .login(&body.email, &body.password)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SessionResponseData {
            token: session.token,
            user: (&session.identity).into(),
        },
    ))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    email: String,
    password: String,
}
