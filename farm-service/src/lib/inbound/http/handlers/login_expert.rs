use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::IdentityData;
use crate::inbound::http::router::AppState;

pub async fn login_expert(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginExpertRequest>,
) -> Result<ApiSuccess<ExpertSessionResponseData>, ApiError> {
    state
        .auth_service
        .login_expert(&body.phone, &body.password)
        .await
        .map_err(ApiError::from)
        .map(|session| {
            ApiSuccess::new(
                StatusCode::OK,
                ExpertSessionResponseData {
                    token: session.token,
                    expert: (&session.identity).into(),
                },
            )
        })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginExpertRequest {
    phone: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpertSessionResponseData {
    pub token: String,
    pub expert: IdentityData,
}
