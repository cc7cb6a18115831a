use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::IdentityData;
use crate::domain::identity::models::SignupCommand;
use crate::inbound::http::router::AppState;

/// Create an account and return a session token for it.
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SignupRequest>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .auth_service
        .signup(command)
        .await
        .map_err(ApiError::from)
        .map(|session| {
            ApiSuccess::new(
                StatusCode::OK,
                SessionResponseData {
                    token: session.token,
                    user: (&session.identity).into(),
                },
            )
        })
}

/// HTTP request body for signup (raw JSON). Absent fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    name: String,
    phone: String,
    address: String,
    email: String,
    password: String,
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, ApiError> {
        SignupCommand::parse(
            self.name,
            self.phone,
            self.address,
            self.email,
            self.password,
        )
        .map_err(ApiError::from)
    }
}

/// Token plus the projection of the identity it was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub token: String,
    pub user: IdentityData,
}
