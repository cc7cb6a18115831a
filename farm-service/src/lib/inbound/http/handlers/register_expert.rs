use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::ExpertData;
use crate::domain::identity::models::RegisterExpertCommand;
use crate::inbound::http::router::AppState;

pub async fn register_expert(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterExpertRequest>,
) -> Result<ApiSuccess<RegisterExpertResponseData>, ApiError> {
    let command = RegisterExpertCommand::parse(
        body.name,
        body.phone,
        body.expertise,
        body.languages,
        body.password,
    )?;

    let expert = state.auth_service.register_expert(command).await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        RegisterExpertResponseData {
            message: "Registration successful!".to_string(),
            expert: (&expert).into(),
        },
    ))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegisterExpertRequest {
    name: String,
    phone: String,
    expertise: Vec<String>,
    languages: Vec<String>,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterExpertResponseData {
    pub message: String,
    pub expert: ExpertData,
}
