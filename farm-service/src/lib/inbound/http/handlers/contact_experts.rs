use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::ExpertMatchData;
use crate::domain::expert::models::ExpertQuery;
use crate::inbound::http::router::AppState;

pub async fn contact_experts(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ContactExpertsRequest>,
) -> Result<ApiSuccess<ContactExpertsResponseData>, ApiError> {
    let query = ExpertQuery::new(body.topic, body.language);
    let matches = state.expert_service.match_experts(&query).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ContactExpertsResponseData {
            message: "Experts found!".to_string(),
            experts: matches.into_iter().map(ExpertMatchData::from).collect(),
        },
    ))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactExpertsRequest {
    topic: Option<String>,
    language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactExpertsResponseData {
    pub message: String,
    pub experts: Vec<ExpertMatchData>,
}
