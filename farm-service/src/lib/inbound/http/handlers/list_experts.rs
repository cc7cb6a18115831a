use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::ExpertSummaryData;
use crate::inbound::http::router::AppState;

/// Public listing of available experts.
pub async fn list_experts(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ExpertListResponseData>, ApiError> {
    let experts = state.expert_service.list_available().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ExpertListResponseData {
            experts: experts.iter().map(ExpertSummaryData::from).collect(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpertListResponseData {
    pub experts: Vec<ExpertSummaryData>,
}
