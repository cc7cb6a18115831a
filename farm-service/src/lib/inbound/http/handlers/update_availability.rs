use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use super::ExpertData;
use crate::domain::identity::models::SessionIdentity;
use crate::inbound::http::router::AppState;

pub async fn update_availability(
    State(state): State<AppState>,
    Extension(session): Extension<SessionIdentity>,
    ApiJson(body): ApiJson<UpdateAvailabilityRequest>,
) -> Result<ApiSuccess<AvailabilityResponseData>, ApiError> {
    let expert = state
        .auth_service
        .set_availability(&session, body.available)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AvailabilityResponseData {
            expert: (&expert).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateAvailabilityRequest {
    available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityResponseData {
    pub expert: ExpertData,
}
