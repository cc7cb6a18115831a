use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_item_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let item_id = parse_item_id(&id)?;

    state.inventory_service.delete_item(&item_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
