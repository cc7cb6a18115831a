use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_item_id;
use super::InventoryResponseData;
use super::ItemResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<ItemResponseData>, ApiError> {
    let item_id = parse_item_id(&id)?;

    state
        .inventory_service
        .get_item(&item_id)
        .await
        .map_err(ApiError::from)
        .map(|ref item| {
            ApiSuccess::new(
                StatusCode::OK,
                InventoryResponseData::new("Inventory item retrieved successfully.", item.into()),
            )
        })
}
