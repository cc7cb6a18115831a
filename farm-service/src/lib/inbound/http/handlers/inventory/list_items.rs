use axum::extract::State;
use axum::http::StatusCode;

use super::InventoryResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::ItemData;
use crate::inbound::http::router::AppState;

pub async fn list_items(
    State(state): State<AppState>,
) -> Result<ApiSuccess<InventoryResponseData<Vec<ItemData>>>, ApiError> {
    let items = state.inventory_service.list_items().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        InventoryResponseData::new(
            "Inventory fetched successfully.",
            items.iter().map(ItemData::from).collect(),
        ),
    ))
}
