use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::parse_item_id;
use super::InventoryResponseData;
use super::ItemResponseData;
use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::models::UpdateItemCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating an item (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UpdateItemRequest {
    name: Option<String>,
    quantity: Option<f64>,
    price: Option<f64>,
    unit: Option<String>,
    category: Option<String>,
}

impl UpdateItemRequest {
    fn try_into_command(self) -> Result<UpdateItemCommand, InventoryError> {
        UpdateItemCommand::parse(
            self.name,
            self.quantity,
            self.price,
            self.unit,
            self.category,
        )
    }
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateItemRequest>,
) -> Result<ApiSuccess<ItemResponseData>, ApiError> {
    let item_id = parse_item_id(&id)?;
    let command = req.try_into_command()?;

    state
        .inventory_service
        .update_item(&item_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref item| {
            ApiSuccess::new(
                StatusCode::OK,
                InventoryResponseData::new("Inventory item updated successfully.", item.into()),
            )
        })
}
