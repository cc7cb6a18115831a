use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::InventoryResponseData;
use super::ItemResponseData;
use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::models::CreateItemCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_item(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateItemRequest>,
) -> Result<ApiSuccess<ItemResponseData>, ApiError> {
    let item = state
        .inventory_service
        .create_item(body.try_into_command()?)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        InventoryResponseData::new("Inventory item created successfully.", (&item).into()),
    ))
}

/// HTTP request body for creating an item (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CreateItemRequest {
    name: Option<String>,
    quantity: Option<f64>,
    price: Option<f64>,
    unit: Option<String>,
    category: Option<String>,
}

impl CreateItemRequest {
    fn try_into_command(self) -> Result<CreateItemCommand, InventoryError> {
        CreateItemCommand::parse(
            self.name,
            self.quantity,
            self.price,
            self.unit,
            self.category,
        )
    }
}
