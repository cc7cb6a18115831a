use serde::Serialize;

use super::ItemData;
use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::models::ItemId;

pub mod create_item;
pub mod delete_item;
pub mod get_item;
pub mod list_items;
pub mod update_item;

/// Message plus payload, for single-item and list responses alike.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryResponseData<T: Serialize + PartialEq> {
    pub message: String,
    pub data: T,
}

impl<T: Serialize + PartialEq> InventoryResponseData<T> {
    pub fn new(message: &str, data: T) -> Self {
        Self {
            message: message.to_string(),
            data,
        }
    }
}

pub type ItemResponseData = InventoryResponseData<ItemData>;

fn parse_item_id(raw: &str) -> Result<ItemId, InventoryError> {
    Ok(ItemId::from_string(raw)?)
}
