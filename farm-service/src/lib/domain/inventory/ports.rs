use async_trait::async_trait;

use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::models::CreateItemCommand;
use crate::domain::inventory::models::InventoryItem;
use crate::domain::inventory::models::ItemId;
use crate::domain::inventory::models::UpdateItemCommand;

/// Port for inventory operations.
#[async_trait]
pub trait InventoryServicePort: Send + Sync + 'static {
    /// All items, oldest first.
    async fn list_items(&self) -> Result<Vec<InventoryItem>, InventoryError>;

    /// # Errors
    /// * `NotFound` - Item does not exist
    async fn get_item(&self, id: &ItemId) -> Result<InventoryItem, InventoryError>;

    /// # Errors
    /// * `DuplicateName` - An item with this name exists
    async fn create_item(
        &self,
        command: CreateItemCommand,
    ) -> Result<InventoryItem, InventoryError>;

    /// Apply the present fields of `command` to an existing item.
    ///
    /// # Errors
    /// * `EmptyUpdate` - No field present
    /// * `NotFound` - Item does not exist
    /// * `DuplicateName` - New name is taken
    async fn update_item(
        &self,
        id: &ItemId,
        command: UpdateItemCommand,
    ) -> Result<InventoryItem, InventoryError>;

    /// # Errors
    /// * `NotFound` - Item does not exist
    async fn delete_item(&self, id: &ItemId) -> Result<(), InventoryError>;
}

/// Persistence operations for inventory items. Names are unique.
#[async_trait]
pub trait InventoryRepository: Send + Sync + 'static {
    async fn create(&self, item: InventoryItem) -> Result<InventoryItem, InventoryError>;

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<InventoryItem>, InventoryError>;

    async fn list_all(&self) -> Result<Vec<InventoryItem>, InventoryError>;

    /// # Errors
    /// * `NotFound` - No item with this ID
    /// * `DuplicateName` - Another item already uses the name
    async fn update(&self, item: InventoryItem) -> Result<InventoryItem, InventoryError>;

    /// # Errors
    /// * `NotFound` - No item with this ID
    async fn delete(&self, id: &ItemId) -> Result<(), InventoryError>;
}
