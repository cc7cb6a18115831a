use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::models::CreateItemCommand;
use crate::domain::inventory::models::InventoryItem;
use crate::domain::inventory::models::ItemId;
use crate::domain::inventory::models::UpdateItemCommand;
use crate::domain::inventory::ports::InventoryRepository;
use crate::domain::inventory::ports::InventoryServicePort;

/// Domain service implementation for inventory operations.
pub struct InventoryService<IR>
where
    IR: InventoryRepository,
{
    repository: Arc<IR>,
}

impl<IR> InventoryService<IR>
where
    IR: InventoryRepository,
{
    pub fn new(repository: Arc<IR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<IR> InventoryServicePort for InventoryService<IR>
where
    IR: InventoryRepository,
{
    async fn list_items(&self) -> Result<Vec<InventoryItem>, InventoryError> {
        self.repository.list_all().await
    }

    async fn get_item(&self, id: &ItemId) -> Result<InventoryItem, InventoryError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))
    }

    async fn create_item(
        &self,
        command: CreateItemCommand,
    ) -> Result<InventoryItem, InventoryError> {
        let item = self.repository.create(InventoryItem::new(command)).await?;

        tracing::info!(item_id = %item.id, name = %item.name, "Inventory item created");

        Ok(item)
    }

    async fn update_item(
        &self,
        id: &ItemId,
        command: UpdateItemCommand,
    ) -> Result<InventoryItem, InventoryError> {
        let mut item = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))?;

        item.apply(command);

        let updated = self.repository.update(item).await?;

        tracing::info!(item_id = %updated.id, "Inventory item updated");

        Ok(updated)
    }

    async fn delete_item(&self, id: &ItemId) -> Result<(), InventoryError> {
        self.repository.delete(id).await?;

        tracing::info!(item_id = %id, "Inventory item deleted");

        Ok(())
    }
}
