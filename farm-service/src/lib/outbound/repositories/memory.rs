//! Process-local stores used when no database is configured, and by tests.
//!
//! Uniqueness checks and inserts happen under one write lock, so two
//! concurrent signups for the same contact cannot both succeed.

use async_trait::async_trait;
use auth::Role;
use tokio::sync::RwLock;

use crate::domain::expert::errors::ExpertError;
use crate::domain::expert::models::ExpertQuery;
use crate::domain::expert::ports::ExpertDirectory;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::ContactAddress;
use crate::domain::identity::models::Expert;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::ports::CredentialStore;
use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::models::InventoryItem;
use crate::domain::inventory::models::ItemId;
use crate::domain::inventory::ports::InventoryRepository;

/// Accounts and experts in insertion order.
#[derive(Default)]
pub struct InMemoryIdentityRepository {
    identities: RwLock<Vec<Identity>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored identities with `role`.
    pub async fn count(&self, role: Role) -> usize {
        self.identities
            .read()
            .await
            .iter()
            .filter(|identity| identity.role() == role)
            .count()
    }

    /// Drop an identity. Returns whether it existed.
    pub async fn remove(&self, id: &IdentityId) -> bool {
        let mut identities = self.identities.write().await;
        let before = identities.len();
        identities.retain(|identity| identity.id() != *id);
        identities.len() != before
    }
}

#[async_trait]
impl CredentialStore for InMemoryIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        let mut identities = self.identities.write().await;
        let contact = identity.contact();

        if identities.iter().any(|existing| existing.contact() == contact) {
            return Err(IdentityError::DuplicateContact(contact.to_string()));
        }

        identities.push(identity.clone());
        Ok(identity)
    }

    async fn find_by_contact(
        &self,
        contact: &ContactAddress,
    ) -> Result<Option<Identity>, IdentityError> {
        Ok(self
            .identities
            .read()
            .await
            .iter()
            .find(|identity| identity.contact() == *contact)
            .cloned())
    }

    async fn find_by_id(
        &self,
        role: Role,
        id: &IdentityId,
    ) -> Result<Option<Identity>, IdentityError> {
        Ok(self
            .identities
            .read()
            .await
            .iter()
            .find(|identity| identity.role() == role && identity.id() == *id)
            .cloned())
    }

    async fn set_availability(
        &self,
        id: &IdentityId,
        available: bool,
    ) -> Result<Option<Expert>, IdentityError> {
        let mut identities = self.identities.write().await;

        Ok(identities.iter_mut().find_map(|identity| match identity {
            Identity::Expert(expert) if expert.id == *id => {
                expert.available = available;
                Some(expert.clone())
            }
            _ => None,
        }))
    }
}

#[async_trait]
impl ExpertDirectory for InMemoryIdentityRepository {
    async fn find_available(&self, query: &ExpertQuery) -> Result<Vec<Expert>, ExpertError> {
        Ok(self
            .identities
            .read()
            .await
            .iter()
            .filter_map(|identity| match identity {
                Identity::Expert(expert) if query.matches(expert) => Some(expert.clone()),
                _ => None,
            })
            .collect())
    }
}

/// Inventory items in insertion order.
#[derive(Default)]
pub struct InMemoryInventoryRepository {
    items: RwLock<Vec<InventoryItem>>,
}

impl InMemoryInventoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl InventoryRepository for InMemoryInventoryRepository {
    async fn create(&self, item: InventoryItem) -> Result<InventoryItem, InventoryError> {
        let mut items = self.items.write().await;

        if items.iter().any(|existing| existing.name == item.name) {
            return Err(InventoryError::DuplicateName(item.name));
        }

        items.push(item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<InventoryItem>, InventoryError> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .find(|item| item.id == *id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<InventoryItem>, InventoryError> {
        Ok(self.items.read().await.clone())
    }

    async fn update(&self, item: InventoryItem) -> Result<InventoryItem, InventoryError> {
        let mut items = self.items.write().await;

        if items
            .iter()
            .any(|existing| existing.id != item.id && existing.name == item.name)
        {
            return Err(InventoryError::DuplicateName(item.name));
        }

        let slot = items
            .iter_mut()
            .find(|existing| existing.id == item.id)
            .ok_or_else(|| InventoryError::NotFound(item.id.to_string()))?;

        *slot = item.clone();
        Ok(item)
    }

    async fn delete(&self, id: &ItemId) -> Result<(), InventoryError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id != *id);

        if items.len() == before {
            return Err(InventoryError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
