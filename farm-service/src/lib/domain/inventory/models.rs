use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::errors::ItemIdError;

/// Stock item held by the farm.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn new(command: CreateItemCommand) -> Self {
        Self {
            id: ItemId::new(),
            name: command.name,
            quantity: command.quantity,
            unit: command.unit,
            price: command.price,
            category: command.category,
            created_at: Utc::now(),
        }
    }

    /// Overwrite the fields present in `command`.
    pub fn apply(&mut self, command: UpdateItemCommand) {
        if let Some(name) = command.name {
            self.name = name;
        }
        if let Some(quantity) = command.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = command.price {
            self.price = price;
        }
        if let Some(unit) = command.unit {
            self.unit = unit;
        }
        if let Some(category) = command.category {
            self.category = category;
        }
    }
}

/// Inventory item unique identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ItemIdError> {
        Uuid::parse_str(s)
            .map(ItemId)
            .map_err(|_| ItemIdError::InvalidFormat(s.to_string()))
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn item_name(name: String) -> Result<String, InventoryError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(InventoryError::Validation(
            "name must be a non-empty string".to_string(),
        ));
    }
    Ok(name)
}

fn non_negative(field: &str, value: f64) -> Result<f64, InventoryError> {
    if !value.is_finite() || value < 0.0 {
        return Err(InventoryError::Validation(format!(
            "{} must be a non-negative number",
            field
        )));
    }
    Ok(value)
}

/// Command to create an inventory item with validated fields
#[derive(Debug, Clone, PartialEq)]
pub struct CreateItemCommand {
    pub name: String,
    pub quantity: f64,
    pub price: f64,
    pub unit: String,
    pub category: String,
}

impl CreateItemCommand {
    /// # Errors
    /// * `Validation` - Name blank, quantity/price missing or negative
    pub fn parse(
        name: Option<String>,
        quantity: Option<f64>,
        price: Option<f64>,
        unit: Option<String>,
        category: Option<String>,
    ) -> Result<Self, InventoryError> {
        let missing = |field: &str| InventoryError::Validation(format!("{} is required", field));

        Ok(Self {
            name: item_name(name.ok_or_else(|| missing("name"))?)?,
            quantity: non_negative("quantity", quantity.ok_or_else(|| missing("quantity"))?)?,
            price: non_negative("price", price.ok_or_else(|| missing("price"))?)?,
            unit: unit.map(|u| u.trim().to_string()).unwrap_or_default(),
            category: category.map(|c| c.trim().to_string()).unwrap_or_default(),
        })
    }
}

/// Partial update of an inventory item.
///
/// Only provided fields are updated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateItemCommand {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<String>,
}

impl UpdateItemCommand {
    /// # Errors
    /// * `EmptyUpdate` - No field provided
    /// * `Validation` - A provided field is invalid
    pub fn parse(
        name: Option<String>,
        quantity: Option<f64>,
        price: Option<f64>,
        unit: Option<String>,
        category: Option<String>,
    ) -> Result<Self, InventoryError> {
        let command = Self {
            name: name.map(item_name).transpose()?,
            quantity: quantity.map(|q| non_negative("quantity", q)).transpose()?,
            price: price.map(|p| non_negative("price", p)).transpose()?,
            unit: unit.map(|u| u.trim().to_string()),
            category: category.map(|c| c.trim().to_string()),
        };

        if command == Self::default() {
            return Err(InventoryError::EmptyUpdate);
        }

        Ok(command)
    }
}
