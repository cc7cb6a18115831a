use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::models::InventoryItem;
use crate::domain::inventory::models::ItemId;
use crate::domain::inventory::ports::InventoryRepository;

#[derive(Debug, sqlx::FromRow)]
struct InventoryItemRecord {
    id: Uuid,
    name: String,
    quantity: f64,
    unit: String,
    price: f64,
    category: String,
    created_at: DateTime<Utc>,
}

impl From<InventoryItemRecord> for InventoryItem {
    fn from(r: InventoryItemRecord) -> Self {
        InventoryItem {
            id: ItemId(r.id),
            name: r.name,
            quantity: r.quantity,
            unit: r.unit,
            price: r.price,
            category: r.category,
            created_at: r.created_at,
        }
    }
}

fn write_error(e: sqlx::Error, name: &str) -> InventoryError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return InventoryError::DuplicateName(name.to_string());
        }
        if db_err.is_check_violation() {
            return InventoryError::Validation(db_err.message().to_string());
        }
    }
    InventoryError::DatabaseError(e.to_string())
}

fn database_error(e: sqlx::Error) -> InventoryError {
    InventoryError::DatabaseError(e.to_string())
}

pub struct PostgresInventoryRepository {
    pool: PgPool,
}

impl PostgresInventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryRepository for PostgresInventoryRepository {
    async fn create(&self, item: InventoryItem) -> Result<InventoryItem, InventoryError> {
        sqlx::query(
            r#"
            INSERT INTO inventory_items (id, name, quantity, unit, price, category, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(item.id.0)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(&item.unit)
        .bind(item.price)
        .bind(&item.category)
        .bind(item.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &item.name))?;

        Ok(item)
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<InventoryItem>, InventoryError> {
        let record = sqlx::query_as::<_, InventoryItemRecord>(
            r#"
            SELECT id, name, quantity, unit, price, category, created_at
            FROM inventory_items
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(record.map(InventoryItem::from))
    }

    async fn list_all(&self) -> Result<Vec<InventoryItem>, InventoryError> {
        let records = sqlx::query_as::<_, InventoryItemRecord>(
            r#"
            SELECT id, name, quantity, unit, price, category, created_at
            FROM inventory_items
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(records.into_iter().map(InventoryItem::from).collect())
    }

    async fn update(&self, item: InventoryItem) -> Result<InventoryItem, InventoryError> {
        let record = sqlx::query_as::<_, InventoryItemRecord>(
            r#"
            UPDATE inventory_items
            SET name = $2, quantity = $3, unit = $4, price = $5, category = $6
            WHERE id = $1
            RETURNING id, name, quantity, unit, price, category, created_at
            "#,
        )
        .bind(item.id.0)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(&item.unit)
        .bind(item.price)
        .bind(&item.category)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, &item.name))?;

        record
            .map(InventoryItem::from)
            .ok_or_else(|| InventoryError::NotFound(item.id.to_string()))
    }

    async fn delete(&self, id: &ItemId) -> Result<(), InventoryError> {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(InventoryError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
