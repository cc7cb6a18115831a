use serde::Deserialize;
use serde::Serialize;

use crate::error::ClientError;
use crate::session::SessionContext;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub category: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewItem {
    pub name: String,
    pub quantity: f64,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Partial update; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

const ITEMS_PATH: &str = "/inventory/item";

fn item_path(id: &str) -> String {
    format!("{}/{}", ITEMS_PATH, id)
}

pub async fn list_items(session: &mut SessionContext) -> Result<Vec<Item>, ClientError> {
    let result = session.api().get::<Envelope<Vec<Item>>>(ITEMS_PATH).await;
    session.observe(result).map(|envelope| envelope.data)
}

pub async fn get_item(session: &mut SessionContext, id: &str) -> Result<Item, ClientError> {
    let result = session.api().get::<Envelope<Item>>(&item_path(id)).await;
    session.observe(result).map(|envelope| envelope.data)
}

pub async fn create_item(
    session: &mut SessionContext,
    item: &NewItem,
) -> Result<Item, ClientError> {
    let result = session
        .api()
        .post::<_, Envelope<Item>>(ITEMS_PATH, item)
        .await;
    session.observe(result).map(|envelope| envelope.data)
}

pub async fn update_item(
    session: &mut SessionContext,
    id: &str,
    update: &ItemUpdate,
) -> Result<Item, ClientError> {
    let result = session
        .api()
        .patch::<_, Envelope<Item>>(&item_path(id), update)
        .await;
    session.observe(result).map(|envelope| envelope.data)
}

pub async fn delete_item(session: &mut SessionContext, id: &str) -> Result<(), ClientError> {
    let result = session.api().delete(&item_path(id)).await;
    session.observe(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_skips_unset_fields() {
        let update = ItemUpdate {
            quantity: Some(4.0),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"quantity": 4.0})
        );
    }

    #[test]
    fn test_item_reads_camel_case() {
        let item: Item = serde_json::from_value(serde_json::json!({
            "id": "b1",
            "name": "Layer feed",
            "quantity": 12.0,
            "unit": "bag",
            "price": 9500.5,
            "category": "Poultry",
            "createdAt": "2026-01-01T00:00:00+00:00"
        }))
        .unwrap();
        assert_eq!(item.created_at, "2026-01-01T00:00:00+00:00");
    }
}
