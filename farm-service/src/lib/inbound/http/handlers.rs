use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::expert::errors::ExpertError;
use crate::domain::expert::models::ExpertMatch;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Account;
use crate::domain::identity::models::Expert;
use crate::domain::identity::models::Identity;
use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::models::InventoryItem;

pub mod contact_experts;
pub mod inventory;
pub mod list_experts;
pub mod login;
pub mod login_expert;
pub mod me;
pub mod register_expert;
pub mod signup;
pub mod update_availability;

const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(message))).into_response()
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::MissingFields(_)
            | IdentityError::InvalidIdentityId(_)
            | IdentityError::InvalidEmail(_)
            | IdentityError::InvalidPhone(_)
            | IdentityError::DuplicateContact(_)
            | IdentityError::AlreadyExists(_)
            | IdentityError::InvalidCredentials
            | IdentityError::WrongRole(_) => ApiError::BadRequest(err.to_string()),
            IdentityError::NotFound(_) => ApiError::NotFound(err.to_string()),
            IdentityError::DatabaseError(_) | IdentityError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::InvalidItemId(_)
            | InventoryError::Validation(_)
            | InventoryError::EmptyUpdate => ApiError::BadRequest(err.to_string()),
            InventoryError::NotFound(_) => ApiError::NotFound(err.to_string()),
            InventoryError::DuplicateName(_) => ApiError::Conflict(err.to_string()),
            InventoryError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<ExpertError> for ApiError {
    fn from(err: ExpertError) -> Self {
        match err {
            ExpertError::NoMatch => ApiError::NotFound(err.to_string()),
            ExpertError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// JSON body extractor whose rejections use the API error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Response envelope: `success` plus the payload's own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    #[serde(flatten)]
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(message: String) -> Self {
        Self {
            success: false,
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Account projection returned by signup, login and `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl From<&Account> for UserData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            username: account.name.clone(),
            email: account.email.as_str().to_string(),
            phone: account.phone.clone(),
            address: account.address.clone(),
        }
    }
}

/// Expert projection. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertData {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub expertise: Vec<String>,
    pub languages: Vec<String>,
    pub available: bool,
}

impl From<&Expert> for ExpertData {
    fn from(expert: &Expert) -> Self {
        Self {
            id: expert.id.to_string(),
            name: expert.name.clone(),
            phone: expert.phone.as_str().to_string(),
            expertise: expert.expertise.clone(),
            languages: expert.languages.clone(),
            available: expert.available,
        }
    }
}

/// Either projection, tagged with the identity's role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum IdentityData {
    Account(UserData),
    Expert(ExpertData),
}

impl From<&Identity> for IdentityData {
    fn from(identity: &Identity) -> Self {
        match identity {
            Identity::Account(account) => IdentityData::Account(account.into()),
            Identity::Expert(expert) => IdentityData::Expert(expert.into()),
        }
    }
}

/// Publicly listed expert, without contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpertSummaryData {
    pub id: String,
    pub name: String,
    pub expertise: Vec<String>,
    pub languages: Vec<String>,
}

impl From<&Expert> for ExpertSummaryData {
    fn from(expert: &Expert) -> Self {
        Self {
            id: expert.id.to_string(),
            name: expert.name.clone(),
            expertise: expert.expertise.clone(),
            languages: expert.languages.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertMatchData {
    pub id: String,
    pub name: String,
    pub languages: Vec<String>,
    pub expertise: Vec<String>,
    pub whatsapp_link: Option<String>,
}

impl From<ExpertMatch> for ExpertMatchData {
    fn from(matched: ExpertMatch) -> Self {
        Self {
            id: matched.id.to_string(),
            name: matched.name,
            languages: matched.languages,
            expertise: matched.expertise,
            whatsapp_link: matched.whatsapp_link,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub category: String,
    pub created_at: String,
}

impl From<&InventoryItem> for ItemData {
    fn from(item: &InventoryItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            price: item.price,
            category: item.category.clone(),
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::NotFound("User not found: a@b.co".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "User not found: a@b.co");
    }

    #[tokio::test]
    async fn test_internal_error_is_redacted() {
        let error = ApiError::InternalServerError("connection refused at 10.0.0.3".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal Server Error");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_success_body_flattens_payload() {
        let response = ApiSuccess::new(
            StatusCode::OK,
            ApiErrorData {
                message: "ok".to_string(),
            },
        )
        .into_response();

        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({"success": true, "message": "ok"}));
    }

    #[test]
    fn test_identity_error_status_mapping() {
        assert!(matches!(
            ApiError::from(IdentityError::AlreadyExists("a@b.co".to_string())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(IdentityError::InvalidCredentials),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(IdentityError::NotFound("a@b.co".to_string())),
            ApiError::NotFound(_)
        ));
        // 403 is reserved for rejected tokens; clients drop the session on it.
        assert!(matches!(
            ApiError::from(IdentityError::WrongRole("experts only".to_string())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(IdentityError::DatabaseError("down".to_string())),
            ApiError::InternalServerError(_)
        ));
    }

    #[test]
    fn test_inventory_error_status_mapping() {
        assert!(matches!(
            ApiError::from(InventoryError::EmptyUpdate),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(InventoryError::DuplicateName("Feed".to_string())),
            ApiError::Conflict(_)
        ));
    }
}
