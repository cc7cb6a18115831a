use std::sync::Arc;

use reqwest::Method;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::store::TokenStore;

/// HTTP client for the FarmPal API.
///
/// Every request reads the persisted token and, when present, sends it as a
/// bearer credential. A 401 or 403 response clears the persisted token.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url, store)
    }

    pub fn with_http(
        http: reqwest::Client,
        base_url: impl Into<String>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::GET, path, None::<&()>).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.execute(Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.execute(method, path, body).await?;
        serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Send the request and return the decoded JSON body, `Null` when empty.
    async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);

        if let Some(token) = self.store.load().await? {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let value = if bytes.is_empty() {
            Value::Null
        } else if status.is_success() {
            serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))?
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        if status.is_success() {
            tracing::debug!(%method, path, status = status.as_u16(), "request succeeded");
            return Ok(value);
        }

        let message = error_message(status, &value);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(
                %method,
                path,
                status = status.as_u16(),
                "session rejected, clearing token"
            );
            if let Err(e) = self.store.clear().await {
                tracing::error!(error = %e, "failed to clear rejected token");
            }
            return Err(ClientError::Unauthorized {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(%method, path, status = status.as_u16(), %message, "request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Human readable failure: the body's `message`, else the status reason,
/// else `Error: <code>`.
pub fn error_message(status: StatusCode, body: &Value) -> String {
    if let Some(message) = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
    {
        return message.to_string();
    }

    match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => format!("Error: {}", status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_prefers_body_message() {
        let body = json!({"message": "Invalid credentials", "success": false});
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, &body),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_reason() {
        assert_eq!(error_message(StatusCode::NOT_FOUND, &Value::Null), "Not Found");
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, &json!({"message": ""})),
            "Bad Request"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_code() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(error_message(status, &Value::Null), "Error: 599");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let store: Arc<dyn TokenStore> = Arc::new(crate::store::MemoryTokenStore::new());
        let client = ApiClient::new("http://localhost:5000/", store);
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
