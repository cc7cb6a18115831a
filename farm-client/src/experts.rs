use serde::Deserialize;
use serde::Serialize;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::session::ExpertProfile;
use crate::session::SessionContext;
use crate::session::UserProfile;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertMatch {
    pub id: String,
    pub name: String,
    pub languages: Vec<String>,
    pub expertise: Vec<String>,
    pub whatsapp_link: Option<String>,
}

/// Publicly listed expert.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExpertSummary {
    pub id: String,
    pub name: String,
    pub expertise: Vec<String>,
    pub languages: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Matches {
    experts: Vec<ExpertMatch>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    experts: Vec<ExpertSummary>,
}

#[derive(Debug, Deserialize)]
struct Availability {
    expert: ExpertProfile,
}

pub async fn list_experts(api: &ApiClient) -> Result<Vec<ExpertSummary>, ClientError> {
    let listing: Listing = api.get("/experts").await?;
    Ok(listing.experts)
}

/// Available experts matching the query. No match yields an empty list.
pub async fn contact_experts(
    session: &mut SessionContext,
    query: &ContactQuery,
) -> Result<Vec<ExpertMatch>, ClientError> {
    let result = match session.api().post::<_, Matches>("/contact", query).await {
        Ok(matches) => Ok(matches.experts),
        Err(ClientError::Api { status: 404, .. }) => Ok(Vec::new()),
        Err(e) => Err(e),
    };
    session.observe(result)
}

/// Toggle the signed-in expert's availability.
pub async fn set_availability(
    session: &mut SessionContext,
    available: bool,
) -> Result<ExpertProfile, ClientError> {
    let body = serde_json::json!({ "available": available });
    let result = session
        .api()
        .patch::<_, Availability>("/expert/availability", &body)
        .await;

    let expert = session.observe(result)?.expert;
    session.replace_user(UserProfile::Expert(expert.clone()));
    Ok(expert)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_serializes_to_empty_object() {
        assert_eq!(
            serde_json::to_value(ContactQuery::default()).unwrap(),
            serde_json::json!({})
        );
    }
}
