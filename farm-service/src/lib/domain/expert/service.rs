use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::expert::errors::ExpertError;
use crate::domain::expert::models::ExpertMatch;
use crate::domain::expert::models::ExpertQuery;
use crate::domain::expert::ports::ExpertDirectory;
use crate::domain::expert::ports::ExpertServicePort;
use crate::domain::identity::models::Expert;

/// Domain service for the expert contact directory.
pub struct ExpertService<ED>
where
    ED: ExpertDirectory,
{
    directory: Arc<ED>,
}

impl<ED> ExpertService<ED>
where
    ED: ExpertDirectory,
{
    pub fn new(directory: Arc<ED>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl<ED> ExpertServicePort for ExpertService<ED>
where
    ED: ExpertDirectory,
{
    async fn list_available(&self) -> Result<Vec<Expert>, ExpertError> {
        self.directory
            .find_available(&ExpertQuery::default())
            .await
    }

    async fn match_experts(&self, query: &ExpertQuery) -> Result<Vec<ExpertMatch>, ExpertError> {
        let experts = self.directory.find_available(query).await?;

        if experts.is_empty() {
            tracing::debug!(topic = ?query.topic, language = ?query.language, "No expert matched");
            return Err(ExpertError::NoMatch);
        }

        Ok(experts
            .into_iter()
            .map(|expert| ExpertMatch::new(expert, query.topic.as_deref()))
            .collect())
    }
}
