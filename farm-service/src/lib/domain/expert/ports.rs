use async_trait::async_trait;

use crate::domain::expert::errors::ExpertError;
use crate::domain::expert::models::ExpertMatch;
use crate::domain::expert::models::ExpertQuery;
use crate::domain::identity::models::Expert;

/// Port for expert directory operations.
#[async_trait]
pub trait ExpertServicePort: Send + Sync + 'static {
    /// All experts currently accepting contacts, without contact details.
    async fn list_available(&self) -> Result<Vec<Expert>, ExpertError>;

    /// Available experts matching `query`, each with a ready-to-use contact link.
    ///
    /// # Errors
    /// * `NoMatch` - No available expert matches
    /// * `DatabaseError` - Directory lookup failed
    async fn match_experts(&self, query: &ExpertQuery) -> Result<Vec<ExpertMatch>, ExpertError>;
}

/// Read access to the expert collection for matching.
#[async_trait]
pub trait ExpertDirectory: Send + Sync + 'static {
    /// Available experts satisfying `query`, oldest registration first.
    ///
    /// Implementations must agree with `ExpertQuery::matches`.
    async fn find_available(&self, query: &ExpertQuery) -> Result<Vec<Expert>, ExpertError>;
}
