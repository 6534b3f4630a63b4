pub mod error;
pub mod http;

#[cfg(test)]
pub(crate) mod fake;

use crate::domain::entity::{EntityDetail, EntityStats};
use crate::domain::opportunity::OpportunitySet;
use crate::domain::stats::{ReportSummary, StatsSnapshot};
use chrono::NaiveDate;

pub use error::ApiError;
pub use http::HttpDashboardApi;

pub type ApiResult<T> = Result<T, ApiError>;

/// Outcome of the entity stats lookup. A 404 carrying an `error` field is a valid
/// "nothing recorded for this entity" answer rather than a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsLookup {
    Found(EntityStats),
    Missing { error: String },
}

#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    async fn stats(&self) -> ApiResult<StatsSnapshot>;

    async fn reports(&self) -> ApiResult<Vec<ReportSummary>>;

    async fn opportunities(&self, week: NaiveDate) -> ApiResult<OpportunitySet>;

    async fn entity_detail(&self, entity_id: &str) -> ApiResult<EntityDetail>;

    async fn entity_stats(&self, entity_id: &str) -> ApiResult<StatsLookup>;
}
