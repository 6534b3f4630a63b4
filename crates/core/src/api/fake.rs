use crate::api::{ApiError, ApiResult, DashboardApi, StatsLookup};
use crate::domain::entity::{EntityDetail, EntityStats};
use crate::domain::opportunity::{Explanations, Opportunity, OpportunitySet};
use crate::domain::stats::{ReportSummary, StatsSnapshot};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// In-memory backend for controller tests. Records every call.
pub(crate) struct FakeApi {
    stats: Mutex<ApiResult<StatsSnapshot>>,
    stats_delay: Mutex<Option<Duration>>,
    reports: Mutex<ApiResult<Vec<ReportSummary>>>,
    weeks: Mutex<HashMap<NaiveDate, ApiResult<OpportunitySet>>>,
    week_delays: Mutex<HashMap<NaiveDate, Duration>>,
    details: Mutex<HashMap<String, ApiResult<EntityDetail>>>,
    entity_stats: Mutex<HashMap<String, ApiResult<StatsLookup>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            stats: Mutex::new(Ok(StatsSnapshot::default())),
            stats_delay: Mutex::new(None),
            reports: Mutex::new(Ok(Vec::new())),
            weeks: Mutex::new(HashMap::new()),
            week_delays: Mutex::new(HashMap::new()),
            details: Mutex::new(HashMap::new()),
            entity_stats: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_stats(self, stats: ApiResult<StatsSnapshot>) -> Self {
        *self.stats.lock().unwrap() = stats;
        self
    }

    pub fn with_stats_delay(self, delay: Duration) -> Self {
        *self.stats_delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn with_reports(self, reports: ApiResult<Vec<ReportSummary>>) -> Self {
        *self.reports.lock().unwrap() = reports;
        self
    }

    pub fn with_week(self, week: NaiveDate, opportunities: Vec<Opportunity>) -> Self {
        self.weeks.lock().unwrap().insert(
            week,
            Ok(OpportunitySet {
                week_start: Some(week),
                total: Some(opportunities.len() as u64),
                opportunities,
            }),
        );
        self
    }

    pub fn with_week_error(self, week: NaiveDate, err: ApiError) -> Self {
        self.weeks.lock().unwrap().insert(week, Err(err));
        self
    }

    pub fn with_week_delay(self, week: NaiveDate, delay: Duration) -> Self {
        self.week_delays.lock().unwrap().insert(week, delay);
        self
    }

    pub fn with_detail(self, entity_id: &str, detail: ApiResult<EntityDetail>) -> Self {
        self.details
            .lock()
            .unwrap()
            .insert(entity_id.to_string(), detail);
        self
    }

    pub fn with_entity_stats(self, entity_id: &str, stats: ApiResult<StatsLookup>) -> Self {
        self.entity_stats
            .lock()
            .unwrap()
            .insert(entity_id.to_string(), stats);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn not_found(endpoint: String) -> ApiError {
    ApiError::HttpStatus {
        endpoint,
        status: 404,
    }
}

#[async_trait::async_trait]
impl DashboardApi for FakeApi {
    async fn stats(&self) -> ApiResult<StatsSnapshot> {
        self.record("stats".to_string());
        let delay = *self.stats_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.stats.lock().unwrap().clone()
    }

    async fn reports(&self) -> ApiResult<Vec<ReportSummary>> {
        self.record("reports".to_string());
        self.reports.lock().unwrap().clone()
    }

    async fn opportunities(&self, week: NaiveDate) -> ApiResult<OpportunitySet> {
        self.record(format!("opportunities:{week}"));
        let delay = self.week_delays.lock().unwrap().get(&week).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.weeks
            .lock()
            .unwrap()
            .get(&week)
            .cloned()
            .unwrap_or_else(|| Err(not_found(format!("/api/opportunities/{week}"))))
    }

    async fn entity_detail(&self, entity_id: &str) -> ApiResult<EntityDetail> {
        self.record(format!("entity:{entity_id}"));
        self.details
            .lock()
            .unwrap()
            .get(entity_id)
            .cloned()
            .unwrap_or_else(|| Err(not_found(format!("/api/entity/{entity_id}"))))
    }

    async fn entity_stats(&self, entity_id: &str) -> ApiResult<StatsLookup> {
        self.record(format!("entity_stats:{entity_id}"));
        self.entity_stats
            .lock()
            .unwrap()
            .get(entity_id)
            .cloned()
            .unwrap_or_else(|| Ok(StatsLookup::Found(EntityStats::default())))
    }
}

pub(crate) fn week(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub(crate) fn report(week_start: &str, opportunity_count: u64) -> ReportSummary {
    ReportSummary {
        week_start: week(week_start),
        opportunity_count,
        generated_at: None,
    }
}

pub(crate) fn opportunity(entity_id: &str, canonical_name: &str) -> Opportunity {
    Opportunity {
        entity_id: entity_id.to_string(),
        canonical_name: canonical_name.to_string(),
        category_primary: Some("Home".to_string()),
        score_winner_prob: 0.62,
        score_rank: Some(62.0),
        score_demand: 81.5,
        score_competition: 30.0,
        score_margin: 55.0,
        score_risk: 20.0,
        innovation_angles: vec!["Improve durability based on review feedback".to_string()],
        experiment_plan: Some(format!("Test {canonical_name} with a fake-door page")),
        explanations: Explanations {
            top_signals: vec!["TikTok views: 1,200".to_string()],
        },
    }
}
