use crate::api::{ApiError, ApiResult, DashboardApi, StatsLookup};
use crate::config::Settings;
use crate::domain::entity::{EntityDetail, EntityStats};
use crate::domain::opportunity::OpportunitySet;
use crate::domain::stats::{ReportSummary, StatsSnapshot};
use anyhow::Context;
use chrono::NaiveDate;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Client for the winner engine backend. One GET per call, no retries; every failure
/// is returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct HttpDashboardApi {
    http: reqwest::Client,
    base_url: Url,
    top_n: Option<u32>,
}

impl HttpDashboardApi {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.http_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .context("failed to build dashboard http client")?;

        Self::new(http, settings.api_base_url(), settings.opportunities_top_n)
    }

    pub fn new(http: reqwest::Client, base_url: &str, top_n: Option<u32>) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid API base URL: {base_url}"))?;
        anyhow::ensure!(
            !base_url.cannot_be_a_base(),
            "API base URL must be hierarchical (got {base_url})"
        );

        Ok(Self {
            http,
            base_url,
            top_n,
        })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Cannot fail: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch(&self, url: Url) -> ApiResult<(StatusCode, String)> {
        let endpoint = url.path().to_string();
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network {
                endpoint: endpoint.clone(),
                detail: e.to_string(),
            })?;

        let status = res.status();
        let text = res.text().await.map_err(|e| ApiError::Network {
            endpoint: endpoint.clone(),
            detail: format!("failed to read response body: {e}"),
        })?;

        tracing::debug!(%endpoint, status = status.as_u16(), bytes = text.len(), "api response");
        Ok((status, text))
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.url(segments);
        let endpoint = url.path().to_string();
        let (status, text) = self.fetch(url).await?;
        decode(&endpoint, status, &text)
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, status: StatusCode, text: &str) -> ApiResult<T> {
    if !status.is_success() {
        return Err(ApiError::HttpStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        });
    }

    let raw_json = serde_json::from_str::<Value>(text).map_err(|e| ApiError::Parse {
        endpoint: endpoint.to_string(),
        detail: e.to_string(),
    })?;

    if let Some(message) = error_message(&raw_json) {
        return Err(ApiError::Application {
            endpoint: endpoint.to_string(),
            message,
        });
    }

    serde_json::from_value::<T>(raw_json).map_err(|e| ApiError::Parse {
        endpoint: endpoint.to_string(),
        detail: e.to_string(),
    })
}

fn error_message(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait::async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn stats(&self) -> ApiResult<StatsSnapshot> {
        self.get_json(&["api", "stats"]).await
    }

    async fn reports(&self) -> ApiResult<Vec<ReportSummary>> {
        self.get_json(&["api", "reports"]).await
    }

    async fn opportunities(&self, week: NaiveDate) -> ApiResult<OpportunitySet> {
        let week = week.format("%Y-%m-%d").to_string();
        let mut url = self.url(&["api", "opportunities", &week]);
        if let Some(top_n) = self.top_n {
            url.query_pairs_mut()
                .append_pair("top_n", &top_n.to_string());
        }
        let endpoint = url.path().to_string();
        let (status, text) = self.fetch(url).await?;
        decode(&endpoint, status, &text)
    }

    async fn entity_detail(&self, entity_id: &str) -> ApiResult<EntityDetail> {
        self.get_json(&["api", "entity", entity_id]).await
    }

    async fn entity_stats(&self, entity_id: &str) -> ApiResult<StatsLookup> {
        let url = self.url(&["api", "entity", entity_id, "stats"]);
        let endpoint = url.path().to_string();
        let (status, text) = self.fetch(url).await?;

        if status == StatusCode::NOT_FOUND {
            let missing = serde_json::from_str::<Value>(&text)
                .ok()
                .as_ref()
                .and_then(error_message);
            if let Some(error) = missing {
                tracing::debug!(%endpoint, %error, "entity stats not found; treating as no data");
                return Ok(StatsLookup::Missing { error });
            }
        }

        decode::<EntityStats>(&endpoint, status, &text).map(StatsLookup::Found)
    }
}
