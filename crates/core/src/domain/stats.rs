use crate::domain::null_as_default;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(rename = "entities", default, deserialize_with = "null_as_default")]
    pub entity_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amazon_listings: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tiktok_metrics: u64,
    #[serde(default)]
    pub latest_report: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub week_start: NaiveDate,
    #[serde(default, deserialize_with = "null_as_default")]
    pub opportunity_count: u64,
    #[serde(default)]
    pub generated_at: Option<String>,
}

impl ReportSummary {
    /// Text shown for the report in the sidebar; also what the report search matches against.
    pub fn label(&self) -> String {
        format!(
            "Week of {} {} opportunities",
            self.week_start, self.opportunity_count
        )
    }

    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty() || self.label().to_lowercase().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stats_snapshot_reads_wire_names_and_nulls() {
        let v = json!({
            "entities": 12,
            "amazon_listings": null,
            "tiktok_metrics": 7,
            "latest_report": "2024-01-01"
        });
        let stats: StatsSnapshot = serde_json::from_value(v).unwrap();
        assert_eq!(stats.entity_count, 12);
        assert_eq!(stats.amazon_listings, 0);
        assert_eq!(stats.tiktok_metrics, 7);
        assert_eq!(stats.latest_report.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn report_search_is_case_insensitive() {
        let report: ReportSummary = serde_json::from_value(json!({
            "week_start": "2024-01-01",
            "opportunity_count": 5
        }))
        .unwrap();
        assert!(report.matches("WEEK OF 2024-01"));
        assert!(report.matches("5 opp"));
        assert!(report.matches("  "));
        assert!(!report.matches("2023"));
    }

    #[test]
    fn report_rejects_non_date_week() {
        let res = serde_json::from_value::<ReportSummary>(json!({
            "week_start": "last week",
            "opportunity_count": 1
        }));
        assert!(res.is_err());
    }
}
