use crate::domain::null_as_default;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of `GET /api/opportunities/{week}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunitySet {
    #[serde(default)]
    pub week_start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub opportunities: Vec<Opportunity>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub entity_id: String,
    pub canonical_name: String,
    #[serde(default)]
    pub category_primary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score_winner_prob: f64,
    #[serde(default)]
    pub score_rank: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score_demand: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score_competition: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score_margin: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score_risk: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub innovation_angles: Vec<String>,
    #[serde(default)]
    pub experiment_plan: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explanations: Explanations,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Explanations {
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_signals: Vec<String>,
}

impl Opportunity {
    pub fn category(&self) -> &str {
        self.category_primary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("General")
    }

    pub fn experiment_plan(&self) -> Option<&str> {
        self.experiment_plan
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_backend_report_row() {
        let v = json!({
            "week_start": "2024-01-01",
            "total": 1,
            "opportunities": [{
                "entity_id": "ent_001",
                "canonical_name": "Ice roller",
                "category_primary": null,
                "score_winner_prob": 0.62,
                "score_rank": 62.0,
                "score_demand": 81.5,
                "score_competition": 30.0,
                "score_margin": 55.0,
                "score_risk": 20.0,
                "explanations": {
                    "top_signals": ["TikTok views: 1,200", "Review velocity: 3"],
                    "demand_breakdown": {"tiktok_views": 1200}
                },
                "innovation_angles": ["Improve durability based on review feedback"],
                "experiment_plan": "Test Ice roller with fake-door landing page"
            }]
        });

        let set: OpportunitySet = serde_json::from_value(v).unwrap();
        assert_eq!(set.week_start, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(set.total, Some(1));
        let opp = &set.opportunities[0];
        assert_eq!(opp.category(), "General");
        assert_eq!(opp.explanations.top_signals.len(), 2);
        assert_eq!(opp.score_rank, Some(62.0));
    }

    #[test]
    fn tolerates_empty_explanations_and_missing_extras() {
        let v = json!({
            "opportunities": [{
                "entity_id": "ent_002",
                "canonical_name": "Desk lamp",
                "score_winner_prob": 0.1,
                "explanations": {},
                "innovation_angles": null,
                "experiment_plan": "   "
            }]
        });

        let set: OpportunitySet = serde_json::from_value(v).unwrap();
        let opp = &set.opportunities[0];
        assert!(opp.explanations.top_signals.is_empty());
        assert!(opp.innovation_angles.is_empty());
        assert_eq!(opp.experiment_plan(), None);
        assert_eq!(opp.score_risk, 0.0);
    }
}
