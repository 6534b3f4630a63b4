use crate::domain::null_as_default;
use serde::{Deserialize, Serialize};

/// Body of `GET /api/entity/{id}`. The backend returns the whole entity row; only the
/// fields rendered by the dashboard are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub canonical_name: String,
    #[serde(default)]
    pub category_primary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aliases: Vec<EntityAlias>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityAlias {
    pub alias_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
}

/// Body of `GET /api/entity/{id}/stats`. Every section may be empty; zero or absent counts
/// mean "no data", not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub amazon: AmazonStats,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tiktok: TikTokStats,
    #[serde(default)]
    pub latest_score: Option<LatestScore>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmazonStats {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub avg_price: Option<f64>,
    #[serde(default)]
    pub best_bsr: Option<f64>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
    #[serde(default)]
    pub total_reviews: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TikTokStats {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub max_views: Option<u64>,
    #[serde(default)]
    pub max_videos: Option<u64>,
    #[serde(default)]
    pub max_creators: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatestScore {
    #[serde(default)]
    pub score_winner_prob: Option<f64>,
    #[serde(default)]
    pub score_rank: Option<f64>,
    #[serde(default)]
    pub week_start: Option<String>,
    #[serde(default)]
    pub score_demand: Option<f64>,
    #[serde(default)]
    pub score_competition: Option<f64>,
    #[serde(default)]
    pub score_margin: Option<f64>,
    #[serde(default)]
    pub score_risk: Option<f64>,
}

impl AmazonStats {
    pub fn listing_count(&self) -> u64 {
        self.count.unwrap_or(0)
    }
}

impl TikTokStats {
    pub fn hashtag_count(&self) -> u64 {
        self.count.unwrap_or(0)
    }
}

impl EntityStats {
    pub fn winner_prob(&self) -> Option<f64> {
        self.latest_score.as_ref()?.score_winner_prob
    }

    pub fn has_data(&self) -> bool {
        self.amazon.listing_count() > 0
            || self.tiktok.hashtag_count() > 0
            || self.winner_prob().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_sections_mean_no_data() {
        let v = json!({
            "latest_score": null,
            "amazon": {},
            "tiktok": {},
            "note": "Entity not found"
        });
        let stats: EntityStats = serde_json::from_value(v).unwrap();
        assert!(!stats.has_data());
        assert_eq!(stats.amazon.listing_count(), 0);
    }

    #[test]
    fn parses_full_stats() {
        let v = json!({
            "latest_score": {
                "score_winner_prob": 0.42,
                "score_demand": 60.0,
                "week_start": "2024-01-01"
            },
            "amazon": {
                "count": 3,
                "avg_price": 24.5,
                "best_bsr": 1520,
                "avg_rating": 4.4,
                "total_reviews": 12873
            },
            "tiktok": {"count": 2, "max_views": 1500000, "max_videos": 40, "max_creators": 12}
        });
        let stats: EntityStats = serde_json::from_value(v).unwrap();
        assert!(stats.has_data());
        assert_eq!(stats.amazon.best_bsr, Some(1520.0));
        assert_eq!(stats.tiktok.max_views, Some(1_500_000));
        assert_eq!(stats.winner_prob(), Some(0.42));
    }

    #[test]
    fn detail_keeps_alias_order() {
        let v = json!({
            "entity_id": "ent_001",
            "canonical_name": "Ice roller",
            "aliases": [
                {"alias_text": "B0ICE", "source": "amazon"},
                {"alias_text": "#iceroller", "source": "tiktok"}
            ]
        });
        let detail: EntityDetail = serde_json::from_value(v).unwrap();
        assert_eq!(detail.aliases[0].source, "amazon");
        assert_eq!(detail.aliases[1].alias_text, "#iceroller");
    }
}
