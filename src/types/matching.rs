use crate::types::report::Score;
use serde::{Deserialize, Serialize};

/// Vendor-organization compatibility independent of priorities.
/// Sub-scores cap at 40/20/20/20 so `total_base` tops out at 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseScore {
    pub risk_area_coverage: Score,
    pub size_fit: Score,
    pub geo_coverage: Score,
    pub price_score: Score,
    pub total_base: Score,
}

/// Personalized addition on top of [`BaseScore`], capped at the policy's
/// boost ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityBoost {
    pub top_priority_boost: Score,
    pub matched_priority: Option<String>,
    pub feature_boost: Score,
    /// Capability tags the organization needs that this vendor does not
    /// declare. Never contains a declared feature.
    pub missing_features: Vec<String>,
    pub deployment_boost: Score,
    pub speed_boost: Score,
    pub total_boost: Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchQuality {
    #[serde(rename = "Highly Relevant")]
    HighlyRelevant,
    #[serde(rename = "Good Match")]
    GoodMatch,
    #[serde(rename = "Fair Match")]
    FairMatch,
}

impl MatchQuality {
    pub fn label(&self) -> &'static str {
        match self {
            MatchQuality::HighlyRelevant => "Highly Relevant",
            MatchQuality::GoodMatch => "Good Match",
            MatchQuality::FairMatch => "Fair Match",
        }
    }
}

/// One ranked row of the marketplace response. Field names are the JSON
/// contract the front end consumes (`baseScore.totalBase`, `matchReasons`,
/// ...), hence camelCase here while engine inputs stay snake_case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorMatch {
    pub vendor_id: String,
    pub vendor_name: String,
    pub featured: bool,
    pub rating: Option<f32>,
    pub base_score: BaseScore,
    pub priority_boost: PriorityBoost,
    pub total_score: Score,
    pub gaps_covered: usize,
    pub match_quality: Option<MatchQuality>,
    pub match_reasons: Vec<String>,
}

/// Caller-supplied ranking filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankOptions {
    pub min_score: Option<Score>,
    pub top_n: Option<usize>,
}
