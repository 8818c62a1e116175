use crate::types::normalize_tag;
use crate::types::org::{DeploymentModel, OrgSizeBand};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingModel {
    Subscription,
    Usage,
    OneTime,
    Custom,
}

impl Default for PricingModel {
    fn default() -> Self {
        PricingModel::Custom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplementationSpeed {
    Fast,
    Moderate,
    Slow,
}

/// Catalog entry. `features` is declared, structured data populated at
/// ingestion; the matching scorers never infer capabilities from free text.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub customer_segments: Vec<OrgSizeBand>,
    #[serde(default)]
    pub geographic_coverage: Vec<String>,
    #[serde(default)]
    pub pricing_model: PricingModel,
    #[serde(default)]
    pub starting_price: Option<f32>,
    #[serde(default)]
    pub deployment_options: Vec<DeploymentModel>,
    #[serde(default)]
    pub features: BTreeSet<String>,
    #[serde(default)]
    pub implementation_speed: Option<ImplementationSpeed>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub rating: Option<f32>,
}

impl Vendor {
    pub fn covers_category(&self, tag: &str) -> bool {
        let wanted = normalize_tag(tag);
        self.categories
            .iter()
            .any(|category| normalize_tag(category) == wanted)
    }

    pub fn declares_feature(&self, tag: &str) -> bool {
        let wanted = normalize_tag(tag);
        self.features
            .iter()
            .any(|feature| normalize_tag(feature) == wanted)
    }
}
