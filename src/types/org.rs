use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgSizeBand {
    Startup,
    Small,
    MidMarket,
    Enterprise,
}

impl OrgSizeBand {
    pub fn label(&self) -> &'static str {
        match self {
            OrgSizeBand::Startup => "startup",
            OrgSizeBand::Small => "small",
            OrgSizeBand::MidMarket => "mid-market",
            OrgSizeBand::Enterprise => "enterprise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetBand {
    Under10k,
    From10kTo50k,
    From50kTo250k,
    Over250k,
}

impl BudgetBand {
    /// Upper bound of the band in currency units; the top band is unbounded.
    pub fn ceiling(&self) -> f32 {
        match self {
            BudgetBand::Under10k => 10_000.0,
            BudgetBand::From10kTo50k => 50_000.0,
            BudgetBand::From50kTo250k => 250_000.0,
            BudgetBand::Over250k => f32::INFINITY,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetBand::Under10k => "under 10k",
            BudgetBand::From10kTo50k => "10k-50k",
            BudgetBand::From50kTo250k => "50k-250k",
            BudgetBand::Over250k => "over 250k",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentModel {
    Cloud,
    OnPremise,
    Hybrid,
}

impl DeploymentModel {
    pub fn label(&self) -> &'static str {
        match self {
            DeploymentModel::Cloud => "cloud",
            DeploymentModel::OnPremise => "on-premise",
            DeploymentModel::Hybrid => "hybrid",
        }
    }
}

/// Buyer profile the matching scorers run against. Every field except the
/// name may be absent; missing attributes degrade the affected sub-score to
/// its neutral value instead of failing the pass.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Organization {
    pub name: String,
    #[serde(default)]
    pub size: Option<OrgSizeBand>,
    #[serde(default)]
    pub jurisdictions: Vec<String>,
    #[serde(default)]
    pub budget: Option<BudgetBand>,
    /// Ranked, highest first.
    #[serde(default)]
    pub priorities: Vec<String>,
    #[serde(default)]
    pub preferred_deployment: Option<DeploymentModel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organization_parses_with_only_a_name() {
        let org: Organization =
            serde_json::from_str(r#"{"name": "Acme"}"#).expect("minimal org should parse");
        assert!(org.size.is_none());
        assert!(org.priorities.is_empty());
    }

    #[test]
    fn size_band_uses_snake_case_wire_form() {
        let org: Organization =
            serde_json::from_str(r#"{"name": "Acme", "size": "mid_market"}"#)
                .expect("org should parse");
        assert_eq!(org.size, Some(OrgSizeBand::MidMarket));
    }

    #[test]
    fn top_budget_band_is_unbounded() {
        assert!(BudgetBand::Over250k.ceiling().is_infinite());
        assert!(BudgetBand::Under10k.ceiling() < BudgetBand::From10kTo50k.ceiling());
    }
}
