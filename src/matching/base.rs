use crate::types::matching::BaseScore;
use crate::types::normalize_tag;
use crate::types::org::Organization;
use crate::types::report::Gap;
use crate::types::vendor::{PricingModel, Vendor};

pub const RISK_AREA_MAX: f32 = 40.0;
pub const SIZE_FIT_MAX: f32 = 20.0;
pub const GEO_COVERAGE_MAX: f32 = 20.0;
pub const PRICE_SCORE_MAX: f32 = 20.0;

/// Compatibility of a vendor with an organization's profile and open gaps,
/// before any priority personalization. Total over every vendor in the
/// catalog: a missing organization attribute degrades its own sub-score to
/// the neutral half-value instead of failing the pass.
pub fn score_vendor_base(vendor: &Vendor, org: &Organization, gaps: &[Gap]) -> BaseScore {
    let risk_area_coverage = risk_area_coverage(vendor, gaps);
    let size_fit = size_fit(vendor, org);
    let geo_coverage = geo_coverage(vendor, org);
    let price_score = price_score(vendor, org);

    BaseScore {
        risk_area_coverage,
        size_fit,
        geo_coverage,
        price_score,
        total_base: risk_area_coverage + size_fit + geo_coverage + price_score,
    }
}

pub fn gaps_covered(vendor: &Vendor, gaps: &[Gap]) -> usize {
    gaps.iter()
        .filter(|gap| vendor.covers_category(&gap.category))
        .count()
}

fn risk_area_coverage(vendor: &Vendor, gaps: &[Gap]) -> f32 {
    if gaps.is_empty() {
        return RISK_AREA_MAX / 2.0;
    }
    gaps_covered(vendor, gaps) as f32 / gaps.len() as f32 * RISK_AREA_MAX
}

fn size_fit(vendor: &Vendor, org: &Organization) -> f32 {
    let size = match org.size {
        Some(size) => size,
        None => return SIZE_FIT_MAX / 2.0,
    };
    if vendor.customer_segments.is_empty() {
        return SIZE_FIT_MAX / 2.0;
    }
    if vendor.customer_segments.contains(&size) {
        SIZE_FIT_MAX
    } else {
        0.0
    }
}

fn geo_coverage(vendor: &Vendor, org: &Organization) -> f32 {
    if org.jurisdictions.is_empty() {
        return GEO_COVERAGE_MAX / 2.0;
    }
    let coverage: Vec<String> = vendor
        .geographic_coverage
        .iter()
        .map(|region| normalize_tag(region))
        .collect();
    if coverage.iter().any(|region| region == "global") {
        return GEO_COVERAGE_MAX;
    }
    let covered = org
        .jurisdictions
        .iter()
        .filter(|jurisdiction| coverage.contains(&normalize_tag(jurisdiction)))
        .count();
    covered as f32 / org.jurisdictions.len() as f32 * GEO_COVERAGE_MAX
}

fn price_score(vendor: &Vendor, org: &Organization) -> f32 {
    if vendor.pricing_model == PricingModel::Custom {
        return PRICE_SCORE_MAX / 2.0;
    }
    let (budget, price) = match (org.budget, vendor.starting_price) {
        (Some(budget), Some(price)) => (budget, price),
        _ => return PRICE_SCORE_MAX / 2.0,
    };
    let ceiling = budget.ceiling();
    if price <= ceiling {
        PRICE_SCORE_MAX
    } else if price <= ceiling * 1.5 {
        PRICE_SCORE_MAX / 2.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::org::{BudgetBand, OrgSizeBand};
    use crate::types::report::{GapPriority, Severity};

    fn vendor() -> Vendor {
        serde_json::from_str(
            r#"
        {
            "id": "v1",
            "name": "ScreenCo",
            "categories": ["SANCTIONS_SCREENING", "TRANSACTION_MONITORING"],
            "customer_segments": ["small", "mid_market"],
            "geographic_coverage": ["US", "EU"],
            "pricing_model": "SUBSCRIPTION",
            "starting_price": 12000.0
        }"#,
        )
        .expect("vendor should parse")
    }

    fn org() -> Organization {
        Organization {
            name: "Acme".to_string(),
            size: Some(OrgSizeBand::Small),
            jurisdictions: vec!["US".to_string(), "EU".to_string()],
            budget: Some(BudgetBand::From10kTo50k),
            priorities: Vec::new(),
            preferred_deployment: None,
        }
    }

    fn gap(category: &str) -> Gap {
        Gap {
            category: category.to_string(),
            severity: Severity::High,
            priority: GapPriority::ShortTerm,
        }
    }

    #[test]
    fn full_fit_reaches_the_base_ceiling() {
        let base = score_vendor_base(&vendor(), &org(), &[gap("sanctions-screening")]);
        assert_eq!(base.risk_area_coverage, RISK_AREA_MAX);
        assert_eq!(base.size_fit, SIZE_FIT_MAX);
        assert_eq!(base.geo_coverage, GEO_COVERAGE_MAX);
        assert_eq!(base.price_score, PRICE_SCORE_MAX);
        assert_eq!(base.total_base, 100.0);
    }

    #[test]
    fn risk_area_coverage_is_proportional() {
        let base = score_vendor_base(
            &vendor(),
            &org(),
            &[gap("sanctions-screening"), gap("vendor-due-diligence")],
        );
        assert_eq!(base.risk_area_coverage, RISK_AREA_MAX / 2.0);
    }

    #[test]
    fn covering_another_gap_never_lowers_coverage() {
        let mut open = vec![gap("sanctions-screening")];
        let before = score_vendor_base(&vendor(), &org(), &open).risk_area_coverage;
        open.push(gap("transaction-monitoring"));
        let after = score_vendor_base(&vendor(), &org(), &open).risk_area_coverage;
        assert!(after >= before);
    }

    #[test]
    fn missing_org_attributes_degrade_to_neutral() {
        let bare = Organization {
            name: "Bare".to_string(),
            size: None,
            jurisdictions: Vec::new(),
            budget: None,
            priorities: Vec::new(),
            preferred_deployment: None,
        };
        let base = score_vendor_base(&vendor(), &bare, &[]);
        assert_eq!(base.risk_area_coverage, RISK_AREA_MAX / 2.0);
        assert_eq!(base.size_fit, SIZE_FIT_MAX / 2.0);
        assert_eq!(base.geo_coverage, GEO_COVERAGE_MAX / 2.0);
        assert_eq!(base.price_score, PRICE_SCORE_MAX / 2.0);
        assert_eq!(base.total_base, 50.0);
    }

    #[test]
    fn explicit_size_mismatch_scores_zero() {
        let mut enterprise = org();
        enterprise.size = Some(OrgSizeBand::Enterprise);
        let base = score_vendor_base(&vendor(), &enterprise, &[]);
        assert_eq!(base.size_fit, 0.0);
    }

    #[test]
    fn unspecified_segments_are_neutral_not_zero() {
        let mut open_vendor = vendor();
        open_vendor.customer_segments.clear();
        let base = score_vendor_base(&open_vendor, &org(), &[]);
        assert_eq!(base.size_fit, SIZE_FIT_MAX / 2.0);
    }

    #[test]
    fn global_coverage_satisfies_any_jurisdiction_set() {
        let mut global = vendor();
        global.geographic_coverage = vec!["GLOBAL".to_string()];
        let base = score_vendor_base(&global, &org(), &[]);
        assert_eq!(base.geo_coverage, GEO_COVERAGE_MAX);
    }

    #[test]
    fn custom_pricing_is_neutral_not_penalized() {
        let mut custom = vendor();
        custom.pricing_model = PricingModel::Custom;
        custom.starting_price = None;
        let base = score_vendor_base(&custom, &org(), &[]);
        assert_eq!(base.price_score, PRICE_SCORE_MAX / 2.0);
    }

    #[test]
    fn price_above_budget_band_degrades_then_zeroes() {
        let mut pricey = vendor();
        pricey.starting_price = Some(60_000.0);
        let base = score_vendor_base(&pricey, &org(), &[]);
        assert_eq!(base.price_score, PRICE_SCORE_MAX / 2.0);

        pricey.starting_price = Some(500_000.0);
        let base = score_vendor_base(&pricey, &org(), &[]);
        assert_eq!(base.price_score, 0.0);
    }
}
