use crate::config::EnginePolicy;
use crate::types::matching::{
    BaseScore, MatchQuality, PriorityBoost, RankOptions, VendorMatch,
};
use crate::types::normalize_tag;
use crate::types::org::Organization;
use crate::types::report::Gap;
use crate::types::vendor::Vendor;

use super::base::{gaps_covered, GEO_COVERAGE_MAX, PRICE_SCORE_MAX, SIZE_FIT_MAX};
use super::boost::{DEPLOYMENT_MATCH, SPEED_FAST};

/// Assembles one ranked row from the score breakdown: merged total,
/// gaps-covered count, quality label, and the reason list. Reasons come
/// from a fixed, ordered set of templated sentences, each gated on the
/// breakdown, so identical inputs always produce identical reasons in
/// identical order.
pub fn build_match(
    vendor: &Vendor,
    org: &Organization,
    gaps: &[Gap],
    base: BaseScore,
    boost: PriorityBoost,
    policy: &EnginePolicy,
) -> VendorMatch {
    let total_score = base.total_base + boost.total_boost;
    let covered = gaps_covered(vendor, gaps);
    let match_reasons = build_reasons(vendor, org, gaps, &base, &boost, covered);

    VendorMatch {
        vendor_id: vendor.id.clone(),
        vendor_name: vendor.name.clone(),
        featured: vendor.featured,
        rating: vendor.rating,
        base_score: base,
        priority_boost: boost,
        total_score,
        gaps_covered: covered,
        match_quality: quality_for(total_score, policy),
        match_reasons,
    }
}

fn build_reasons(
    vendor: &Vendor,
    org: &Organization,
    gaps: &[Gap],
    base: &BaseScore,
    boost: &PriorityBoost,
    covered: usize,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if let Some(priority) = &boost.matched_priority {
        let rank = org
            .priorities
            .iter()
            .position(|declared| normalize_tag(declared) == normalize_tag(priority))
            .map(|index| index + 1)
            .unwrap_or(1);
        reasons.push(format!("Covers your #{rank} priority: {priority}"));
    }

    if covered > 0 {
        let categories: Vec<String> = gaps
            .iter()
            .filter(|gap| vendor.covers_category(&gap.category))
            .map(|gap| gap.category.clone())
            .collect();
        reasons.push(format!(
            "Addresses {} of your {} open compliance gaps ({})",
            covered,
            gaps.len(),
            categories.join(", ")
        ));
    }

    if base.size_fit == SIZE_FIT_MAX {
        if let Some(size) = org.size {
            reasons.push(format!("Serves {} organizations like yours", size.label()));
        }
    }

    if base.geo_coverage == GEO_COVERAGE_MAX && !org.jurisdictions.is_empty() {
        reasons.push(format!(
            "Covers all {} of your jurisdictions",
            org.jurisdictions.len()
        ));
    }

    if base.price_score == PRICE_SCORE_MAX {
        if let Some(budget) = org.budget {
            reasons.push(format!("Starting price fits your {} budget", budget.label()));
        }
    }

    if boost.deployment_boost == DEPLOYMENT_MATCH {
        if let Some(preferred) = org.preferred_deployment {
            reasons.push(format!(
                "Supports your preferred {} deployment",
                preferred.label()
            ));
        }
    }

    if boost.speed_boost == SPEED_FAST {
        reasons.push("Known for fast implementations".to_string());
    }

    reasons
}

fn quality_for(total_score: f32, policy: &EnginePolicy) -> Option<MatchQuality> {
    if total_score >= policy.highly_relevant_at {
        Some(MatchQuality::HighlyRelevant)
    } else if total_score >= policy.good_match_at {
        Some(MatchQuality::GoodMatch)
    } else if total_score >= policy.fair_match_at {
        Some(MatchQuality::FairMatch)
    } else {
        None
    }
}

/// Sorts descending by total score, breaking ties by the featured flag and
/// then rating; the underlying sort is stable, so equal rows keep catalog
/// order. Applies the caller's minimum-score filter and top-N truncation.
pub fn rank_vendors(mut matches: Vec<VendorMatch>, options: &RankOptions) -> Vec<VendorMatch> {
    matches.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.featured.cmp(&a.featured))
            .then_with(|| {
                b.rating
                    .unwrap_or(0.0)
                    .partial_cmp(&a.rating.unwrap_or(0.0))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    if let Some(min_score) = options.min_score {
        matches.retain(|row| row.total_score >= min_score);
    }
    if let Some(top_n) = options.top_n {
        matches.truncate(top_n);
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, total: f32, featured: bool, rating: Option<f32>) -> VendorMatch {
        VendorMatch {
            vendor_id: id.to_string(),
            vendor_name: id.to_string(),
            featured,
            rating,
            base_score: BaseScore {
                risk_area_coverage: 0.0,
                size_fit: 0.0,
                geo_coverage: 0.0,
                price_score: 0.0,
                total_base: total,
            },
            priority_boost: PriorityBoost {
                top_priority_boost: 0.0,
                matched_priority: None,
                feature_boost: 0.0,
                missing_features: Vec::new(),
                deployment_boost: 0.0,
                speed_boost: 0.0,
                total_boost: 0.0,
            },
            total_score: total,
            gaps_covered: 0,
            match_quality: None,
            match_reasons: Vec::new(),
        }
    }

    #[test]
    fn ranking_sorts_descending_by_total_score() {
        let ranked = rank_vendors(
            vec![row("low", 60.0, false, None), row("high", 110.0, false, None)],
            &RankOptions::default(),
        );
        assert_eq!(ranked[0].vendor_id, "high");
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].total_score >= pair[1].total_score));
    }

    #[test]
    fn featured_vendor_wins_score_ties() {
        let ranked = rank_vendors(
            vec![
                row("plain", 90.0, false, Some(4.9)),
                row("featured", 90.0, true, Some(3.0)),
            ],
            &RankOptions::default(),
        );
        assert_eq!(ranked[0].vendor_id, "featured");
    }

    #[test]
    fn rating_breaks_ties_among_unfeatured() {
        let ranked = rank_vendors(
            vec![
                row("lower", 90.0, false, Some(3.5)),
                row("higher", 90.0, false, Some(4.5)),
            ],
            &RankOptions::default(),
        );
        assert_eq!(ranked[0].vendor_id, "higher");
    }

    #[test]
    fn min_score_filters_and_top_n_truncates() {
        let ranked = rank_vendors(
            vec![
                row("a", 95.0, false, None),
                row("b", 40.0, false, None),
                row("c", 80.0, false, None),
                row("d", 75.0, false, None),
            ],
            &RankOptions {
                min_score: Some(70.0),
                top_n: Some(2),
            },
        );
        let ids: Vec<&str> = ranked.iter().map(|row| row.vendor_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn quality_label_is_a_step_function_of_total() {
        let policy = EnginePolicy::default();
        assert_eq!(
            quality_for(112.0, &policy),
            Some(MatchQuality::HighlyRelevant)
        );
        assert_eq!(quality_for(100.0, &policy), Some(MatchQuality::HighlyRelevant));
        assert_eq!(quality_for(92.0, &policy), Some(MatchQuality::GoodMatch));
        assert_eq!(quality_for(71.0, &policy), Some(MatchQuality::FairMatch));
        assert_eq!(quality_for(42.0, &policy), None);
    }
}
