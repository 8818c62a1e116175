use crate::config::EnginePolicy;
use crate::types::matching::PriorityBoost;
use crate::types::normalize_tag;
use crate::types::org::Organization;
use crate::types::report::Gap;
use crate::types::vendor::{ImplementationSpeed, Vendor};
use std::collections::BTreeSet;

pub const FEATURE_POINTS: f32 = 4.0;
pub const FEATURE_BOOST_MAX: f32 = 12.0;
pub const DEPLOYMENT_MATCH: f32 = 4.0;
pub const DEPLOYMENT_NEUTRAL: f32 = 2.0;
pub const SPEED_FAST: f32 = 4.0;
pub const SPEED_MODERATE: f32 = 2.0;

/// Personalized boost on top of the base score, driven by the
/// organization's ranked priorities and the vendor's declared features,
/// deployment options, and implementation speed. The sum is capped at the
/// policy's boost ceiling so the total match score has a bounded maximum
/// independent of catalog size.
pub fn score_vendor_boost(
    vendor: &Vendor,
    org: &Organization,
    gaps: &[Gap],
    policy: &EnginePolicy,
) -> PriorityBoost {
    let (top_priority_boost, matched_priority) = priority_match(vendor, org, policy);

    // Capability tags the organization needs, derived from its open gaps.
    let needed: BTreeSet<String> = gaps
        .iter()
        .map(|gap| normalize_tag(&gap.category))
        .collect();
    let covered = needed
        .iter()
        .filter(|tag| vendor.declares_feature(tag))
        .count();
    let feature_boost = (covered as f32 * FEATURE_POINTS).min(FEATURE_BOOST_MAX);
    let missing_features: Vec<String> = needed
        .iter()
        .filter(|tag| !vendor.declares_feature(tag))
        .cloned()
        .collect();

    let deployment_boost = match org.preferred_deployment {
        None => DEPLOYMENT_NEUTRAL,
        Some(preferred) if vendor.deployment_options.contains(&preferred) => DEPLOYMENT_MATCH,
        Some(_) => 0.0,
    };

    let speed_boost = match vendor.implementation_speed {
        Some(ImplementationSpeed::Fast) => SPEED_FAST,
        Some(ImplementationSpeed::Moderate) => SPEED_MODERATE,
        Some(ImplementationSpeed::Slow) | None => 0.0,
    };

    let total_boost = (top_priority_boost + feature_boost + deployment_boost + speed_boost)
        .min(policy.boost_ceiling);

    PriorityBoost {
        top_priority_boost,
        matched_priority,
        feature_boost,
        missing_features,
        deployment_boost,
        speed_boost,
        total_boost,
    }
}

/// Finds the highest-ranked declared priority this vendor covers, via its
/// categories or features. Ranks beyond the policy's point table still
/// match (so the reason line can name them) but add no points.
fn priority_match(
    vendor: &Vendor,
    org: &Organization,
    policy: &EnginePolicy,
) -> (f32, Option<String>) {
    for (rank, priority) in org.priorities.iter().enumerate() {
        if vendor.covers_category(priority) || vendor.declares_feature(priority) {
            let points = policy.rank_points.get(rank).copied().unwrap_or(0.0);
            return (points, Some(priority.clone()));
        }
    }
    (0.0, None)
}
