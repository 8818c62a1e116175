pub mod base;
pub mod boost;
pub mod rank;

use crate::config::EnginePolicy;
use crate::types::matching::{RankOptions, VendorMatch};
use crate::types::org::Organization;
use crate::types::report::Gap;
use crate::types::vendor::Vendor;

/// One matching pass over an already-materialized catalog slice: base
/// compatibility, priority boost, then ranking. Pure and re-entrant;
/// callers may run independent passes concurrently.
pub fn match_vendors(
    vendors: &[Vendor],
    org: &Organization,
    gaps: &[Gap],
    policy: &EnginePolicy,
    options: &RankOptions,
) -> Vec<VendorMatch> {
    tracing::debug!(
        organization = %org.name,
        vendors = vendors.len(),
        open_gaps = gaps.len(),
        "matching vendors"
    );

    let matches = vendors
        .iter()
        .map(|vendor| {
            let base_score = base::score_vendor_base(vendor, org, gaps);
            let priority_boost = boost::score_vendor_boost(vendor, org, gaps, policy);
            rank::build_match(vendor, org, gaps, base_score, priority_boost, policy)
        })
        .collect();

    rank::rank_vendors(matches, options)
}
