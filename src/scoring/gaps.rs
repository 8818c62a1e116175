use crate::config::EnginePolicy;
use crate::types::report::{CategoryScore, Gap, GapPriority, Likelihood, Risk, RiskImpact, Severity};

/// Derives Gap and Risk records from category scores. One derivation pass,
/// two output projections sharing the severity banding: a category under
/// the critical threshold is CRITICAL, under high is HIGH, under medium is
/// MEDIUM, and at or above medium is considered adequate. Deterministic and
/// idempotent: identical category scores always yield the identical sets,
/// ordered by severity (worst first) then category.
pub fn derive_gaps_and_risks(
    category_scores: &[CategoryScore],
    policy: &EnginePolicy,
) -> (Vec<Gap>, Vec<Risk>) {
    let mut gaps = Vec::new();
    let mut risks = Vec::new();

    for entry in category_scores {
        let severity = match classify(entry.score, policy) {
            Some(severity) => severity,
            None => continue,
        };
        gaps.push(Gap {
            category: entry.category.clone(),
            severity,
            priority: priority_for(severity),
        });
        let (likelihood, impact) = risk_profile_for(severity);
        risks.push(Risk {
            category: entry.category.clone(),
            likelihood,
            impact,
        });
    }

    gaps.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.category.cmp(&b.category))
    });
    risks.sort_by(|a, b| {
        let rank = |risk: &Risk| match risk.impact {
            RiskImpact::Severe => 2,
            RiskImpact::Major => 1,
            RiskImpact::Moderate => 0,
        };
        rank(b)
            .cmp(&rank(a))
            .then_with(|| a.category.cmp(&b.category))
    });

    (gaps, risks)
}

fn classify(score: f32, policy: &EnginePolicy) -> Option<Severity> {
    if score < policy.gap_critical_below {
        Some(Severity::Critical)
    } else if score < policy.gap_high_below {
        Some(Severity::High)
    } else if score < policy.gap_medium_below {
        Some(Severity::Medium)
    } else {
        None
    }
}

fn priority_for(severity: Severity) -> GapPriority {
    match severity {
        Severity::Critical => GapPriority::Immediate,
        Severity::High => GapPriority::ShortTerm,
        Severity::Medium | Severity::Low => GapPriority::LongTerm,
    }
}

fn risk_profile_for(severity: Severity) -> (Likelihood, RiskImpact) {
    match severity {
        Severity::Critical => (Likelihood::Likely, RiskImpact::Severe),
        Severity::High => (Likelihood::Likely, RiskImpact::Major),
        Severity::Medium | Severity::Low => (Likelihood::Possible, RiskImpact::Moderate),
    }
}
