pub mod aggregate;
pub mod gaps;
pub mod rule;

use crate::config::EnginePolicy;
use crate::error::Result;
use crate::types::assessment::Assessment;
use crate::types::org::Organization;
use crate::types::report::AssessmentReport;
use crate::types::template::Template;

/// Full scoring pass: interpret every answer, aggregate, derive gaps and
/// risks, and assemble the report. Pure over its inputs; fingerprint and
/// timestamp metadata are stamped by the caller that owns the I/O.
pub fn score_assessment(
    template: &Template,
    assessment: &Assessment,
    org: Option<&Organization>,
    policy: &EnginePolicy,
) -> Result<AssessmentReport> {
    tracing::debug!(
        template = %template.id,
        assessment = %assessment.id,
        answers = assessment.answers.len(),
        "scoring assessment"
    );

    let aggregation = aggregate::aggregate(template, &assessment.answers, org)?;
    let (gaps, risks) = gaps::derive_gaps_and_risks(&aggregation.category_scores, policy);

    Ok(AssessmentReport {
        template_id: template.id.clone(),
        template_fingerprint: None,
        generated_at: None,
        risk_score: aggregation.risk_score,
        foundational_coverage_percent: aggregation.foundational_coverage_percent,
        section_scores: aggregation.section_scores,
        category_scores: aggregation.category_scores,
        gaps,
        risks,
        warnings: aggregation.warnings,
    })
}
