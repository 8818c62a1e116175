use crate::types::matching::VendorMatch;
use crate::types::report::AssessmentReport;

pub fn assessment_to_markdown(report: &AssessmentReport) -> String {
    let mut output = String::new();
    output.push_str("# Assessment Report\n\n");
    output.push_str(&format!("Template: {}", report.template_id));
    if let Some(fingerprint) = &report.template_fingerprint {
        output.push_str(&format!(" ({})", &fingerprint[..12.min(fingerprint.len())]));
    }
    output.push('\n');
    output.push_str(&format!("Risk score: {}/100\n", report.risk_score));
    output.push_str(&format!(
        "Foundational coverage: {:.0}%\n\n",
        report.foundational_coverage_percent
    ));

    output.push_str("## Section Scores\n\n");
    if report.section_scores.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for section in &report.section_scores {
            match section.score {
                Some(score) => output.push_str(&format!(
                    "- {}: {:.2}/5 ({}/{} answered)\n",
                    section.name, score, section.answered, section.questions
                )),
                None => output.push_str(&format!(
                    "- {}: not scored (0/{} answered)\n",
                    section.name, section.questions
                )),
            }
        }
        output.push('\n');
    }

    output.push_str("## Gaps\n\n");
    if report.gaps.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for gap in &report.gaps {
            output.push_str(&format!(
                "- [{:?}] {}: remediation {:?}\n",
                gap.severity, gap.category, gap.priority
            ));
        }
        output.push('\n');
    }

    output.push_str("## Risks\n\n");
    if report.risks.is_empty() {
        output.push_str("- none\n");
    } else {
        for risk in &report.risks {
            output.push_str(&format!(
                "- {}: likelihood {:?}, impact {:?}\n",
                risk.category, risk.likelihood, risk.impact
            ));
        }
    }

    if !report.warnings.is_empty() {
        output.push_str("\n## Warnings\n\n");
        for warning in &report.warnings {
            output.push_str(&format!("- {warning}\n"));
        }
    }

    output
}

pub fn matches_to_markdown(matches: &[VendorMatch]) -> String {
    let mut output = String::new();
    output.push_str("# Vendor Matches\n\n");
    if matches.is_empty() {
        output.push_str("- none\n");
        return output;
    }

    for (index, row) in matches.iter().enumerate() {
        let quality = row
            .match_quality
            .map(|quality| format!(" — {}", quality.label()))
            .unwrap_or_default();
        output.push_str(&format!(
            "## {}. {} ({:.0} points{})\n\n",
            index + 1,
            row.vendor_name,
            row.total_score,
            quality
        ));
        output.push_str(&format!(
            "- base {:.0} (risk areas {:.0}, size {:.0}, geo {:.0}, price {:.0})\n",
            row.base_score.total_base,
            row.base_score.risk_area_coverage,
            row.base_score.size_fit,
            row.base_score.geo_coverage,
            row.base_score.price_score
        ));
        output.push_str(&format!(
            "- boost {:.0} (priority {:.0}, features {:.0}, deployment {:.0}, speed {:.0})\n",
            row.priority_boost.total_boost,
            row.priority_boost.top_priority_boost,
            row.priority_boost.feature_boost,
            row.priority_boost.deployment_boost,
            row.priority_boost.speed_boost
        ));
        output.push_str(&format!("- covers {} open gap(s)\n", row.gaps_covered));
        if !row.priority_boost.missing_features.is_empty() {
            output.push_str(&format!(
                "- missing features: {}\n",
                row.priority_boost.missing_features.join(", ")
            ));
        }
        for reason in &row.match_reasons {
            output.push_str(&format!("- {reason}\n"));
        }
        output.push('\n');
    }

    output
}
