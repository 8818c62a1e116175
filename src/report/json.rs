use crate::types::matching::VendorMatch;
use crate::types::report::AssessmentReport;

pub fn assessment_to_json(report: &AssessmentReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

pub fn matches_to_json(matches: &[VendorMatch]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(matches)
}
