pub mod json;
pub mod md;

use crate::error::CompassError;
use crate::types::matching::VendorMatch;
use crate::types::report::AssessmentReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render_assessment(
    report: &AssessmentReport,
    format: OutputFormat,
) -> Result<String, CompassError> {
    match format {
        OutputFormat::Json => json::assessment_to_json(report).map_err(CompassError::Json),
        OutputFormat::Md => Ok(md::assessment_to_markdown(report)),
    }
}

pub fn render_matches(
    matches: &[VendorMatch],
    format: OutputFormat,
) -> Result<String, CompassError> {
    match format {
        OutputFormat::Json => json::matches_to_json(matches).map_err(CompassError::Json),
        OutputFormat::Md => Ok(md::matches_to_markdown(matches)),
    }
}
