use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Score = f32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GapPriority {
    Immediate,
    ShortTerm,
    LongTerm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Likelihood {
    Unlikely,
    Possible,
    Likely,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskImpact {
    Moderate,
    Major,
    Severe,
}

/// A category whose aggregated score fell below an adequacy threshold.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Gap {
    pub category: String,
    pub severity: Severity,
    pub priority: GapPriority,
}

/// The same finding as a [`Gap`], in likelihood/impact vocabulary for
/// reporting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Risk {
    pub category: String,
    pub likelihood: Likelihood,
    pub impact: RiskImpact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionScore {
    pub section_id: String,
    pub name: String,
    /// Weighted average over scorable questions, 0-5. `None` when nothing
    /// in the section was scorable.
    pub score: Option<Score>,
    pub answered: usize,
    pub questions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Normalized category tag.
    pub category: String,
    pub score: Score,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub template_id: String,
    #[serde(default)]
    pub template_fingerprint: Option<String>,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
    /// Overall posture, 0-100; higher means stronger controls.
    pub risk_score: u8,
    pub foundational_coverage_percent: Score,
    pub section_scores: Vec<SectionScore>,
    pub category_scores: Vec<CategoryScore>,
    pub gaps: Vec<Gap>,
    pub risks: Vec<Risk>,
    /// Data-quality issues (unmapped options) that excluded questions from
    /// aggregation; surfaced to template authors.
    pub warnings: Vec<String>,
}
