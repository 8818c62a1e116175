use crate::error::{CompassError, Result};
use crate::types::org::OrgSizeBand;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper end of the per-answer score codomain.
pub const MAX_SUB_SCORE: u8 = 5;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    pub sections: Vec<Section>,
}

fn default_version() -> String {
    "1".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(default = "default_weight")]
    pub weight: f32,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleSelect,
    MultiSelect,
    FreeText,
    Boolean,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub question_type: QuestionType,
    #[serde(default = "default_weight")]
    pub weight: f32,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub is_foundational: bool,
    /// Tag that groups this question's score into a compliance category for
    /// gap derivation. Untagged questions contribute to section and overall
    /// scores only.
    #[serde(default)]
    pub category: Option<String>,
    /// Declared answer options for select questions; consumed by lint to
    /// catch options a mapping rule would reject at runtime.
    #[serde(default)]
    pub options: Vec<String>,
    pub rule: ScoringRule,
}

fn default_weight() -> f32 {
    1.0
}

/// Closed set of rule variants. Template JSON carries a `kind` tag, so the
/// interpreter switches exhaustively instead of probing optional fields.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringRule {
    /// Exact option (or boolean) lookup to a 0-5 score.
    Mapping { scores: BTreeMap<String, u8> },
    /// Count selected options, apply per-option penalties, then map the
    /// adjusted count through ascending bands such as `"1-2"`, `"3-4"`, `"7+"`.
    CountBased {
        ranges: BTreeMap<String, u8>,
        #[serde(default)]
        penalties: BTreeMap<String, i32>,
    },
    /// Case-insensitive substring scan of free text against keyword lists.
    Keyword {
        #[serde(default)]
        positive: Vec<String>,
        #[serde(default)]
        negative: Vec<String>,
    },
    /// Per-size-band option lookup; neutral without organization context.
    Contextual {
        by_size: BTreeMap<OrgSizeBand, BTreeMap<String, u8>>,
    },
}

/// One parsed count band. `upper` is `None` for the trailing open-ended
/// `"N+"` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountBand {
    pub lower: u32,
    pub upper: Option<u32>,
    pub score: u8,
}

fn malformed(question: &str, reason: impl Into<String>) -> CompassError {
    CompassError::MalformedScoringRule {
        question: question.to_string(),
        reason: reason.into(),
    }
}

/// Parses and checks a count rule's range table: keys must be `"N-M"`,
/// `"N"`, or a single trailing `"N+"`; bands must be contiguous, ascending,
/// and carry non-decreasing scores within 0-5.
pub fn parse_count_bands(question: &str, ranges: &BTreeMap<String, u8>) -> Result<Vec<CountBand>> {
    if ranges.is_empty() {
        return Err(malformed(question, "count rule has an empty range table"));
    }

    let mut bands = Vec::with_capacity(ranges.len());
    for (key, &score) in ranges {
        if score > MAX_SUB_SCORE {
            return Err(malformed(
                question,
                format!("range '{key}' maps to {score}, outside 0-{MAX_SUB_SCORE}"),
            ));
        }
        let band = if let Some(prefix) = key.strip_suffix('+') {
            let lower = parse_bound(question, key, prefix)?;
            CountBand {
                lower,
                upper: None,
                score,
            }
        } else if let Some((lo, hi)) = key.split_once('-') {
            let lower = parse_bound(question, key, lo)?;
            let upper = parse_bound(question, key, hi)?;
            if upper < lower {
                return Err(malformed(question, format!("range '{key}' is inverted")));
            }
            CountBand {
                lower,
                upper: Some(upper),
                score,
            }
        } else {
            let exact = parse_bound(question, key, key)?;
            CountBand {
                lower: exact,
                upper: Some(exact),
                score,
            }
        };
        bands.push(band);
    }

    bands.sort_by_key(|band| band.lower);

    for window in bands.windows(2) {
        match window[0].upper {
            None => {
                return Err(malformed(
                    question,
                    "open-ended range must be the last band",
                ));
            }
            Some(upper) => {
                if window[1].lower != upper + 1 {
                    return Err(malformed(
                        question,
                        format!(
                            "ranges must be contiguous: gap or overlap between bound {} and {}",
                            upper, window[1].lower
                        ),
                    ));
                }
            }
        }
        if window[1].score < window[0].score {
            return Err(malformed(
                question,
                "range scores must not decrease as the count grows",
            ));
        }
    }

    Ok(bands)
}

fn parse_bound(question: &str, key: &str, raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| malformed(question, format!("invalid range key '{key}'")))
}

/// Maps an adjusted count to its band score. Counts below the first band
/// take the lowest band's score; counts past a closed tail take the last.
pub fn band_score(bands: &[CountBand], count: u32) -> u8 {
    debug_assert!(!bands.is_empty());
    for band in bands {
        let above_lower = count >= band.lower;
        match band.upper {
            None => {
                if above_lower {
                    return band.score;
                }
            }
            Some(upper) => {
                if above_lower && count <= upper {
                    return band.score;
                }
            }
        }
    }
    if count < bands[0].lower {
        bands[0].score
    } else {
        bands[bands.len() - 1].score
    }
}

impl Template {
    /// Fail-fast structural validation, run at load time so malformed rules
    /// never surface as per-answer surprises.
    pub fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            return Err(CompassError::TemplateInvalid(format!(
                "template {} has no sections",
                self.id
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for section in &self.sections {
            if section.weight < 0.0 {
                return Err(CompassError::TemplateInvalid(format!(
                    "section {} has a negative weight",
                    section.id
                )));
            }
            for question in &section.questions {
                if !seen.insert(question.id.clone()) {
                    return Err(CompassError::TemplateInvalid(format!(
                        "duplicate question id {}",
                        question.id
                    )));
                }
                if question.weight < 0.0 {
                    return Err(CompassError::TemplateInvalid(format!(
                        "question {} has a negative weight",
                        question.id
                    )));
                }
                validate_rule(question)?;
            }
        }
        Ok(())
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections
            .iter()
            .flat_map(|section| section.questions.iter())
    }
}

fn validate_rule(question: &Question) -> Result<()> {
    match &question.rule {
        ScoringRule::Mapping { scores } => {
            if scores.is_empty() {
                return Err(malformed(&question.id, "mapping table is empty"));
            }
            for (option, &score) in scores {
                if score > MAX_SUB_SCORE {
                    return Err(malformed(
                        &question.id,
                        format!("option '{option}' maps to {score}, outside 0-{MAX_SUB_SCORE}"),
                    ));
                }
            }
        }
        ScoringRule::CountBased { ranges, .. } => {
            parse_count_bands(&question.id, ranges)?;
        }
        ScoringRule::Keyword { positive, negative } => {
            if positive.is_empty() && negative.is_empty() {
                return Err(malformed(&question.id, "keyword rule has no keywords"));
            }
        }
        ScoringRule::Contextual { by_size } => {
            if by_size.is_empty() {
                return Err(malformed(&question.id, "contextual rule has no size bands"));
            }
            for (band, scores) in by_size {
                if scores.is_empty() {
                    return Err(malformed(
                        &question.id,
                        format!("contextual table for {} is empty", band.label()),
                    ));
                }
                for (option, &score) in scores {
                    if score > MAX_SUB_SCORE {
                        return Err(malformed(
                            &question.id,
                            format!("option '{option}' maps to {score}, outside 0-{MAX_SUB_SCORE}"),
                        ));
                    }
                }
            }
        }
    }
    Ok(())
}
