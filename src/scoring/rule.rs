use crate::error::{CompassError, Result};
use crate::types::assessment::AnswerValue;
use crate::types::org::Organization;
use crate::types::template::{band_score, parse_count_bands, Question, ScoringRule, MAX_SUB_SCORE};

/// Mid-scale score returned when a contextual rule has no organization
/// context to consult.
pub const NEUTRAL_SCORE: u8 = 3;

#[derive(Debug, Clone)]
pub struct ScoredAnswer {
    pub score: u8,
    pub notes: Vec<String>,
}

/// Evaluates one answer against its question's rule. Pure: same inputs,
/// same output. An option absent from a mapping table is an
/// [`CompassError::UnmappedOption`] for the caller to surface as a template
/// data-quality issue, never a silent default.
pub fn score_answer(
    question: &Question,
    value: &AnswerValue,
    org: Option<&Organization>,
) -> Result<ScoredAnswer> {
    match &question.rule {
        ScoringRule::Mapping { scores } => {
            let key = mapping_key(question, value)?;
            match scores.get(&key) {
                Some(&score) => Ok(ScoredAnswer {
                    score,
                    notes: vec![format!("option '{key}' scored {score}")],
                }),
                None => Err(CompassError::UnmappedOption {
                    question: question.id.clone(),
                    option: key,
                }),
            }
        }
        ScoringRule::CountBased { ranges, penalties } => {
            let selected = selected_options(value);
            let mut notes = vec![format!("{} option(s) selected", selected.len())];

            let mut base = 0i64;
            let mut adjustment = 0i64;
            for option in &selected {
                match penalties.get(option.as_str()) {
                    Some(&penalty) => {
                        adjustment += i64::from(penalty);
                        notes.push(format!("penalty '{option}' applied ({penalty})"));
                    }
                    None => base += 1,
                }
            }

            let adjusted = (base + adjustment).max(0) as u32;
            notes.push(format!("adjusted count {adjusted}"));

            let bands = parse_count_bands(&question.id, ranges)?;
            Ok(ScoredAnswer {
                score: band_score(&bands, adjusted),
                notes,
            })
        }
        ScoringRule::Keyword { positive, negative } => {
            let text = match value {
                AnswerValue::Text(text) => text.clone(),
                AnswerValue::Selected(options) => options.join(" "),
                AnswerValue::Bool(flag) => flag.to_string(),
            };
            let haystack = text.to_lowercase();

            let positive_hits = keyword_hits(&haystack, positive);
            let negative_hits = keyword_hits(&haystack, negative);

            let mut notes = Vec::new();
            if !positive_hits.is_empty() {
                notes.push(format!(
                    "matched {} positive signal(s): {}",
                    positive_hits.len(),
                    positive_hits.join(", ")
                ));
            }
            if !negative_hits.is_empty() {
                notes.push(format!(
                    "matched {} negative signal(s): {}",
                    negative_hits.len(),
                    negative_hits.join(", ")
                ));
            }
            if notes.is_empty() {
                notes.push("no keyword signals matched".to_string());
            }

            let raw = i64::from(NEUTRAL_SCORE) + positive_hits.len().min(2) as i64
                - negative_hits.len().min(2) as i64;
            Ok(ScoredAnswer {
                score: raw.clamp(0, i64::from(MAX_SUB_SCORE)) as u8,
                notes,
            })
        }
        ScoringRule::Contextual { by_size } => {
            let size = org.and_then(|org| org.size);
            let table = match size {
                Some(band) => by_size.get(&band),
                None => None,
            };
            match table {
                Some(scores) => {
                    let key = mapping_key(question, value)?;
                    match scores.get(&key) {
                        Some(&score) => Ok(ScoredAnswer {
                            score,
                            notes: vec![format!(
                                "option '{}' scored {} for {} organizations",
                                key,
                                score,
                                size.map(|band| band.label()).unwrap_or("unknown")
                            )],
                        }),
                        None => Err(CompassError::UnmappedOption {
                            question: question.id.clone(),
                            option: key,
                        }),
                    }
                }
                None => Ok(ScoredAnswer {
                    score: NEUTRAL_SCORE,
                    notes: vec!["no organization size on file; neutral score applied".to_string()],
                }),
            }
        }
    }
}

fn mapping_key(question: &Question, value: &AnswerValue) -> Result<String> {
    value
        .mapping_key()
        .ok_or_else(|| CompassError::UnmappedOption {
            question: question.id.clone(),
            option: value.display(),
        })
}

fn selected_options(value: &AnswerValue) -> Vec<String> {
    match value {
        AnswerValue::Selected(options) => options.clone(),
        AnswerValue::Text(text) if text.is_empty() => Vec::new(),
        AnswerValue::Text(text) => vec![text.clone()],
        AnswerValue::Bool(_) => Vec::new(),
    }
}

fn keyword_hits(haystack: &str, keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .filter(|keyword| !keyword.is_empty() && haystack.contains(&keyword.to_lowercase()))
        .cloned()
        .collect()
}
