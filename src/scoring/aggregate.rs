use crate::error::{CompassError, Result};
use crate::types::assessment::{Answer, AnswerValue};
use crate::types::normalize_tag;
use crate::types::org::Organization;
use crate::types::report::{CategoryScore, Score, SectionScore};
use crate::types::template::{Template, MAX_SUB_SCORE};
use std::collections::BTreeMap;

use super::rule::{score_answer, NEUTRAL_SCORE};

/// How far the declared section-weight sum may drift from 1.0 before the
/// template-authoring lint fires. Aggregation normalizes by the actual sum
/// either way.
const WEIGHT_SUM_TOLERANCE: f32 = 0.01;

#[derive(Debug, Clone)]
pub struct Aggregation {
    pub section_scores: Vec<SectionScore>,
    pub category_scores: Vec<CategoryScore>,
    /// Overall posture, 0-100; higher means stronger controls.
    pub risk_score: u8,
    pub foundational_coverage_percent: Score,
    pub warnings: Vec<String>,
}

#[derive(Default)]
struct WeightedSum {
    numerator: f32,
    denominator: f32,
}

impl WeightedSum {
    fn add(&mut self, score: f32, weight: f32) {
        self.numerator += score * weight;
        self.denominator += weight;
    }

    fn mean(&self) -> Option<f32> {
        (self.denominator > 0.0).then(|| self.numerator / self.denominator)
    }
}

/// Combines per-question sub-scores into section, category, and overall
/// scores. Answer order is irrelevant: answers key by question id, and a
/// later entry for the same question wins. Unanswered required questions
/// count as zero; unanswered optional questions are excluded entirely. A
/// question whose answer hits an unmapped option is excluded with a warning
/// rather than skewing the aggregate.
pub fn aggregate(
    template: &Template,
    answers: &[Answer],
    org: Option<&Organization>,
) -> Result<Aggregation> {
    let mut by_question: BTreeMap<&str, &AnswerValue> = BTreeMap::new();
    for answer in answers {
        by_question.insert(answer.question_id.as_str(), &answer.value);
    }

    let mut warnings = Vec::new();
    let mut section_scores = Vec::with_capacity(template.sections.len());
    let mut categories: BTreeMap<String, WeightedSum> = BTreeMap::new();
    let mut overall = WeightedSum::default();
    let mut foundational_total = 0usize;
    let mut foundational_covered = 0usize;

    let declared_weight_sum: f32 = template.sections.iter().map(|section| section.weight).sum();
    if (declared_weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        tracing::warn!(
            template = %template.id,
            declared_sum = declared_weight_sum,
            "section weights do not sum to 1.0; normalizing by the actual sum"
        );
    }

    for section in &template.sections {
        let mut section_sum = WeightedSum::default();
        let mut answered = 0usize;

        for question in &section.questions {
            if question.is_foundational {
                foundational_total += 1;
            }

            let score = match by_question.get(question.id.as_str()) {
                Some(value) => match score_answer(question, value, org) {
                    Ok(scored) => {
                        answered += 1;
                        scored.score
                    }
                    Err(CompassError::UnmappedOption { question, option }) => {
                        warnings.push(format!(
                            "question {question}: answer option '{option}' has no mapping entry; \
                             question excluded from aggregation"
                        ));
                        continue;
                    }
                    Err(other) => return Err(other),
                },
                None if question.required => 0,
                None => continue,
            };

            section_sum.add(f32::from(score), question.weight);
            if let Some(category) = &question.category {
                categories
                    .entry(normalize_tag(category))
                    .or_default()
                    .add(f32::from(score), question.weight);
            }
            if question.is_foundational && score >= NEUTRAL_SCORE {
                foundational_covered += 1;
            }
        }

        let score = section_sum.mean();
        if let Some(section_score) = score {
            overall.add(section_score, section.weight);
        }
        section_scores.push(SectionScore {
            section_id: section.id.clone(),
            name: section.name.clone(),
            score,
            answered,
            questions: section.questions.len(),
        });
    }

    let risk_score = overall
        .mean()
        .map(|mean| (mean / f32::from(MAX_SUB_SCORE) * 100.0).round() as u8)
        .unwrap_or(0);

    let foundational_coverage_percent = if foundational_total == 0 {
        100.0
    } else {
        foundational_covered as f32 / foundational_total as f32 * 100.0
    };

    let category_scores = categories
        .into_iter()
        .filter_map(|(category, sum)| {
            sum.mean().map(|score| CategoryScore { category, score })
        })
        .collect();

    Ok(Aggregation {
        section_scores,
        category_scores,
        risk_score,
        foundational_coverage_percent,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::template::{Question, QuestionType, ScoringRule, Section};
    use std::collections::BTreeMap as Map;

    fn mapping_question(id: &str, weight: f32) -> Question {
        let scores: Map<String, u8> = [
            ("strong".to_string(), 4u8),
            ("weak".to_string(), 2),
            ("none".to_string(), 0),
        ]
        .into_iter()
        .collect();
        Question {
            id: id.to_string(),
            text: "?".to_string(),
            question_type: QuestionType::SingleSelect,
            weight,
            required: true,
            is_foundational: false,
            category: None,
            options: vec!["strong".to_string(), "weak".to_string(), "none".to_string()],
            rule: ScoringRule::Mapping { scores },
        }
    }

    fn template(sections: Vec<Section>) -> Template {
        Template {
            id: "t1".to_string(),
            name: "T".to_string(),
            version: "1".to_string(),
            sections,
        }
    }

    fn answer(question_id: &str, option: &str) -> Answer {
        Answer {
            question_id: question_id.to_string(),
            value: AnswerValue::Text(option.to_string()),
            answered_at: None,
        }
    }

    #[test]
    fn section_score_is_weight_normalized() {
        // Weights 2.0 and 1.0 scoring 4 and 2: (4*2 + 2*1) / 3 = 3.33.
        let mut q1 = mapping_question("q1", 2.0);
        q1.rule = ScoringRule::Mapping {
            scores: [("strong".to_string(), 4u8)].into_iter().collect(),
        };
        let mut q2 = mapping_question("q2", 1.0);
        q2.rule = ScoringRule::Mapping {
            scores: [("weak".to_string(), 2u8)].into_iter().collect(),
        };
        let t = template(vec![Section {
            id: "s1".to_string(),
            name: "S".to_string(),
            weight: 1.0,
            questions: vec![q1, q2],
        }]);

        let result = aggregate(&t, &[answer("q1", "strong"), answer("q2", "weak")], None)
            .expect("aggregation should succeed");
        let section = result.section_scores[0]
            .score
            .expect("section should be scored");
        assert!((section - 10.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn aggregate_is_invariant_to_answer_order() {
        let t = template(vec![Section {
            id: "s1".to_string(),
            name: "S".to_string(),
            weight: 1.0,
            questions: vec![mapping_question("q1", 1.0), mapping_question("q2", 2.0)],
        }]);
        let forward = [answer("q1", "strong"), answer("q2", "weak")];
        let backward = [answer("q2", "weak"), answer("q1", "strong")];

        let a = aggregate(&t, &forward, None).expect("aggregation should succeed");
        let b = aggregate(&t, &backward, None).expect("aggregation should succeed");
        assert_eq!(a.risk_score, b.risk_score);
        assert_eq!(
            a.section_scores[0].score.expect("scored"),
            b.section_scores[0].score.expect("scored")
        );
    }

    #[test]
    fn unanswered_required_question_counts_as_zero() {
        let t = template(vec![Section {
            id: "s1".to_string(),
            name: "S".to_string(),
            weight: 1.0,
            questions: vec![mapping_question("q1", 1.0), mapping_question("q2", 1.0)],
        }]);

        let result =
            aggregate(&t, &[answer("q1", "strong")], None).expect("aggregation should succeed");
        // (4 + 0) / 2 = 2.0
        let section = result.section_scores[0]
            .score
            .expect("section should be scored");
        assert!((section - 2.0).abs() < 1e-6);
    }

    #[test]
    fn unanswered_optional_question_is_excluded() {
        let mut optional = mapping_question("q2", 1.0);
        optional.required = false;
        let t = template(vec![Section {
            id: "s1".to_string(),
            name: "S".to_string(),
            weight: 1.0,
            questions: vec![mapping_question("q1", 1.0), optional],
        }]);

        let result =
            aggregate(&t, &[answer("q1", "strong")], None).expect("aggregation should succeed");
        let section = result.section_scores[0]
            .score
            .expect("section should be scored");
        assert!((section - 4.0).abs() < 1e-6);
    }

    #[test]
    fn unmapped_option_excludes_question_with_warning() {
        let t = template(vec![Section {
            id: "s1".to_string(),
            name: "S".to_string(),
            weight: 1.0,
            questions: vec![mapping_question("q1", 1.0), mapping_question("q2", 1.0)],
        }]);

        let result = aggregate(
            &t,
            &[answer("q1", "strong"), answer("q2", "not-an-option")],
            None,
        )
        .expect("aggregation should succeed");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("not-an-option"));
        // q2 excluded from numerator and denominator: only q1 remains.
        let section = result.section_scores[0]
            .score
            .expect("section should be scored");
        assert!((section - 4.0).abs() < 1e-6);
    }

    #[test]
    fn risk_score_scales_to_hundred() {
        let t = template(vec![Section {
            id: "s1".to_string(),
            name: "S".to_string(),
            weight: 0.7,
            questions: vec![mapping_question("q1", 1.0)],
        }]);

        let result =
            aggregate(&t, &[answer("q1", "strong")], None).expect("aggregation should succeed");
        // 4 / 5 = 80, regardless of the 0.7 declared weight.
        assert_eq!(result.risk_score, 80);
    }

    #[test]
    fn category_scores_group_across_sections_by_normalized_tag() {
        let mut q1 = mapping_question("q1", 1.0);
        q1.category = Some("Sanctions Screening".to_string());
        let mut q2 = mapping_question("q2", 1.0);
        q2.category = Some("SANCTIONS_SCREENING".to_string());
        let t = template(vec![
            Section {
                id: "s1".to_string(),
                name: "S1".to_string(),
                weight: 0.5,
                questions: vec![q1],
            },
            Section {
                id: "s2".to_string(),
                name: "S2".to_string(),
                weight: 0.5,
                questions: vec![q2],
            },
        ]);

        let result = aggregate(&t, &[answer("q1", "strong"), answer("q2", "none")], None)
            .expect("aggregation should succeed");
        assert_eq!(result.category_scores.len(), 1);
        assert_eq!(result.category_scores[0].category, "sanctions-screening");
        assert!((result.category_scores[0].score - 2.0).abs() < 1e-6);
    }

    #[test]
    fn foundational_coverage_counts_adequate_scores_only() {
        let mut covered = mapping_question("q1", 1.0);
        covered.is_foundational = true;
        let mut failed = mapping_question("q2", 1.0);
        failed.is_foundational = true;
        let mut unanswered = mapping_question("q3", 1.0);
        unanswered.is_foundational = true;
        let t = template(vec![Section {
            id: "s1".to_string(),
            name: "S".to_string(),
            weight: 1.0,
            questions: vec![covered, failed, unanswered],
        }]);

        let result = aggregate(&t, &[answer("q1", "strong"), answer("q2", "none")], None)
            .expect("aggregation should succeed");
        assert!((result.foundational_coverage_percent - 100.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn foundational_coverage_is_full_without_foundational_questions() {
        let t = template(vec![Section {
            id: "s1".to_string(),
            name: "S".to_string(),
            weight: 1.0,
            questions: vec![mapping_question("q1", 1.0)],
        }]);
        let result =
            aggregate(&t, &[answer("q1", "weak")], None).expect("aggregation should succeed");
        assert_eq!(result.foundational_coverage_percent, 100.0);
    }
}
