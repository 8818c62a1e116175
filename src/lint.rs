use crate::types::template::{Question, QuestionType, ScoringRule, Template};

/// One template-authoring finding. Blocking findings would break scoring at
/// runtime; warnings flag data-quality drift the aggregator tolerates.
#[derive(Debug, Clone)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub body: String,
    pub blocking: bool,
    pub question: Option<String>,
}

const WEIGHT_SUM_TOLERANCE: f32 = 0.01;

/// Authoring lint for a template that already passed structural
/// validation. Catches the template-data defects the scorer would
/// otherwise surface mid-assessment, most importantly options that a
/// mapping rule would reject as unmapped.
pub fn lint_template(template: &Template) -> Vec<Finding> {
    let mut findings = Vec::new();

    let weight_sum: f32 = template.sections.iter().map(|section| section.weight).sum();
    if (weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        findings.push(Finding {
            id: "template.weight_sum".to_string(),
            title: "Section weights do not sum to 1.0".to_string(),
            body: format!(
                "Declared section weights sum to {weight_sum:.3}; scoring normalizes by the \
                 actual sum, but the drift usually signals an authoring mistake."
            ),
            blocking: false,
            question: None,
        });
    }

    for question in template.questions() {
        lint_question(question, &mut findings);
    }

    findings
}

fn lint_question(question: &Question, findings: &mut Vec<Finding>) {
    let is_select = matches!(
        question.question_type,
        QuestionType::SingleSelect | QuestionType::MultiSelect | QuestionType::Boolean
    );

    if is_select && question.options.is_empty() {
        findings.push(Finding {
            id: "question.missing_options".to_string(),
            title: "Select question declares no options".to_string(),
            body: format!(
                "Question {} is a select question without a declared option list; \
                 answer coverage cannot be checked.",
                question.id
            ),
            blocking: false,
            question: Some(question.id.clone()),
        });
        return;
    }

    if let ScoringRule::Mapping { scores } = &question.rule {
        let unmapped: Vec<&str> = question
            .options
            .iter()
            .filter(|option| !scores.contains_key(*option))
            .map(String::as_str)
            .collect();
        if !unmapped.is_empty() {
            findings.push(Finding {
                id: "rule.unmapped_option".to_string(),
                title: "Mapping rule does not cover every declared option".to_string(),
                body: format!(
                    "Question {} would reject these options at scoring time: {}.",
                    question.id,
                    unmapped.join(", ")
                ),
                blocking: true,
                question: Some(question.id.clone()),
            });
        }
    }
}
