use crate::error::{CompassError, Result};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_POLICY_FILE: &str = "compass.toml";

/// Optional policy file sections. Anything absent falls back to the
/// defaults baked into [`EnginePolicy`].
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    pub gap: Option<GapPolicy>,
    #[serde(rename = "match")]
    pub matching: Option<MatchPolicy>,
    pub priority: Option<PriorityPolicy>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GapPolicy {
    pub critical_below: Option<f32>,
    pub high_below: Option<f32>,
    pub medium_below: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchPolicy {
    pub boost_ceiling: Option<f32>,
    pub highly_relevant_at: Option<f32>,
    pub good_match_at: Option<f32>,
    pub fair_match_at: Option<f32>,
    pub min_score: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriorityPolicy {
    pub rank_points: Option<Vec<f32>>,
}

/// Resolved scoring/matching thresholds after defaults are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct EnginePolicy {
    pub gap_critical_below: f32,
    pub gap_high_below: f32,
    pub gap_medium_below: f32,
    pub boost_ceiling: f32,
    pub highly_relevant_at: f32,
    pub good_match_at: f32,
    pub fair_match_at: f32,
    pub min_score: Option<f32>,
    /// Boost points by priority rank, highest rank first.
    pub rank_points: Vec<f32>,
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self {
            gap_critical_below: 1.0,
            gap_high_below: 2.0,
            gap_medium_below: 3.0,
            boost_ceiling: 40.0,
            highly_relevant_at: 100.0,
            good_match_at: 85.0,
            fair_match_at: 70.0,
            min_score: None,
            rank_points: vec![20.0, 12.0, 6.0],
        }
    }
}

impl EnginePolicy {
    fn from_config(config: PolicyConfig) -> Self {
        let defaults = EnginePolicy::default();
        let gap = config.gap.as_ref();
        let matching = config.matching.as_ref();
        EnginePolicy {
            gap_critical_below: gap
                .and_then(|gap| gap.critical_below)
                .unwrap_or(defaults.gap_critical_below),
            gap_high_below: gap
                .and_then(|gap| gap.high_below)
                .unwrap_or(defaults.gap_high_below),
            gap_medium_below: gap
                .and_then(|gap| gap.medium_below)
                .unwrap_or(defaults.gap_medium_below),
            boost_ceiling: matching
                .and_then(|matching| matching.boost_ceiling)
                .unwrap_or(defaults.boost_ceiling),
            highly_relevant_at: matching
                .and_then(|matching| matching.highly_relevant_at)
                .unwrap_or(defaults.highly_relevant_at),
            good_match_at: matching
                .and_then(|matching| matching.good_match_at)
                .unwrap_or(defaults.good_match_at),
            fair_match_at: matching
                .and_then(|matching| matching.fair_match_at)
                .unwrap_or(defaults.fair_match_at),
            min_score: matching.and_then(|matching| matching.min_score),
            rank_points: config
                .priority
                .and_then(|priority| priority.rank_points)
                .unwrap_or(defaults.rank_points),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            self.gap_critical_below,
            self.gap_high_below,
            self.gap_medium_below,
        ];
        if thresholds.iter().any(|value| !(0.0..=5.0).contains(value)) {
            return Err(CompassError::PolicyParse(
                "gap thresholds must be between 0.0 and 5.0".to_string(),
            ));
        }
        if !(self.gap_critical_below < self.gap_high_below
            && self.gap_high_below < self.gap_medium_below)
        {
            return Err(CompassError::PolicyParse(
                "gap thresholds must be strictly ascending: critical < high < medium".to_string(),
            ));
        }

        if !(0.0..=100.0).contains(&self.boost_ceiling) {
            return Err(CompassError::PolicyParse(
                "match.boost_ceiling must be between 0.0 and 100.0".to_string(),
            ));
        }
        if !(self.fair_match_at < self.good_match_at
            && self.good_match_at < self.highly_relevant_at)
        {
            return Err(CompassError::PolicyParse(
                "match quality thresholds must be strictly ascending: fair < good < highly relevant"
                    .to_string(),
            ));
        }

        if self.rank_points.is_empty() {
            return Err(CompassError::PolicyParse(
                "priority.rank_points cannot be empty".to_string(),
            ));
        }
        if self.rank_points.iter().any(|points| *points < 0.0) {
            return Err(CompassError::PolicyParse(
                "priority.rank_points must be non-negative".to_string(),
            ));
        }
        if self
            .rank_points
            .windows(2)
            .any(|window| window[1] > window[0])
        {
            return Err(CompassError::PolicyParse(
                "priority.rank_points must not increase with rank".to_string(),
            ));
        }

        Ok(())
    }
}

/// Loads the policy from an explicit path, from `compass.toml` next to the
/// invocation if present, or falls back to defaults. An explicit path that
/// does not exist is an error; the implicit file is optional.
pub fn load_policy(explicit: Option<&Path>) -> Result<EnginePolicy> {
    let policy = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(CompassError::PathNotFound(path.display().to_string()));
            }
            parse_policy_file(path)?
        }
        None => {
            let implicit = Path::new(DEFAULT_POLICY_FILE);
            if implicit.exists() {
                parse_policy_file(implicit)?
            } else {
                EnginePolicy::default()
            }
        }
    };
    policy.validate()?;
    Ok(policy)
}

fn parse_policy_file(path: &Path) -> Result<EnginePolicy> {
    let content = std::fs::read_to_string(path)?;
    let config: PolicyConfig = toml::from_str(&content)
        .map_err(|e| CompassError::PolicyParse(format!("{}: {}", path.display(), e)))?;
    Ok(EnginePolicy::from_config(config))
}
