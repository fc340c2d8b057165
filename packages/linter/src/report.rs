use crate::violation::Violation;
use serde::{Deserialize, Serialize};

/// Outcome of one rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    pub rule: String,
    pub pass: bool,
    pub violations: Vec<Violation>,
}

impl RuleResult {
    pub fn new(rule: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            rule: rule.into(),
            pass: !violations.iter().any(Violation::is_error),
            violations,
        }
    }
}

/// Ordered per-rule results of a grading run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub results: Vec<RuleResult>,
    pub all_pass: bool,
}

impl GradeReport {
    pub fn from_results(results: Vec<RuleResult>) -> Self {
        let all_pass = results.iter().all(|result| result.pass);
        Self { results, all_pass }
    }

    pub fn result(&self, rule: &str) -> Option<&RuleResult> {
        self.results.iter().find(|result| result.rule == rule)
    }

    /// Names of rules that did not pass, in report order
    pub fn failed_rules(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|result| !result.pass)
            .map(|result| result.rule.as_str())
            .collect()
    }

    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.results.iter().flat_map(|result| result.violations.iter())
    }

    /// Concatenate two reports (structural then composition)
    pub fn merge(mut self, other: GradeReport) -> GradeReport {
        self.results.extend(other.results);
        GradeReport::from_results(self.results)
    }
}
