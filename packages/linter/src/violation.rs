use serde::{Deserialize, Serialize};

/// Severity level of a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationLevel {
    Error,
    Warning,
    Info,
}

/// A finding reported by a grading rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// The rule that generated this violation
    pub rule: String,

    pub level: ViolationLevel,

    /// Human-readable message
    pub message: String,

    /// Element the finding is about, when it is about one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_key: Option<String>,

    /// Optional suggestion for fixing the issue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Violation {
    fn new(level: ViolationLevel, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            level,
            message: message.into(),
            element_key: None,
            suggestion: None,
        }
    }

    pub fn error(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationLevel::Error, rule, message)
    }

    pub fn warning(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationLevel::Warning, rule, message)
    }

    pub fn at(mut self, element_key: impl Into<String>) -> Self {
        self.element_key = Some(element_key.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Only errors fail a rule
    pub fn is_error(&self) -> bool {
        self.level == ViolationLevel::Error
    }
}
