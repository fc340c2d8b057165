//! # Element Validation & Repair
//!
//! Per element, in order:
//!
//! 1. **Coerce**: substitute known-invalid values from the [`CoercionTable`]
//! 2. **Resolve**: map the type through the [`Catalog`] (direct, alias, sub-component)
//! 3. **Validate**: required props present, declared props satisfy their constraint
//! 4. **Repair**: drop failing top-level props so the element renders with defaults
//!
//! Types the catalog does not know are valid: extension types are never blocked.
//! Nothing in here fails; every outcome is a value.

use crate::catalog::{Catalog, PropSchema, ResolvedSchema};
use crate::coercion::CoercionTable;
use genui_document::{is_dynamic_reference, Element};
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// One failing field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Path below `props`; `["options", "0", "label"]` for nested values
    pub field_path: Vec<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field_path: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            field_path,
            message: message.into(),
        }
    }

    /// True for direct properties, the only ones repair can drop
    pub fn is_top_level(&self) -> bool {
        self.field_path.len() == 1
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field_path.join("."), self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "issues", rename_all = "lowercase")]
pub enum ValidationResult {
    Valid,
    Invalid(Vec<ValidationIssue>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid(issues) => issues,
        }
    }
}

/// Result of running the whole pipeline on one element
#[derive(Debug, Clone, PartialEq)]
pub enum ElementOutcome<'a> {
    /// Valid as received, or after coercion
    Valid(Cow<'a, Element>),

    /// Invalid top-level props were dropped
    Repaired {
        element: Element,
        removed: Vec<String>,
        issues: Vec<ValidationIssue>,
    },

    /// Nothing could be dropped; the element should be flagged downstream
    Invalid {
        element: Cow<'a, Element>,
        issues: Vec<ValidationIssue>,
    },
}

impl ElementOutcome<'_> {
    /// Element the presentation layer should use
    pub fn element(&self) -> &Element {
        match self {
            ElementOutcome::Valid(element) => element,
            ElementOutcome::Repaired { element, .. } => element,
            ElementOutcome::Invalid { element, .. } => element,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, ElementOutcome::Invalid { .. })
    }
}

/// Validation pipeline bound to one catalog and coercion table
#[derive(Debug, Clone)]
pub struct Validator {
    catalog: Arc<Catalog>,
    coercions: Arc<CoercionTable>,
}

impl Validator {
    pub fn new(catalog: Arc<Catalog>, coercions: Arc<CoercionTable>) -> Self {
        Self { catalog, coercions }
    }

    /// Validator over the built-in catalog and coercion table
    pub fn standard() -> Self {
        Self::new(Catalog::standard(), CoercionTable::standard())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle to the catalog, for components that match on its aliases
    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn coercions(&self) -> &CoercionTable {
        &self.coercions
    }

    /// Substitute known-invalid values; borrowed when nothing matched
    pub fn coerce_element_props<'a>(&self, element: &'a Element) -> Cow<'a, Element> {
        let type_name = self
            .catalog
            .resolve(&element.element_type)
            .map(|resolved| resolved.type_name)
            .unwrap_or(&element.element_type);

        let Some(props) = self.coercions.props_for(type_name) else {
            return Cow::Borrowed(element);
        };

        let mut coerced: Option<Element> = None;
        for prop in props.keys() {
            let Some(value) = element.props.get(prop) else {
                continue;
            };
            if let Some(replacement) = self.coercions.lookup(type_name, prop, value) {
                if replacement != value {
                    coerced
                        .get_or_insert_with(|| element.clone())
                        .props
                        .insert(prop.clone(), replacement.clone());
                }
            }
        }

        match coerced {
            Some(element) => Cow::Owned(element),
            None => Cow::Borrowed(element),
        }
    }

    pub fn resolve_schema(&self, element_type: &str) -> Option<ResolvedSchema<'_>> {
        self.catalog.resolve(element_type)
    }

    /// Check required props and prop constraints for the element's resolved schema
    pub fn validate_element(&self, element: &Element) -> ValidationResult {
        let Some(resolved) = self.resolve_schema(&element.element_type) else {
            return ValidationResult::Valid;
        };
        let schema = resolved.schema;

        let mut issues = Vec::new();

        for name in &schema.required {
            if element.props.get(name).map_or(true, Value::is_null) {
                issues.push(ValidationIssue::new(vec![name.clone()], "Required"));
            }
        }

        let mut path = Vec::new();
        for (name, prop_schema) in &schema.props {
            if let Some(value) = element.props.get(name) {
                path.push(name.clone());
                check_value(value, prop_schema, &mut path, &mut issues);
                path.pop();
            }
        }

        if issues.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(issues)
        }
    }

    /// Drop failing top-level props; `None` when no issue is top-level
    pub fn repair_element(&self, element: &Element, result: &ValidationResult) -> Option<Element> {
        repair_element(element, result)
    }

    /// Coerce, validate and, when needed, repair
    pub fn check_element<'a>(&self, element: &'a Element) -> ElementOutcome<'a> {
        let coerced = self.coerce_element_props(element);

        let issues = match self.validate_element(&coerced) {
            ValidationResult::Valid => return ElementOutcome::Valid(coerced),
            ValidationResult::Invalid(issues) => issues,
        };

        match strip_top_level(&coerced, &issues) {
            Some((repaired, removed)) => {
                debug!(key = %element.key, removed = ?removed, "Repaired element");
                ElementOutcome::Repaired {
                    element: repaired,
                    removed,
                    issues,
                }
            }
            None => {
                debug!(key = %element.key, issues = issues.len(), "Element failed validation");
                ElementOutcome::Invalid {
                    element: coerced,
                    issues,
                }
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::standard()
    }
}

/// Remove the props named by top-level issues.
///
/// Any issue one segment deep makes the element repairable, including a
/// missing required prop: the renderer falls back to its default.
pub fn repair_element(element: &Element, result: &ValidationResult) -> Option<Element> {
    match result {
        ValidationResult::Valid => None,
        ValidationResult::Invalid(issues) => {
            strip_top_level(element, issues).map(|(repaired, _)| repaired)
        }
    }
}

fn strip_top_level(element: &Element, issues: &[ValidationIssue]) -> Option<(Element, Vec<String>)> {
    let mut removed: Vec<String> = Vec::new();
    for issue in issues.iter().filter(|issue| issue.is_top_level()) {
        let prop = &issue.field_path[0];
        if !removed.contains(prop) {
            removed.push(prop.clone());
        }
    }

    if removed.is_empty() {
        return None;
    }

    let mut repaired = element.clone();
    for prop in &removed {
        repaired.props.remove(prop);
    }
    Some((repaired, removed))
}

fn check_value(
    value: &Value,
    schema: &PropSchema,
    path: &mut Vec<String>,
    issues: &mut Vec<ValidationIssue>,
) {
    // null means "absent" and dynamic references resolve at render time
    if value.is_null() || is_dynamic_reference(value) {
        return;
    }

    match schema {
        PropSchema::String => {
            if !value.is_string() {
                issues.push(expected(path, "string", value));
            }
        }
        PropSchema::Number { min, max } => match value.as_f64() {
            None => issues.push(expected(path, "number", value)),
            Some(n) => {
                if let Some(min) = min.filter(|min| n < *min) {
                    issues.push(ValidationIssue::new(
                        path.clone(),
                        format!("Number must be greater than or equal to {}", min),
                    ));
                }
                if let Some(max) = max.filter(|max| n > *max) {
                    issues.push(ValidationIssue::new(
                        path.clone(),
                        format!("Number must be less than or equal to {}", max),
                    ));
                }
            }
        },
        PropSchema::Boolean => {
            if !value.is_boolean() {
                issues.push(expected(path, "boolean", value));
            }
        }
        PropSchema::Enum { values } => {
            let candidate = match value {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            };
            if !candidate.is_some_and(|c| values.contains(&c)) {
                issues.push(ValidationIssue::new(
                    path.clone(),
                    format!(
                        "Invalid enum value. Expected {}, received {}",
                        schema.describe(),
                        value
                    ),
                ));
            }
        }
        PropSchema::Array { items } => match value.as_array() {
            None => issues.push(expected(path, "array", value)),
            Some(entries) => {
                if let Some(items) = items {
                    for (index, entry) in entries.iter().enumerate() {
                        path.push(index.to_string());
                        check_value(entry, items, path, issues);
                        path.pop();
                    }
                }
            }
        },
        PropSchema::Object { fields, required } => match value.as_object() {
            None => issues.push(expected(path, "object", value)),
            Some(map) => {
                for name in required {
                    if map.get(name).map_or(true, Value::is_null) {
                        path.push(name.clone());
                        issues.push(ValidationIssue::new(path.clone(), "Required"));
                        path.pop();
                    }
                }
                for (name, field) in fields {
                    if let Some(entry) = map.get(name) {
                        path.push(name.clone());
                        check_value(entry, field, path, issues);
                        path.pop();
                    }
                }
            }
        },
        PropSchema::Any => {}
    }
}

fn expected(path: &[String], kind: &str, value: &Value) -> ValidationIssue {
    ValidationIssue::new(
        path.to_vec(),
        format!("Expected {}, received {}", kind, value_kind(value)),
    )
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
