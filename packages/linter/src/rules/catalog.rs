use crate::grader::GradeContext;
use crate::rules::GradeRule;
use crate::violation::Violation;
use genui_schema::ValidationResult;

/// Every type must be part of the vocabulary
pub struct ValidComponentTypesRule;

impl GradeRule for ValidComponentTypesRule {
    fn name(&self) -> &'static str {
        "valid-component-types"
    }

    fn description(&self) -> &'static str {
        "Element types must resolve in the component catalog"
    }

    fn check(&self, context: &GradeContext<'_>) -> Vec<Violation> {
        let catalog = context.options.validator.catalog();

        context
            .elements()
            .filter(|element| !catalog.is_known_type(&element.element_type))
            .map(|element| {
                Violation::error(
                    self.name(),
                    format!("Unknown component type '{}'", element.element_type),
                )
                .at(&element.key)
                .with_suggestion("Use a component, alias or sub-component declared in the catalog")
            })
            .collect()
    }
}

/// Props must satisfy the catalog once coerced
pub struct ValidPropValuesRule;

impl GradeRule for ValidPropValuesRule {
    fn name(&self) -> &'static str {
        "valid-prop-values"
    }

    fn description(&self) -> &'static str {
        "Element props must validate against their schema after coercion"
    }

    fn check(&self, context: &GradeContext<'_>) -> Vec<Violation> {
        let validator = &context.options.validator;
        let mut violations = Vec::new();

        for element in context.elements() {
            let coerced = validator.coerce_element_props(element);
            if let ValidationResult::Invalid(issues) = validator.validate_element(&coerced) {
                violations.extend(issues.into_iter().map(|issue| {
                    Violation::error(
                        self.name(),
                        format!("{} '{}': {}", element.element_type, element.key, issue),
                    )
                    .at(&element.key)
                }));
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grader::GradeOptions;
    use genui_document::{Document, Element};

    #[test]
    fn test_unknown_type_reported() {
        let doc = Document::new()
            .with_root("a")
            .with_element(Element::new("a", "Stack").with_children(["b", "c"]))
            .with_element(Element::new("b", "Marquee"))
            .with_element(Element::new("c", "Panel"));

        let options = GradeOptions::default();
        let violations = ValidComponentTypesRule.check(&GradeContext { doc: &doc, options: &options });
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].element_key.as_deref(), Some("b"));
        assert_eq!(violations[0].message, "Unknown component type 'Marquee'");
    }

    #[test]
    fn test_prop_values_checked_after_coercion() {
        let doc = Document::new()
            .with_root("a")
            .with_element(Element::new("a", "Stack").with_prop("gap", "medium").with_children(["b"]))
            .with_element(Element::new("b", "Button").with_prop("label", "Go").with_prop("size", "xxl"));

        let options = GradeOptions::default();
        let violations = ValidPropValuesRule.check(&GradeContext { doc: &doc, options: &options });
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].element_key.as_deref(), Some("b"));
        assert!(violations[0].message.starts_with("Button 'b': size: Invalid enum value"));
    }
}
