use crate::grader::GradeContext;
use crate::rules::GradeRule;
use crate::violation::Violation;

/// Form controls need an accessible name
pub struct A11yLabelsRule;

impl GradeRule for A11yLabelsRule {
    fn name(&self) -> &'static str {
        "a11y-labels"
    }

    fn description(&self) -> &'static str {
        "Interactive controls must have a label or ariaLabel"
    }

    fn check(&self, context: &GradeContext<'_>) -> Vec<Violation> {
        let vocabulary = context.vocabulary();
        context
            .elements()
            .filter(|element| vocabulary.is_interactive_control(element))
            .filter(|element| !element.has_content("label") && !element.has_content("ariaLabel"))
            .map(|element| {
                Violation::error(
                    self.name(),
                    format!(
                        "{} '{}' has no accessible name",
                        element.element_type, element.key
                    ),
                )
                .at(&element.key)
                .with_suggestion(
                    "Add a visible 'label', or 'ariaLabel' when the label is shown elsewhere",
                )
            })
            .collect()
    }
}
