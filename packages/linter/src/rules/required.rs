use crate::grader::GradeContext;
use crate::rules::GradeRule;
use crate::violation::Violation;

/// Content-bearing nodes must carry their content
pub struct RequiredPropsRule;

impl GradeRule for RequiredPropsRule {
    fn name(&self) -> &'static str {
        "required-props"
    }

    fn description(&self) -> &'static str {
        "Text and headings need text, buttons need a label"
    }

    fn check(&self, context: &GradeContext<'_>) -> Vec<Violation> {
        let vocabulary = context.vocabulary();
        let mut violations = Vec::new();

        for element in context.elements() {
            let prop = if vocabulary.is_text_bearing(element) {
                "text"
            } else if vocabulary.is_button(element) {
                "label"
            } else {
                continue;
            };

            if !element.has_content(prop) {
                violations.push(
                    Violation::error(
                        self.name(),
                        format!(
                            "{} '{}' is missing a non-empty '{}'",
                            element.element_type, element.key, prop
                        ),
                    )
                    .at(&element.key),
                );
            }
        }

        violations
    }
}
