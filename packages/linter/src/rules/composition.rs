//! Rules about how a tree reads, beyond whether it is well formed.

use crate::grader::GradeContext;
use crate::rules::GradeRule;
use crate::violation::Violation;
use serde_json::Value;

/// The tree has a heading, and an h1 has subheadings
pub struct VisualHierarchyRule;

impl GradeRule for VisualHierarchyRule {
    fn name(&self) -> &'static str {
        "visual-hierarchy"
    }

    fn description(&self) -> &'static str {
        "A tree must contain a heading; an h1 should be followed by lower-level headings"
    }

    fn check(&self, context: &GradeContext<'_>) -> Vec<Violation> {
        let vocabulary = context.vocabulary();
        let levels: Vec<u8> = context
            .elements()
            .filter_map(|element| vocabulary.heading_level(element))
            .collect();

        if levels.is_empty() {
            return vec![Violation::error(self.name(), "No Heading in the tree")
                .with_suggestion("Start the content with a Heading")];
        }

        let has_h1 = levels.contains(&1);
        let has_subheading = levels.iter().any(|level| *level > 1);
        if has_h1 && !has_subheading {
            return vec![Violation::warning(
                self.name(),
                "An h1 is used without any h2-h6 headings",
            )
            .with_suggestion("Use h2 for section titles inside the page")];
        }

        Vec::new()
    }
}

/// Larger grids declare their column count
pub struct ResponsiveLayoutRule;

impl GradeRule for ResponsiveLayoutRule {
    fn name(&self) -> &'static str {
        "responsive-layout"
    }

    fn description(&self) -> &'static str {
        "Grids with enough children must declare columns"
    }

    fn check(&self, context: &GradeContext<'_>) -> Vec<Violation> {
        let vocabulary = context.vocabulary();
        let min_children = context.options.min_grid_children;

        context
            .elements()
            .filter(|element| vocabulary.is_grid(element))
            .filter(|element| element.prop("columns").map_or(true, Value::is_null))
            .filter(|element| element.child_keys().len() >= min_children)
            .map(|element| {
                Violation::error(
                    self.name(),
                    format!(
                        "Grid '{}' has {} children but no columns",
                        element.key,
                        element.child_keys().len()
                    ),
                )
                .at(&element.key)
                .with_suggestion("Set 'columns' so the grid can reflow")
            })
            .collect()
    }
}

/// Cards are not nested directly in cards
pub struct SurfaceHierarchyRule;

impl GradeRule for SurfaceHierarchyRule {
    fn name(&self) -> &'static str {
        "surface-hierarchy"
    }

    fn description(&self) -> &'static str {
        "A card must not be a direct child of another card"
    }

    fn check(&self, context: &GradeContext<'_>) -> Vec<Violation> {
        let vocabulary = context.vocabulary();
        let mut violations = Vec::new();

        for parent in context.elements().filter(|element| vocabulary.is_card_like(element)) {
            for child in context.doc.children_of(&parent.key) {
                if vocabulary.is_card_like(child) {
                    violations.push(
                        Violation::error(
                            self.name(),
                            format!("Card '{}' is nested directly in card '{}'", child.key, parent.key),
                        )
                        .at(&child.key)
                        .with_suggestion("Use a Stack or Separator to group content inside a card"),
                    );
                }
            }
        }

        violations
    }
}
