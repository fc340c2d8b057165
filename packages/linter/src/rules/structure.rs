use crate::grader::GradeContext;
use crate::rules::GradeRule;
use crate::violation::Violation;
use genui_common::{parent_index, walk_document, Visitor};
use genui_document::Element;

/// A card root holds exactly one vertical stack
pub struct CanonicalLayoutRule;

impl GradeRule for CanonicalLayoutRule {
    fn name(&self) -> &'static str {
        "canonical-layout"
    }

    fn description(&self) -> &'static str {
        "A card root must have a single vertical Stack child"
    }

    fn check(&self, context: &GradeContext<'_>) -> Vec<Violation> {
        let Some(root) = context.doc.root_element() else {
            return Vec::new();
        };
        let vocabulary = context.vocabulary();
        if !vocabulary.is_card_like(root) {
            return Vec::new();
        }

        let children = root.child_keys();
        if children.len() != 1 {
            return vec![Violation::error(
                self.name(),
                format!(
                    "Card root '{}' must have exactly one child, found {}",
                    root.key,
                    children.len()
                ),
            )
            .at(&root.key)
            .with_suggestion("Wrap the card's content in a single vertical Stack")];
        }

        match context.doc.get(&children[0]) {
            Some(child) if vocabulary.is_vertical_stack(child) => Vec::new(),
            Some(child) => vec![Violation::error(
                self.name(),
                format!(
                    "Card root '{}' must contain a vertical Stack, found {} '{}'",
                    root.key, child.element_type, child.key
                ),
            )
            .at(&child.key)],
            None => vec![Violation::error(
                self.name(),
                format!(
                    "Card root '{}' lists child '{}' which does not exist",
                    root.key, children[0]
                ),
            )
            .at(&root.key)],
        }
    }
}

/// Each non-root element has exactly one parent
pub struct NoOrphanNodesRule;

impl GradeRule for NoOrphanNodesRule {
    fn name(&self) -> &'static str {
        "no-orphan-nodes"
    }

    fn description(&self) -> &'static str {
        "Every element except the root must be listed by exactly one parent"
    }

    fn check(&self, context: &GradeContext<'_>) -> Vec<Violation> {
        let parents = parent_index(context.doc);
        let mut violations = Vec::new();

        for key in context.doc.elements.keys() {
            if *key == context.doc.root {
                continue;
            }
            match parents.get(key.as_str()).map(Vec::len).unwrap_or(0) {
                0 => violations.push(
                    Violation::error(self.name(), format!("Element '{}' has no parent", key))
                        .at(key)
                        .with_suggestion("Add it to a parent's children or remove it"),
                ),
                1 => {}
                count => violations.push(
                    Violation::error(
                        self.name(),
                        format!("Element '{}' is listed by {} parents", key, count),
                    )
                    .at(key),
                ),
            }
        }

        violations
    }
}

/// Elements stay within the configured depth
pub struct DepthLimitRule;

struct TooDeep {
    limit: usize,
    found: Vec<(String, usize)>,
}

impl Visitor for TooDeep {
    fn visit_element(&mut self, element: &Element, depth: usize) {
        if depth > self.limit {
            self.found.push((element.key.clone(), depth));
        }
    }
}

impl GradeRule for DepthLimitRule {
    fn name(&self) -> &'static str {
        "depth-limit"
    }

    fn description(&self) -> &'static str {
        "Elements reachable from the root must not nest deeper than the depth limit"
    }

    fn check(&self, context: &GradeContext<'_>) -> Vec<Violation> {
        let limit = context.options.depth_limit;
        let mut visitor = TooDeep {
            limit,
            found: Vec::new(),
        };
        walk_document(&mut visitor, context.doc, limit);

        visitor
            .found
            .into_iter()
            .map(|(key, depth)| {
                Violation::error(
                    self.name(),
                    format!(
                        "Element '{}' sits at depth {}, limit is {}",
                        key, depth, limit
                    ),
                )
                .at(key)
                .with_suggestion("Flatten nested stacks")
            })
            .collect()
    }
}

/// Children belong in `children`, not in props
pub struct NoRedundantChildrenRule;

impl GradeRule for NoRedundantChildrenRule {
    fn name(&self) -> &'static str {
        "no-redundant-children"
    }

    fn description(&self) -> &'static str {
        "Elements must not carry an array under props.children"
    }

    fn check(&self, context: &GradeContext<'_>) -> Vec<Violation> {
        context
            .elements()
            .filter(|element| element.prop("children").is_some_and(|value| value.is_array()))
            .map(|element| {
                Violation::error(
                    self.name(),
                    format!("Element '{}' lists children inside its props", element.key),
                )
                .at(&element.key)
                .with_suggestion("Move the keys into the element's 'children' list")
            })
            .collect()
    }
}
