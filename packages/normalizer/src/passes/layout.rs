use crate::draft::{matching_keys, Draft};
use genui_common::Vocabulary;
use genui_document::{Document, Element};
use serde_json::Value;
use std::borrow::Cow;

/// Give sibling two-column grids the same `layout`.
///
/// Rows listed by two parents tie those parents' rows into one group, so
/// every sibling set agrees after a single pass. The first layout declared
/// in the group wins.
pub fn unify_row_layouts<'a>(doc: &'a Document, vocabulary: Vocabulary<'_>) -> Cow<'a, Document> {
    let mut draft = Draft::new(doc);

    for group in row_groups(doc, vocabulary) {
        let Some(layout) = group.iter().find_map(|key| {
            doc.get(key)
                .and_then(|row| row.prop("layout"))
                .filter(|value| !value.is_null())
        }) else {
            continue;
        };

        for key in &group {
            draft.set_prop(key, "layout", layout.clone());
        }
    }

    draft.finish()
}

/// Two-column rows that must share a layout, in first-seen order
fn row_groups<'a>(doc: &'a Document, vocabulary: Vocabulary<'_>) -> Vec<Vec<&'a str>> {
    let mut groups: Vec<Vec<&'a str>> = Vec::new();

    for parent in doc.elements.values() {
        let rows: Vec<&'a str> = doc
            .children_of(&parent.key)
            .into_iter()
            .filter(|child| vocabulary.is_two_column_grid(child))
            .map(|child| child.key.as_str())
            .collect();
        if rows.len() < 2 {
            continue;
        }

        let mut merged: Vec<&'a str> = Vec::new();
        groups.retain(|group| {
            if group.iter().any(|key| rows.contains(key)) {
                merged.extend(group);
                false
            } else {
                true
            }
        });
        for row in rows {
            if !merged.contains(&row) {
                merged.push(row);
            }
        }
        groups.push(merged);
    }

    groups
}

/// Turn a two-column "label | checklist" grid into a vertical stack
pub fn collapse_checklist_grid<'a>(
    doc: &'a Document,
    vocabulary: Vocabulary<'_>,
) -> Cow<'a, Document> {
    let mut draft = Draft::new(doc);

    for key in matching_keys(doc, |element| vocabulary.is_two_column_grid(element)) {
        let children = doc.children_of(&key);
        let is_checklist_row = match children.as_slice() {
            [label, list] => {
                children.len() == doc.get(&key).map_or(0, |grid| grid.child_keys().len())
                    && vocabulary.is_text(label)
                    && is_checklist(doc, vocabulary, list)
            }
            _ => false,
        };
        if !is_checklist_row {
            continue;
        }

        draft.update(&key, |grid| {
            grid.element_type = "Stack".to_string();
            grid.props.remove("columns");
            grid.props.remove("layout");
            grid.props
                .insert("direction".to_string(), Value::from("vertical"));
        });
    }

    draft.finish()
}

fn is_checklist(doc: &Document, vocabulary: Vocabulary<'_>, element: &Element) -> bool {
    if vocabulary.is_checkable_group(element) {
        return true;
    }
    if !vocabulary.is_stack(element) || element.child_keys().is_empty() {
        return false;
    }
    element
        .child_keys()
        .iter()
        .all(|key| doc.get(key).is_some_and(|child| vocabulary.is_checkable(child)))
}

/// Center a horizontal `- value +` stepper row
pub fn center_stepper<'a>(doc: &'a Document, vocabulary: Vocabulary<'_>) -> Cow<'a, Document> {
    let mut draft = Draft::new(doc);

    for key in matching_keys(doc, |element| vocabulary.is_horizontal_stack(element)) {
        let children = doc.children_of(&key);
        let is_stepper = children.len() <= 3
            && children.iter().any(|child| vocabulary.is_decrement_button(child))
            && children.iter().any(|child| vocabulary.is_increment_button(child));
        if !is_stepper {
            continue;
        }

        draft.set_prop(&key, "align", Value::from("center"));
        draft.set_prop(&key, "justify", Value::from("center"));
    }

    draft.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use genui_schema::Catalog;

    fn standard() -> Vocabulary<'static> {
        Catalog::standard_vocabulary()
    }

    fn row(key: &str, layout: Option<&str>) -> Element {
        let grid = Element::new(key, "Grid").with_prop("columns", 2);
        match layout {
            Some(layout) => grid.with_prop("layout", layout),
            None => grid,
        }
    }

    #[test]
    fn test_unify_uses_first_declared_layout() {
        let doc = Document::new()
            .with_root("form")
            .with_element(Element::new("form", "Stack").with_children(["r1", "r2", "r3", "wide"]))
            .with_element(row("r1", None))
            .with_element(row("r2", Some("2-1")))
            .with_element(row("r3", Some("equal")))
            .with_element(Element::new("wide", "Grid").with_prop("columns", 3).with_prop("layout", "1-1-1"));

        let unified = unify_row_layouts(&doc, standard());
        for key in ["r1", "r2", "r3"] {
            assert_eq!(unified.get(key).unwrap().prop_str("layout"), Some("2-1"));
        }
        assert_eq!(unified.get("wide").unwrap().prop_str("layout"), Some("1-1-1"));
        assert!(matches!(unify_row_layouts(&unified, standard()), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unify_rows_shared_between_parents() {
        let doc = Document::new()
            .with_root("page")
            .with_element(Element::new("page", "Stack").with_children(["b", "a"]))
            .with_element(Element::new("a", "Stack").with_children(["r1", "r2"]))
            .with_element(Element::new("b", "Stack").with_children(["r2", "r3"]))
            .with_element(row("r1", Some("equal")))
            .with_element(row("r2", Some("2-1")))
            .with_element(row("r3", Some("1-2")));

        let unified = unify_row_layouts(&doc, standard());
        let layouts: Vec<_> = ["r1", "r2", "r3"]
            .iter()
            .map(|key| unified.get(key).unwrap().prop_str("layout"))
            .collect();
        assert_eq!(layouts, vec![Some("equal"); 3]);
        assert!(matches!(unify_row_layouts(&unified, standard()), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unify_ignores_lone_rows() {
        let doc = Document::new()
            .with_root("a")
            .with_element(Element::new("a", "Stack").with_children(["r1", "b"]))
            .with_element(Element::new("b", "Stack").with_children(["r2"]))
            .with_element(row("r1", Some("equal")))
            .with_element(row("r2", Some("1-2")));

        assert!(matches!(unify_row_layouts(&doc, standard()), Cow::Borrowed(_)));
    }

    #[test]
    fn test_collapses_label_and_checklist() {
        let doc = Document::new()
            .with_root("g")
            .with_element(
                Element::new("g", "Grid")
                    .with_prop("columns", 2)
                    .with_prop("layout", "1-2")
                    .with_prop("gap", "sm")
                    .with_children(["label", "list"]),
            )
            .with_element(Element::new("label", "Text").with_prop("text", "Notify me"))
            .with_element(Element::new("list", "Stack").with_children(["email", "sms"]))
            .with_element(Element::new("email", "Checkbox"))
            .with_element(Element::new("sms", "Switch"));

        let collapsed = collapse_checklist_grid(&doc, standard());
        let stack = collapsed.get("g").unwrap();
        assert_eq!(stack.element_type, "Stack");
        assert_eq!(stack.prop_str("direction"), Some("vertical"));
        assert_eq!(stack.prop_str("gap"), Some("sm"));
        assert!(stack.prop("columns").is_none());
        assert!(stack.prop("layout").is_none());
        assert!(matches!(collapse_checklist_grid(&collapsed, standard()), Cow::Borrowed(_)));
    }

    #[test]
    fn test_keeps_grid_with_other_content() {
        let doc = Document::new()
            .with_root("g")
            .with_element(
                Element::new("g", "Grid")
                    .with_prop("columns", 2)
                    .with_children(["label", "list"]),
            )
            .with_element(Element::new("label", "Text"))
            .with_element(Element::new("list", "Stack").with_children(["email", "name"]))
            .with_element(Element::new("email", "Checkbox"))
            .with_element(Element::new("name", "Input"));

        assert!(matches!(collapse_checklist_grid(&doc, standard()), Cow::Borrowed(_)));
    }

    #[test]
    fn test_centers_stepper() {
        let doc = Document::new()
            .with_root("row")
            .with_element(
                Element::new("row", "Stack")
                    .with_prop("direction", "horizontal")
                    .with_children(["dec", "qty", "inc"]),
            )
            .with_element(Element::new("dec", "Button").with_prop("label", "-"))
            .with_element(Element::new("qty", "Text").with_prop("text", "1"))
            .with_element(Element::new("inc", "Button").with_prop("ariaLabel", "Increase"));

        let centered = center_stepper(&doc, standard());
        let row = centered.get("row").unwrap();
        assert_eq!(row.prop_str("align"), Some("center"));
        assert_eq!(row.prop_str("justify"), Some("center"));
        assert!(matches!(center_stepper(&centered, standard()), Cow::Borrowed(_)));
    }

    #[test]
    fn test_toolbar_is_not_a_stepper() {
        let doc = Document::new()
            .with_root("row")
            .with_element(
                Element::new("row", "Stack")
                    .with_prop("direction", "horizontal")
                    .with_children(["dec", "a", "b", "inc"]),
            )
            .with_element(Element::new("dec", "Button").with_prop("label", "-"))
            .with_element(Element::new("a", "Text"))
            .with_element(Element::new("b", "Text"))
            .with_element(Element::new("inc", "Button").with_prop("label", "+"));

        assert!(matches!(center_stepper(&doc, standard()), Cow::Borrowed(_)));
    }
}
