use crate::draft::{matching_keys, Draft};
use genui_common::Vocabulary;
use genui_document::{is_dynamic_reference, Document, Element};
use serde_json::Value;
use std::borrow::Cow;

/// Props a select keeps when it degrades to a text input
const INPUT_PROPS: &[&str] = &["label", "placeholder", "name", "ariaLabel", "value"];

/// Turn a select without options into a text input
pub fn convert_empty_select<'a>(
    doc: &'a Document,
    vocabulary: Vocabulary<'_>,
) -> Cow<'a, Document> {
    let mut draft = Draft::new(doc);

    let empty_selects = matching_keys(doc, |element| {
        vocabulary.is_select_family(element) && !has_options(element)
    });
    for key in empty_selects {
        draft.update(&key, |element| {
            element.element_type = "Input".to_string();
            element
                .props
                .retain(|name, _| INPUT_PROPS.contains(&name.as_str()));
        });
    }

    draft.finish()
}

fn has_options(element: &Element) -> bool {
    match element.prop("options") {
        Some(Value::Array(options)) => !options.is_empty(),
        Some(value) => is_dynamic_reference(value),
        None => false,
    }
}

/// Drop a `Text` that only repeats the label of the control right after it.
///
/// Siblings are compared right to left against the next kept sibling, so a
/// run of repeated labels goes in one pass.
pub fn drop_duplicate_label<'a>(
    doc: &'a Document,
    vocabulary: Vocabulary<'_>,
) -> Cow<'a, Document> {
    let mut draft = Draft::new(doc);
    let mut dropped = Vec::new();

    for parent in doc.elements.values() {
        let keys = parent.child_keys();
        let mut kept: Vec<String> = Vec::with_capacity(keys.len());

        for key in keys.iter().rev() {
            let repeats_next = kept
                .last()
                .is_some_and(|next| repeats_label(doc, vocabulary, key, next));
            if repeats_next {
                dropped.push(key.clone());
            } else {
                kept.push(key.clone());
            }
        }

        if kept.len() != keys.len() {
            kept.reverse();
            draft.set_children(&parent.key, kept);
        }
    }

    for key in dropped {
        if draft.is_unlisted(&key) {
            draft.remove(&key);
        }
    }

    draft.finish()
}

fn repeats_label(
    doc: &Document,
    vocabulary: Vocabulary<'_>,
    text_key: &str,
    control_key: &str,
) -> bool {
    let (Some(text), Some(control)) = (doc.get(text_key), doc.get(control_key)) else {
        return false;
    };
    if !vocabulary.is_text(text) || !vocabulary.is_input_family(control) {
        return false;
    }

    match (text.prop_str("text"), control.prop_str("label")) {
        (Some(text), Some(label)) => {
            let text = comparable_label(text);
            !text.is_empty() && text == comparable_label(label)
        }
        _ => false,
    }
}

fn comparable_label(label: &str) -> String {
    label.trim().trim_end_matches(':').trim_end().to_lowercase()
}

/// Move a form's trailing submit button into a right-aligned action row.
///
/// The row is keyed `<button>-actions` (suffixed on collision).
pub fn align_form_submit<'a>(doc: &'a Document, vocabulary: Vocabulary<'_>) -> Cow<'a, Document> {
    let mut draft = Draft::new(doc);

    for key in matching_keys(doc, |element| is_form_stack(doc, vocabulary, element)) {
        let Some(mut children) = draft.get(&key).map(|form| form.child_keys().to_vec()) else {
            continue;
        };
        let Some(button_key) = children.last().cloned() else {
            continue;
        };
        let is_submit = draft
            .get(&button_key)
            .is_some_and(|button| vocabulary.is_submit_button(button));
        if !is_submit {
            continue;
        }

        let actions_key = draft.doc().unique_key(&format!("{}-actions", button_key));
        draft.insert(
            Element::new(actions_key.as_str(), "Stack")
                .with_prop("direction", "horizontal")
                .with_prop("justify", "end")
                .with_children([button_key.as_str()])
                .with_parent(key.as_str()),
        );
        if let Some(last) = children.last_mut() {
            *last = actions_key.clone();
        }
        draft.set_children(&key, children);
        draft.set_parent(&button_key, &actions_key);
    }

    draft.finish()
}

fn is_form_stack(doc: &Document, vocabulary: Vocabulary<'_>, element: &Element) -> bool {
    vocabulary.is_form(element)
        || (vocabulary.is_vertical_stack(element)
            && doc
                .children_of(&element.key)
                .iter()
                .any(|child| vocabulary.is_input_family(child)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use genui_schema::Catalog;
    use serde_json::json;

    fn standard() -> Vocabulary<'static> {
        Catalog::standard_vocabulary()
    }

    #[test]
    fn test_empty_select_becomes_input() {
        let doc = Document::new()
            .with_root("plan")
            .with_element(
                Element::new("plan", "Selection")
                    .with_prop("label", "Plan")
                    .with_prop("placeholder", "Pick one")
                    .with_prop("options", json!([]))
                    .with_prop("searchable", true)
                    .with_parent("form"),
            );

        let converted = convert_empty_select(&doc, standard());
        let input = converted.get("plan").unwrap();
        assert_eq!(input.element_type, "Input");
        assert_eq!(input.prop_str("label"), Some("Plan"));
        assert_eq!(input.prop_str("placeholder"), Some("Pick one"));
        assert!(input.prop("options").is_none());
        assert!(input.prop("searchable").is_none());
        assert_eq!(input.parent_key.as_deref(), Some("form"));
        assert!(matches!(convert_empty_select(&converted, standard()), Cow::Borrowed(_)));
    }

    #[test]
    fn test_select_with_options_or_bound_options_is_kept() {
        let doc = Document::new()
            .with_root("a")
            .with_element(
                Element::new("a", "Select")
                    .with_prop("options", json!([{ "label": "One", "value": 1 }])),
            )
            .with_element(
                Element::new("b", "Dropdown").with_prop("options", json!({ "path": "/plans" })),
            );

        assert!(matches!(convert_empty_select(&doc, standard()), Cow::Borrowed(_)));
    }

    #[test]
    fn test_drops_label_repeated_by_next_control() {
        let doc = Document::new()
            .with_root("form")
            .with_element(
                Element::new("form", "Stack").with_children(["email-label", "email", "hint"]),
            )
            .with_element(Element::new("email-label", "Text").with_prop("text", " Email: "))
            .with_element(Element::new("email", "Input").with_prop("label", "email"))
            .with_element(Element::new("hint", "Text").with_prop("text", "We never share it"));

        let cleaned = drop_duplicate_label(&doc, standard());
        assert_eq!(cleaned.get("form").unwrap().child_keys(), ["email", "hint"]);
        assert!(!cleaned.contains("email-label"));
        assert!(matches!(drop_duplicate_label(&cleaned, standard()), Cow::Borrowed(_)));
    }

    #[test]
    fn test_drops_a_run_of_repeated_labels_at_once() {
        let doc = Document::new()
            .with_root("form")
            .with_element(Element::new("form", "Stack").with_children(["t1", "t2", "email"]))
            .with_element(Element::new("t1", "Text").with_prop("text", "Email"))
            .with_element(Element::new("t2", "Text").with_prop("text", "Email:"))
            .with_element(Element::new("email", "Input").with_prop("label", "Email"));

        let cleaned = drop_duplicate_label(&doc, standard());
        assert_eq!(cleaned.get("form").unwrap().child_keys(), ["email"]);
        assert!(!cleaned.contains("t1"));
        assert!(!cleaned.contains("t2"));
        assert!(matches!(drop_duplicate_label(&cleaned, standard()), Cow::Borrowed(_)));
    }

    #[test]
    fn test_keeps_label_listed_elsewhere_or_different() {
        let doc = Document::new()
            .with_root("form")
            .with_element(Element::new("form", "Stack").with_children(["name-label", "name", "aside"]))
            .with_element(Element::new("aside", "Stack").with_children(["name-label"]))
            .with_element(Element::new("name-label", "Text").with_prop("text", "Name"))
            .with_element(Element::new("name", "Input").with_prop("label", "Name"));

        let cleaned = drop_duplicate_label(&doc, standard());
        assert_eq!(cleaned.get("form").unwrap().child_keys(), ["name", "aside"]);
        assert!(cleaned.contains("name-label"));

        let different = Document::new()
            .with_root("form")
            .with_element(Element::new("form", "Stack").with_children(["t", "i"]))
            .with_element(Element::new("t", "Text").with_prop("text", "Contact"))
            .with_element(Element::new("i", "Input").with_prop("label", "Email"));
        assert!(matches!(drop_duplicate_label(&different, standard()), Cow::Borrowed(_)));
    }

    #[test]
    fn test_wraps_trailing_submit() {
        let doc = Document::new()
            .with_root("form")
            .with_element(Element::new("form", "Stack").with_children(["email", "send"]))
            .with_element(Element::new("email", "Input").with_prop("label", "Email"))
            .with_element(
                Element::new("send", "Button")
                    .with_prop("label", "Send")
                    .with_action("submitContact"),
            );

        let aligned = align_form_submit(&doc, standard());
        assert_eq!(aligned.get("form").unwrap().child_keys(), ["email", "send-actions"]);

        let actions = aligned.get("send-actions").unwrap();
        assert_eq!(actions.prop_str("direction"), Some("horizontal"));
        assert_eq!(actions.prop_str("justify"), Some("end"));
        assert_eq!(actions.child_keys(), ["send"]);
        assert_eq!(aligned.get("send").unwrap().parent_key.as_deref(), Some("send-actions"));

        assert!(matches!(align_form_submit(&aligned, standard()), Cow::Borrowed(_)));
    }

    #[test]
    fn test_submit_outside_form_is_left_alone() {
        let doc = Document::new()
            .with_root("s")
            .with_element(Element::new("s", "Stack").with_children(["intro", "go"]))
            .with_element(Element::new("intro", "Text").with_prop("text", "Ready?"))
            .with_element(Element::new("go", "Button").with_prop("kind", "submit"));

        assert!(matches!(align_form_submit(&doc, standard()), Cow::Borrowed(_)));
    }
}
