use genui_document::{Document, Element};
use genui_normalizer::{
    convert_empty_select, unify_row_layouts, NormalizePass, Normalizer, WrapCardChildren,
};
use genui_schema::Catalog;
use serde_json::json;
use std::borrow::Cow;
use std::sync::Arc;

/// A generated signup card with most of the usual defects
fn messy_card() -> Document {
    Document::new()
        .with_root("card")
        .with_element(
            Element::new("card", "Card")
                .with_prop("title", "Sign up")
                .with_children(["shell"]),
        )
        .with_element(
            Element::new("shell", "Panel")
                .with_prop("padding", "lg")
                .with_children(["intro", "names", "contact", "plan-label", "plan", "prefs", "qty", "submit"]),
        )
        .with_element(Element::new("intro", "Heading").with_prop("text", "Create your account"))
        .with_element(
            Element::new("names", "Grid")
                .with_prop("columns", 2)
                .with_prop("layout", "side-by-side")
                .with_prop("children", json!(["first", "last"])),
        )
        .with_element(Element::new("first", "Input").with_prop("label", "First name"))
        .with_element(Element::new("last", "Input").with_prop("label", "Last name"))
        .with_element(
            Element::new("contact", "Grid")
                .with_prop("columns", 2)
                .with_prop("layout", "2-1")
                .with_children(["email", "phone"]),
        )
        .with_element(Element::new("email", "Input").with_prop("label", "Email"))
        .with_element(Element::new("phone", "Input").with_prop("label", "Phone"))
        .with_element(Element::new("plan-label", "Text").with_prop("text", "Plan:"))
        .with_element(Element::new("plan", "Selection").with_prop("label", "Plan"))
        .with_element(
            Element::new("prefs", "Grid")
                .with_prop("columns", 2)
                .with_children(["prefs-label", "prefs-list"]),
        )
        .with_element(Element::new("prefs-label", "Text").with_prop("text", "Updates"))
        .with_element(Element::new("prefs-list", "CheckboxGroup").with_prop("label", "Updates"))
        .with_element(
            Element::new("qty", "Stack")
                .with_prop("direction", "horizontal")
                .with_children(["minus", "seats", "plus"]),
        )
        .with_element(Element::new("minus", "Button").with_prop("label", "−"))
        .with_element(Element::new("seats", "Text").with_prop("text", "3 seats"))
        .with_element(Element::new("plus", "Button").with_prop("label", "+"))
        .with_element(
            Element::new("submit", "Button")
                .with_prop("label", "Create account")
                .with_prop("kind", "submit"),
        )
}

#[test]
fn test_sibling_rows_get_the_same_layout() {
    let doc = Document::new()
        .with_root("form")
        .with_element(Element::new("form", "Stack").with_children(["row-a", "row-b"]))
        .with_element(
            Element::new("row-a", "Grid")
                .with_prop("columns", 2)
                .with_prop("layout", "side-by-side"),
        )
        .with_element(
            Element::new("row-b", "Grid")
                .with_prop("columns", 2)
                .with_prop("layout", "2-1"),
        );

    let unified = unify_row_layouts(&doc, Catalog::standard_vocabulary());
    let a = unified.get("row-a").unwrap().prop("layout");
    let b = unified.get("row-b").unwrap().prop("layout");
    assert_eq!(a, b);
    assert_eq!(a, Some(&json!("side-by-side")));
}

#[test]
fn test_selection_without_options_becomes_input() {
    let doc = Document::new().with_root("pick").with_element(
        Element::new("pick", "Selection")
            .with_prop("label", "Country")
            .with_prop("name", "country"),
    );

    let converted = convert_empty_select(&doc, Catalog::standard_vocabulary());
    let element = converted.get("pick").unwrap();
    assert_eq!(element.element_type, "Input");
    assert_eq!(element.prop_str("name"), Some("country"));
}

#[test]
fn test_full_pipeline_on_messy_card() {
    let doc = messy_card();
    let normalized = Normalizer::new().run_traced(&doc);
    let tree = &normalized.document;

    // nested panel lifted, then content wrapped in one stack
    assert!(!tree.contains("shell"));
    let card = tree.get("card").unwrap();
    assert_eq!(card.prop_str("title"), Some("Sign up"));
    assert_eq!(card.prop_str("padding"), Some("lg"));
    assert_eq!(card.child_keys(), ["card-stack"]);

    let body = tree.get("card-stack").unwrap();
    assert_eq!(
        body.child_keys(),
        ["intro", "names", "contact", "plan", "prefs", "qty", "submit-actions"]
    );

    assert_eq!(tree.get("names").unwrap().child_keys(), ["first", "last"]);
    assert_eq!(tree.get("contact").unwrap().prop_str("layout"), Some("side-by-side"));
    assert_eq!(tree.get("plan").unwrap().element_type, "Input");
    assert!(!tree.contains("plan-label"));
    assert_eq!(tree.get("prefs").unwrap().element_type, "Stack");
    assert_eq!(tree.get("qty").unwrap().prop_str("justify"), Some("center"));
    assert_eq!(tree.get("submit-actions").unwrap().child_keys(), ["submit"]);

    assert_eq!(
        normalized.changed,
        vec![
            "migrate_props_children",
            "lift_nested_card",
            "wrap_card_children",
            "unify_row_layouts",
            "convert_empty_select",
            "collapse_checklist_grid",
            "drop_duplicate_label",
            "center_stepper",
            "align_form_submit",
        ]
    );
}

#[test]
fn test_pipeline_is_idempotent() {
    let doc = messy_card();
    let normalizer = Normalizer::new();

    let once = normalizer.run(&doc).into_owned();
    let twice = normalizer.run(&once);
    assert!(matches!(twice, Cow::Borrowed(_)));
}

#[test]
fn test_untouched_elements_are_shared() {
    let doc = Document::new()
        .with_root("card")
        .with_element(Element::new("card", "Card").with_children(["a", "b"]))
        .with_element(Element::new("a", "Text").with_prop("text", "A"))
        .with_element(Element::new("b", "Text").with_prop("text", "B"))
        .with_element(Element::new("elsewhere", "Badge").with_prop("text", "new"));

    let wrapped = WrapCardChildren.apply(&doc, Catalog::standard_vocabulary());
    assert!(Arc::ptr_eq(
        &doc.elements["elsewhere"],
        &wrapped.elements["elsewhere"]
    ));
    assert!(!Arc::ptr_eq(&doc.elements["card"], &wrapped.elements["card"]));
    assert_eq!(doc.get("card").unwrap().child_keys(), ["a", "b"]);
}
