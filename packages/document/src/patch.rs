//! # Patch Application
//!
//! Folds one [`PatchOp`] into a [`Document`] snapshot.
//!
//! ## Semantics
//!
//! - `/root` sets (or clears) the root key
//! - `/elements/<key>` inserts or overwrites a whole element; `add` and
//!   `replace` behave the same and neither requires prior (non-)existence
//! - `remove` on an element never cascades into parents' `children`
//! - deeper paths are JSON-pointer edits inside the element
//!
//! Anything that does not fit is a no-op: the input snapshot is returned
//! borrowed, so callers can detect "nothing happened" without comparing trees.

use crate::element::{Document, Element};
use crate::path::PatchPath;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::debug;

/// One add/replace/remove instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOp {
    Add { path: String, value: Value },
    Replace { path: String, value: Value },
    Remove { path: String },
}

impl PatchOp {
    pub fn add(path: impl Into<String>, value: impl Into<Value>) -> Self {
        PatchOp::Add {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        PatchOp::Replace {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn remove(path: impl Into<String>) -> Self {
        PatchOp::Remove { path: path.into() }
    }

    pub fn path(&self) -> &str {
        match self {
            PatchOp::Add { path, .. } | PatchOp::Replace { path, .. } | PatchOp::Remove { path } => {
                path
            }
        }
    }

    /// Value carried by add/replace
    pub fn value(&self) -> Option<&Value> {
        match self {
            PatchOp::Add { value, .. } | PatchOp::Replace { value, .. } => Some(value),
            PatchOp::Remove { .. } => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PatchOp::Add { .. } => "add",
            PatchOp::Replace { .. } => "replace",
            PatchOp::Remove { .. } => "remove",
        }
    }
}

/// Apply one operation, returning the input borrowed when nothing changed
pub fn apply_patch<'a>(doc: &'a Document, op: &PatchOp) -> Cow<'a, Document> {
    let Some(path) = PatchPath::parse(op.path()) else {
        debug!(op = op.name(), path = op.path(), "Unsupported patch path");
        return Cow::Borrowed(doc);
    };

    let next = match (&path, op.value()) {
        (PatchPath::Root, Some(value)) => set_root(doc, value),
        (PatchPath::Root, None) => clear_root(doc),
        (PatchPath::Element { key }, Some(value)) => put_element(doc, key, value),
        (PatchPath::Element { key }, None) => remove_element(doc, key),
        (PatchPath::Field { key, pointer }, value) => edit_field(doc, key, pointer, value),
    };

    match next {
        Some(next) => Cow::Owned(next),
        None => {
            debug!(op = op.name(), path = %path, "Patch operation left document unchanged");
            Cow::Borrowed(doc)
        }
    }
}

/// Replay a sequence of operations on top of `doc`
pub fn apply_all<'a, I>(doc: &Document, ops: I) -> Document
where
    I: IntoIterator<Item = &'a PatchOp>,
{
    let mut current = doc.clone();
    for op in ops {
        let next = match apply_patch(&current, op) {
            Cow::Owned(next) => Some(next),
            Cow::Borrowed(_) => None,
        };
        if let Some(next) = next {
            current = next;
        }
    }
    current
}

fn set_root(doc: &Document, value: &Value) -> Option<Document> {
    let root = value.as_str()?;
    if doc.root == root {
        return None;
    }
    let mut next = doc.clone();
    next.root = root.to_string();
    Some(next)
}

fn clear_root(doc: &Document) -> Option<Document> {
    if doc.root.is_empty() {
        return None;
    }
    let mut next = doc.clone();
    next.root.clear();
    Some(next)
}

fn put_element(doc: &Document, key: &str, value: &Value) -> Option<Document> {
    let mut element: Element = match serde_json::from_value(value.clone()) {
        Ok(element) => element,
        Err(err) => {
            debug!(key, error = %err, "Patch value is not an element");
            return None;
        }
    };
    // The path is authoritative for the key
    element.key = key.to_string();

    if doc.get(key) == Some(&element) {
        return None;
    }

    let mut next = doc.clone();
    next.elements.insert(key.to_string(), Arc::new(element));
    Some(next)
}

fn remove_element(doc: &Document, key: &str) -> Option<Document> {
    if !doc.contains(key) {
        return None;
    }
    let mut next = doc.clone();
    next.elements.remove(key);
    Some(next)
}

fn edit_field(
    doc: &Document,
    key: &str,
    pointer: &[String],
    value: Option<&Value>,
) -> Option<Document> {
    let current = doc.get(key)?;
    let mut json = serde_json::to_value(current).ok()?;

    match value {
        Some(value) => set_pointer(&mut json, pointer, value.clone())?,
        None => remove_pointer(&mut json, pointer)?,
    }

    let edited: Element = serde_json::from_value(json).ok()?;
    if edited.key != key || edited == *current {
        return None;
    }

    let mut next = doc.clone();
    next.elements.insert(key.to_string(), Arc::new(edited));
    Some(next)
}

fn set_pointer(root: &mut Value, tokens: &[String], value: Value) -> Option<()> {
    let (last, parents) = tokens.split_last()?;

    let mut current = root;
    for (depth, token) in parents.iter().enumerate() {
        current = descend_or_create(current, token, &tokens[depth + 1])?;
    }
    if current.is_null() {
        *current = empty_container(last);
    }

    match current {
        Value::Object(map) => {
            map.insert(last.clone(), value);
            Some(())
        }
        Value::Array(items) => {
            let index = array_index(last, items.len())?;
            if index == items.len() {
                items.push(value);
            } else {
                items[index] = value;
            }
            Some(())
        }
        _ => None,
    }
}

fn remove_pointer(root: &mut Value, tokens: &[String]) -> Option<()> {
    let (last, parents) = tokens.split_last()?;

    let mut current = root;
    for token in parents {
        current = descend_existing(current, token)?;
    }

    match current {
        Value::Object(map) => map.remove(last).map(|_| ()),
        Value::Array(items) => {
            let index = last.parse::<usize>().ok()?;
            if index < items.len() {
                items.remove(index);
                Some(())
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Step into `token`, creating the container `next` will index into
fn descend_or_create<'a>(
    value: &'a mut Value,
    token: &str,
    next: &str,
) -> Option<&'a mut Value> {
    if value.is_null() {
        *value = empty_container(token);
    }
    match value {
        Value::Object(map) => Some(
            map.entry(token.to_string())
                .or_insert_with(|| empty_container(next)),
        ),
        Value::Array(items) => {
            let index = token.parse::<usize>().ok()?;
            items.get_mut(index)
        }
        _ => None,
    }
}

fn descend_existing<'a>(value: &'a mut Value, token: &str) -> Option<&'a mut Value> {
    match value {
        Value::Object(map) => map.get_mut(token),
        Value::Array(items) => token
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get_mut(index)),
        _ => None,
    }
}

/// `-` appends; an index may address an existing slot or one past the end
/// An array when `token` indexes one (`-` or a number), else an object
fn empty_container(token: &str) -> Value {
    if token == "-" || token.parse::<usize>().is_ok() {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

fn array_index(token: &str, len: usize) -> Option<usize> {
    if token == "-" {
        return Some(len);
    }
    token.parse::<usize>().ok().filter(|index| *index <= len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_with_button() -> Document {
        let doc = Document::new();
        let doc = apply_patch(&doc, &PatchOp::add("/root", "btn")).into_owned();
        apply_patch(
            &doc,
            &PatchOp::add(
                "/elements/btn",
                json!({ "key": "btn", "type": "Button", "props": { "label": "Go" } }),
            ),
        )
        .into_owned()
    }

    #[test]
    fn test_sets_root() {
        let doc = doc_with_button();
        assert_eq!(doc.root, "btn");
        assert_eq!(doc.get("btn").unwrap().prop_str("label"), Some("Go"));
    }

    #[test]
    fn test_root_requires_string() {
        let doc = Document::new();
        let result = apply_patch(&doc, &PatchOp::add("/root", json!({ "x": 1 })));
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_remove_root_clears_it() {
        let doc = doc_with_button();
        let next = apply_patch(&doc, &PatchOp::remove("/root"));
        assert_eq!(next.root, "");
    }

    #[test]
    fn test_add_overwrites_existing_element() {
        let doc = doc_with_button();
        let next = apply_patch(
            &doc,
            &PatchOp::add("/elements/btn", json!({ "type": "Button", "props": { "label": "Stop" } })),
        );
        assert_eq!(next.get("btn").unwrap().prop_str("label"), Some("Stop"));
        assert_eq!(next.get("btn").unwrap().key, "btn");
    }

    #[test]
    fn test_path_key_wins_over_value_key() {
        let doc = Document::new();
        let next = apply_patch(
            &doc,
            &PatchOp::replace("/elements/real", json!({ "key": "other", "type": "Text" })),
        );
        assert!(next.contains("real"));
        assert!(!next.contains("other"));
        assert_eq!(next.get("real").unwrap().key, "real");
    }

    #[test]
    fn test_remove_does_not_cascade() {
        let doc = Document::new()
            .with_root("card")
            .with_element(Element::new("card", "Card").with_children(["t"]))
            .with_element(Element::new("t", "Text"));

        let next = apply_patch(&doc, &PatchOp::remove("/elements/t"));
        assert!(!next.contains("t"));
        assert_eq!(next.get("card").unwrap().child_keys(), ["t".to_string()]);
    }

    #[test]
    fn test_invalid_element_value_is_noop() {
        let doc = Document::new();
        let result = apply_patch(&doc, &PatchOp::add("/elements/x", json!({ "props": {} })));
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_unsupported_path_is_noop() {
        let doc = doc_with_button();
        for op in [
            PatchOp::add("/state/count", 1),
            PatchOp::remove("/elements/"),
            PatchOp::replace("root", "x"),
        ] {
            assert!(matches!(apply_patch(&doc, &op), Cow::Borrowed(_)), "{:?}", op);
        }
    }

    #[test]
    fn test_field_set_and_unset_on_props() {
        let doc = doc_with_button();
        let next = apply_patch(&doc, &PatchOp::replace("/elements/btn/props/variant", "primary"));
        assert_eq!(next.get("btn").unwrap().prop_str("variant"), Some("primary"));

        let cleared = apply_patch(&next, &PatchOp::remove("/elements/btn/props/variant"));
        assert!(cleared.get("btn").unwrap().prop("variant").is_none());
    }

    #[test]
    fn test_field_set_creates_intermediate_objects() {
        let doc = doc_with_button();
        let next = apply_patch(&doc, &PatchOp::add("/elements/btn/props/style/color", "red"));
        assert_eq!(
            next.get("btn").unwrap().prop("style"),
            Some(&json!({ "color": "red" }))
        );
    }

    #[test]
    fn test_field_edits_on_children_array() {
        let doc = Document::new().with_element(Element::new("s", "Stack").with_children(["a"]));

        let appended = apply_patch(&doc, &PatchOp::add("/elements/s/children/-", "b"));
        assert_eq!(appended.get("s").unwrap().child_keys(), ["a", "b"]);

        let overwritten = apply_patch(&appended, &PatchOp::add("/elements/s/children/0", "z"));
        assert_eq!(overwritten.get("s").unwrap().child_keys(), ["z", "b"]);

        let out_of_range = apply_patch(&overwritten, &PatchOp::add("/elements/s/children/9", "q"));
        assert!(matches!(out_of_range, Cow::Borrowed(_)));

        let removed = apply_patch(&overwritten, &PatchOp::remove("/elements/s/children/0"));
        assert_eq!(removed.get("s").unwrap().child_keys(), ["b"]);
    }

    #[test]
    fn test_append_creates_missing_children_list() {
        let doc = Document::new().with_element(Element::new("s", "Stack"));

        let appended = apply_patch(&doc, &PatchOp::add("/elements/s/children/-", "a"));
        assert_eq!(appended.get("s").unwrap().child_keys(), ["a"]);

        let first = apply_patch(&doc, &PatchOp::add("/elements/s/children/0", "z"));
        assert_eq!(first.get("s").unwrap().child_keys(), ["z"]);

        let list = apply_patch(&doc, &PatchOp::add("/elements/s/props/tags/-", "new"));
        assert_eq!(list.get("s").unwrap().prop("tags"), Some(&json!(["new"])));
    }

    #[test]
    fn test_field_edit_on_missing_element_is_noop() {
        let doc = Document::new();
        let result = apply_patch(&doc, &PatchOp::add("/elements/ghost/props/label", "x"));
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_field_edit_cannot_rekey_element() {
        let doc = doc_with_button();
        let result = apply_patch(&doc, &PatchOp::replace("/elements/btn/key", "other"));
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_unchanged_write_is_borrowed() {
        let doc = doc_with_button();
        let result = apply_patch(&doc, &PatchOp::replace("/elements/btn/props/label", "Go"));
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_apply_all_replays_in_order() {
        let ops = vec![
            PatchOp::add("/elements/t", json!({ "type": "Text", "props": { "text": "a" } })),
            PatchOp::replace("/elements/t/props/text", "b"),
            PatchOp::add("/root", "t"),
        ];
        let doc = apply_all(&Document::new(), &ops);
        assert_eq!(doc.root, "t");
        assert_eq!(doc.get("t").unwrap().prop_str("text"), Some("b"));
    }

    #[test]
    fn test_op_deserializes_from_wire_format() {
        let op: PatchOp =
            serde_json::from_str(r#"{"op":"replace","path":"/root","value":"x"}"#).unwrap();
        assert_eq!(op, PatchOp::replace("/root", "x"));

        assert!(serde_json::from_str::<PatchOp>(r#"{"op":"move","path":"/root"}"#).is_err());
        assert!(serde_json::from_str::<PatchOp>(r#"{"op":"add","path":"/root"}"#).is_err());
    }
}
