use crate::draft::{matching_keys, Draft};
use genui_document::Document;
use serde_json::Value;
use std::borrow::Cow;

/// Move `props.children` string arrays into the element's `children`.
///
/// Existing children keep their order; new keys are appended once.
/// Arrays holding anything but strings are left alone.
pub fn migrate_props_children(doc: &Document) -> Cow<'_, Document> {
    let mut draft = Draft::new(doc);

    let candidates = matching_keys(doc, |element| {
        element
            .prop("children")
            .and_then(Value::as_array)
            .is_some_and(|entries| entries.iter().all(Value::is_string))
    });

    for key in candidates {
        draft.update(&key, |element| {
            let Some(Value::Array(entries)) = element.props.remove("children") else {
                return;
            };
            let mut children = element.children.take().unwrap_or_default();
            for entry in entries.iter().filter_map(Value::as_str) {
                if !children.iter().any(|child| child == entry) {
                    children.push(entry.to_string());
                }
            }
            if !children.is_empty() {
                element.children = Some(children);
            }
        });
    }

    draft.finish()
}
