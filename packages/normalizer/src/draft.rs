use genui_document::{Document, Element};
use serde_json::Value;
use std::borrow::Cow;

/// A document that is cloned on the first real edit.
///
/// Helpers only touch the copy when the value actually changes, so a pass
/// that finds nothing to do hands back the borrowed input.
pub(crate) struct Draft<'a> {
    original: &'a Document,
    edited: Option<Document>,
}

impl<'a> Draft<'a> {
    pub fn new(original: &'a Document) -> Self {
        Self {
            original,
            edited: None,
        }
    }

    /// Current state, edits included
    pub fn doc(&self) -> &Document {
        self.edited.as_ref().unwrap_or(self.original)
    }

    pub fn get(&self, key: &str) -> Option<&Element> {
        self.doc().get(key)
    }

    fn doc_mut(&mut self) -> &mut Document {
        let original = self.original;
        self.edited.get_or_insert_with(|| original.clone())
    }

    /// Edit one element in place; no-op for unknown keys
    pub fn update(&mut self, key: &str, edit: impl FnOnce(&mut Element)) {
        if !self.doc().contains(key) {
            return;
        }
        if let Some(element) = self.doc_mut().get_mut(key) {
            edit(element);
        }
    }

    pub fn insert(&mut self, element: Element) {
        self.doc_mut().insert(element);
    }

    pub fn remove(&mut self, key: &str) {
        if self.doc().contains(key) {
            self.doc_mut().remove(key);
        }
    }

    pub fn set_prop(&mut self, key: &str, name: &str, value: Value) {
        if self.get(key).and_then(|element| element.prop(name)) == Some(&value) {
            return;
        }
        self.update(key, |element| {
            element.props.insert(name.to_string(), value);
        });
    }

    pub fn set_children(&mut self, key: &str, children: Vec<String>) {
        if self.get(key).map(Element::child_keys) == Some(children.as_slice()) {
            return;
        }
        self.update(key, |element| element.children = Some(children));
    }

    pub fn set_parent(&mut self, key: &str, parent: &str) {
        if self.get(key).and_then(|element| element.parent_key.as_deref()) == Some(parent) {
            return;
        }
        self.update(key, |element| element.parent_key = Some(parent.to_string()));
    }

    /// Keys with no parent left after an edit
    pub fn is_unlisted(&self, key: &str) -> bool {
        self.doc().root != key && self.doc().parents_of(key).is_empty()
    }

    pub fn finish(self) -> Cow<'a, Document> {
        match self.edited {
            Some(doc) => Cow::Owned(doc),
            None => Cow::Borrowed(self.original),
        }
    }
}

/// Keys of the elements matching `predicate`, in key order
pub(crate) fn matching_keys(doc: &Document, predicate: impl Fn(&Element) -> bool) -> Vec<String> {
    doc.elements
        .iter()
        .filter(|(_, element)| predicate(element))
        .map(|(key, _)| key.clone())
        .collect()
}
