use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Interaction descriptor attached to an element. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// One addressable unit of the UI tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique id within a document
    #[serde(default)]
    pub key: String,

    /// Open-ended type tag (e.g. "Card", "Stack", "Button")
    #[serde(rename = "type")]
    pub element_type: String,

    #[serde(default)]
    pub props: Map<String, Value>,

    /// Ordered child keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,

    /// Back-reference used as a lookup aid only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

impl Element {
    pub fn new(key: impl Into<String>, element_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            element_type: element_type.into(),
            props: Map::new(),
            children: None,
            parent_key: None,
            action: None,
        }
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = Some(children.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_parent(mut self, parent_key: impl Into<String>) -> Self {
        self.parent_key = Some(parent_key.into());
        self
    }

    pub fn with_action(mut self, name: impl Into<String>) -> Self {
        self.action = Some(Action {
            name: name.into(),
            params: None,
        });
        self
    }

    /// Child keys, empty when the element declares none
    pub fn child_keys(&self) -> &[String] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    /// String value of a prop, if it is a plain string
    pub fn prop_str(&self, name: &str) -> Option<&str> {
        self.props.get(name).and_then(Value::as_str)
    }

    /// True when the prop is a non-blank string or a dynamic reference
    pub fn has_content(&self, name: &str) -> bool {
        match self.props.get(name) {
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(value) => is_dynamic_reference(value),
            None => false,
        }
    }
}

/// A value of the form `{"path": "/some/pointer"}`, resolved by the presentation layer
pub fn is_dynamic_reference(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.len() == 1 && map.get("path").is_some_and(Value::is_string),
        _ => false,
    }
}

/// Flat key → element arena plus a root key.
///
/// Elements are shared through `Arc`, so cloning a document copies the map
/// spine only. An empty `root` means no tree has been produced yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub root: String,

    #[serde(default)]
    pub elements: BTreeMap<String, Arc<Element>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// True for the session-start document
    pub fn is_empty(&self) -> bool {
        self.root.is_empty() && self.elements.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Element> {
        self.elements.get(key).map(Arc::as_ref)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.elements.contains_key(key)
    }

    pub fn root_element(&self) -> Option<&Element> {
        if self.root.is_empty() {
            None
        } else {
            self.get(&self.root)
        }
    }

    /// Children of `key` that exist in the document, in declared order
    pub fn children_of<'a>(&'a self, key: &str) -> Vec<&'a Element> {
        self.get(key)
            .map(|element| {
                element
                    .child_keys()
                    .iter()
                    .filter_map(|child| self.get(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Keys of every element whose `children` lists `key`
    pub fn parents_of(&self, key: &str) -> Vec<&str> {
        self.elements
            .values()
            .filter(|element| element.child_keys().iter().any(|child| child == key))
            .map(|element| element.key.as_str())
            .collect()
    }

    /// Insert or overwrite an element, keyed by its own `key`
    pub fn insert(&mut self, element: Element) {
        self.elements.insert(element.key.clone(), Arc::new(element));
    }

    /// Builder form of [`Document::insert`]
    pub fn with_element(mut self, element: Element) -> Self {
        self.insert(element);
        self
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    /// Mutable access to an element, cloning it first if the `Arc` is shared
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Element> {
        self.elements.get_mut(key).map(Arc::make_mut)
    }

    pub fn remove(&mut self, key: &str) -> Option<Arc<Element>> {
        self.elements.remove(key)
    }

    /// First key derived from `base` that is not taken yet (`base`, `base-2`, `base-3`, …)
    pub fn unique_key(&self, base: &str) -> String {
        if !self.contains(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}
