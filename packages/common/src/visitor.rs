use genui_document::{Document, Element};
use std::collections::{BTreeMap, HashSet};

/// Depth bound used when no other limit is configured
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Visitor over the elements reachable from a document's root
///
/// `children` lists are not trusted: they may point at keys that do not
/// exist yet (mid-stream) or form cycles. The walker reports those through
/// the callbacks below instead of failing.
pub trait Visitor: Sized {
    /// Called once per reachable element, root at depth 0
    fn visit_element(&mut self, _element: &Element, _depth: usize) {}

    /// A child key that has no element (yet)
    fn visit_missing(&mut self, _parent: &Element, _key: &str) {
        // Partial trees are expected
    }

    /// A child key already visited earlier in this walk
    fn visit_revisit(&mut self, _parent: &Element, _key: &str) {}
}

/// What a walk covered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub visited: usize,

    /// Deepest depth reached (bounded by `max_depth + 1`)
    pub max_depth_seen: usize,

    /// True when some element sat deeper than `max_depth`
    pub truncated: bool,
}

/// Depth-first, pre-order walk from the root.
///
/// Elements deeper than `max_depth` are still visited so callers can report
/// them, but their children are not followed. A key is never visited twice.
pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &Document, max_depth: usize) -> WalkSummary {
    let mut summary = WalkSummary::default();
    let Some(root) = doc.root_element() else {
        return summary;
    };

    let mut visited = HashSet::new();
    visited.insert(root.key.as_str());
    walk_element(visitor, doc, root, 0, max_depth, &mut visited, &mut summary);
    summary
}

fn walk_element<'a, V: Visitor>(
    visitor: &mut V,
    doc: &'a Document,
    element: &'a Element,
    depth: usize,
    max_depth: usize,
    visited: &mut HashSet<&'a str>,
    summary: &mut WalkSummary,
) {
    visitor.visit_element(element, depth);
    summary.visited += 1;
    summary.max_depth_seen = summary.max_depth_seen.max(depth);

    if depth > max_depth {
        summary.truncated = true;
        return;
    }

    for key in element.child_keys() {
        let Some(child) = doc.get(key) else {
            visitor.visit_missing(element, key);
            continue;
        };
        if !visited.insert(child.key.as_str()) {
            visitor.visit_revisit(element, key);
            continue;
        }
        walk_element(visitor, doc, child, depth + 1, max_depth, visited, summary);
    }
}

struct DepthCollector {
    depths: BTreeMap<String, usize>,
}

impl Visitor for DepthCollector {
    fn visit_element(&mut self, element: &Element, depth: usize) {
        self.depths.insert(element.key.clone(), depth);
    }
}

/// Depth of every element reachable from the root (within the bound)
pub fn element_depths(doc: &Document, max_depth: usize) -> BTreeMap<String, usize> {
    let mut collector = DepthCollector {
        depths: BTreeMap::new(),
    };
    walk_document(&mut collector, doc, max_depth);
    collector.depths
}

/// Keys of every element listed by some parent's `children`, with the parents listing it
pub fn parent_index(doc: &Document) -> BTreeMap<&str, Vec<&str>> {
    let mut index: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (key, element) in &doc.elements {
        let mut seen = HashSet::new();
        for child in element.child_keys() {
            if seen.insert(child.as_str()) {
                index.entry(child.as_str()).or_default().push(key.as_str());
            }
        }
    }
    index
}
