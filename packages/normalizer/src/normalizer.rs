use crate::passes::{
    AlignFormSubmit, CenterStepper, CollapseChecklistGrid, ConvertEmptySelect, DropDuplicateLabel,
    LiftNestedCard, MigratePropsChildren, NormalizePass, UnifyRowLayouts, WrapCardChildren,
};
use genui_document::Document;
use genui_schema::Catalog;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Result of one normalization cycle
#[derive(Debug, Clone)]
pub struct Normalized<'a> {
    pub document: Cow<'a, Document>,

    /// Passes that changed the tree, in run order
    pub changed: Vec<&'static str>,
}

impl Normalized<'_> {
    pub fn is_changed(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// Runs normalization passes in a fixed order
#[derive(Debug)]
pub struct Normalizer {
    passes: Vec<Box<dyn NormalizePass>>,

    /// Source of the type synonyms the passes match through
    catalog: Arc<Catalog>,
}

impl Normalizer {
    /// Create a normalizer with the built-in passes and catalog
    pub fn new() -> Self {
        Self::with_catalog(Catalog::standard())
    }

    /// Built-in passes, matching types through `catalog`'s aliases
    pub fn with_catalog(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            passes: vec![
                Box::new(MigratePropsChildren),
                Box::new(LiftNestedCard),
                Box::new(WrapCardChildren),
                Box::new(UnifyRowLayouts),
                Box::new(ConvertEmptySelect),
                Box::new(CollapseChecklistGrid),
                Box::new(DropDuplicateLabel),
                Box::new(CenterStepper),
                Box::new(AlignFormSubmit),
            ],
        }
    }

    pub fn empty() -> Self {
        Self {
            passes: Vec::new(),
            catalog: Catalog::standard(),
        }
    }

    pub fn add_pass(&mut self, pass: Box<dyn NormalizePass>) {
        self.passes.push(pass);
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// One cycle over every pass; borrowed when nothing changed
    pub fn run<'a>(&self, doc: &'a Document) -> Cow<'a, Document> {
        self.run_traced(doc).document
    }

    /// Like [`Normalizer::run`], also reporting which passes changed the tree
    #[instrument(level = "debug", skip_all, fields(elements = doc.elements.len()))]
    pub fn run_traced<'a>(&self, doc: &'a Document) -> Normalized<'a> {
        let vocabulary = self.catalog.vocabulary();
        let mut current = Cow::Borrowed(doc);
        let mut changed = Vec::new();

        for pass in &self.passes {
            let rewritten = match pass.apply(&current, vocabulary) {
                Cow::Owned(next) => Some(next),
                Cow::Borrowed(_) => None,
            };
            if let Some(next) = rewritten {
                debug!(pass = pass.name(), "Pass rewrote the tree");
                changed.push(pass.name());
                current = Cow::Owned(next);
            }
        }

        if changed.is_empty() {
            debug!("Tree already normalized");
        } else {
            info!(passes = ?changed, elements = current.elements.len(), "Normalized tree");
        }

        Normalized {
            document: current,
            changed,
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
