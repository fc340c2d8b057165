use crate::report::{GradeReport, RuleResult};
use crate::rules::RuleRegistry;
use genui_common::vocabulary::Vocabulary;
use genui_common::{CompositionConfig, GraderConfig, DEFAULT_MAX_DEPTH, DEFAULT_MIN_GRID_CHILDREN};
use genui_document::{Document, Element};
use genui_schema::Validator;
use tracing::{debug, info, instrument};

/// Which composition rules run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionOptions {
    pub visual_hierarchy: bool,
    pub responsive_layout: bool,
    pub surface_hierarchy: bool,
}

impl Default for CompositionOptions {
    fn default() -> Self {
        Self {
            visual_hierarchy: true,
            responsive_layout: true,
            surface_hierarchy: true,
        }
    }
}

impl From<&CompositionConfig> for CompositionOptions {
    fn from(config: &CompositionConfig) -> Self {
        Self {
            visual_hierarchy: config.visual_hierarchy,
            responsive_layout: config.responsive_layout,
            surface_hierarchy: config.surface_hierarchy,
        }
    }
}

/// Options for configuring the graders
#[derive(Debug, Clone)]
pub struct GradeOptions {
    pub validator: Validator,

    /// Deepest allowed depth, root at 0
    pub depth_limit: usize,

    /// Grids with fewer children may omit `columns`
    pub min_grid_children: usize,

    pub composition: CompositionOptions,
}

impl GradeOptions {
    pub fn from_config(config: &GraderConfig, validator: Validator) -> Self {
        Self {
            validator,
            depth_limit: config.depth_limit,
            min_grid_children: config.min_grid_children,
            composition: CompositionOptions::from(&config.composition),
        }
    }
}

impl Default for GradeOptions {
    fn default() -> Self {
        Self {
            validator: Validator::standard(),
            depth_limit: DEFAULT_MAX_DEPTH,
            min_grid_children: DEFAULT_MIN_GRID_CHILDREN,
            composition: CompositionOptions::default(),
        }
    }
}

/// What a rule sees
pub struct GradeContext<'a> {
    pub doc: &'a Document,
    pub options: &'a GradeOptions,
}

impl<'a> GradeContext<'a> {
    /// Every element in key order, reachable or not
    pub fn elements(&self) -> impl Iterator<Item = &'a Element> {
        self.doc.elements.values().map(|element| &**element)
    }

    /// Type families, through the aliases of the grading catalog
    pub fn vocabulary(&self) -> Vocabulary<'a> {
        self.options.validator.catalog().vocabulary()
    }
}

/// Run the structural rules
pub fn grade_tree(doc: &Document, options: &GradeOptions) -> GradeReport {
    grade_with(doc, options, &RuleRegistry::structural())
}

/// Run the enabled composition rules
pub fn grade_composition(doc: &Document, options: &GradeOptions) -> GradeReport {
    grade_with(doc, options, &RuleRegistry::composition(&options.composition))
}

/// Run every rule of `registry`, in order.
///
/// A tree without a root passes every rule.
#[instrument(level = "debug", skip_all, fields(root = %doc.root, elements = doc.elements.len()))]
pub fn grade_with(doc: &Document, options: &GradeOptions, registry: &RuleRegistry) -> GradeReport {
    let context = GradeContext { doc, options };

    let results: Vec<RuleResult> = registry
        .rules()
        .iter()
        .map(|rule| {
            let violations = if doc.root.is_empty() {
                Vec::new()
            } else {
                rule.check(&context)
            };
            if !violations.is_empty() {
                debug!(rule = rule.name(), violations = violations.len(), "Rule reported findings");
            }
            RuleResult::new(rule.name(), violations)
        })
        .collect();

    let report = GradeReport::from_results(results);
    info!(
        rules = report.results.len(),
        failed = report.failed_rules().len(),
        all_pass = report.all_pass,
        "Graded tree"
    );
    report
}
