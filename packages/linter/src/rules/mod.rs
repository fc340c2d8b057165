mod a11y;
mod catalog;
mod composition;
mod required;
mod structure;

pub use a11y::A11yLabelsRule;
pub use catalog::{ValidComponentTypesRule, ValidPropValuesRule};
pub use composition::{ResponsiveLayoutRule, SurfaceHierarchyRule, VisualHierarchyRule};
pub use required::RequiredPropsRule;
pub use structure::{CanonicalLayoutRule, DepthLimitRule, NoOrphanNodesRule, NoRedundantChildrenRule};

use crate::grader::{CompositionOptions, GradeContext};
use crate::violation::Violation;

/// Trait for implementing grading rules
pub trait GradeRule {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Inspect the whole tree
    fn check(&self, context: &GradeContext<'_>) -> Vec<Violation>;
}

/// Ordered set of grading rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn GradeRule>>,
}

impl RuleRegistry {
    /// The structural rules, in report order
    pub fn structural() -> Self {
        Self {
            rules: vec![
                Box::new(ValidComponentTypesRule),
                Box::new(ValidPropValuesRule),
                Box::new(RequiredPropsRule),
                Box::new(CanonicalLayoutRule),
                Box::new(NoOrphanNodesRule),
                Box::new(A11yLabelsRule),
                Box::new(DepthLimitRule),
                Box::new(NoRedundantChildrenRule),
            ],
        }
    }

    /// The enabled composition rules
    pub fn composition(options: &CompositionOptions) -> Self {
        let mut registry = Self::empty();
        if options.visual_hierarchy {
            registry.add_rule(Box::new(VisualHierarchyRule));
        }
        if options.responsive_layout {
            registry.add_rule(Box::new(ResponsiveLayoutRule));
        }
        if options.surface_hierarchy {
            registry.add_rule(Box::new(SurfaceHierarchyRule));
        }
        registry
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn GradeRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn GradeRule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::structural()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
