mod grader;
mod report;
mod rules;
mod violation;

pub use grader::{
    grade_composition, grade_tree, grade_with, CompositionOptions, GradeContext, GradeOptions,
};
pub use report::{GradeReport, RuleResult};
pub use rules::{GradeRule, RuleRegistry};
pub use violation::{Violation, ViolationLevel};
