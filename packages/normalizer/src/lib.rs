//! # genui Normalizer
//!
//! Rewrites generated trees into the canonical shapes the renderer expects.
//!
//! Each pass is a pure function `&Document -> Cow<Document>`: it either
//! borrows its input back (already normal) or returns a rewritten copy that
//! shares every untouched element with the input. Running a pass twice is the
//! same as running it once.
//!
//! ```rust
//! use genui_document::{Document, Element};
//! use genui_normalizer::Normalizer;
//!
//! let doc = Document::new()
//!     .with_root("plan")
//!     .with_element(Element::new("plan", "Dropdown").with_prop("label", "Plan"));
//!
//! let normalized = Normalizer::new().run(&doc);
//! assert_eq!(normalized.get("plan").unwrap().element_type, "Input");
//! ```

mod draft;
mod normalizer;
mod passes;

pub use normalizer::{Normalized, Normalizer};
pub use passes::{
    align_form_submit, center_stepper, collapse_checklist_grid, convert_empty_select,
    drop_duplicate_label, lift_nested_card, migrate_props_children, unify_row_layouts,
    wrap_card_children, AlignFormSubmit, CenterStepper, CollapseChecklistGrid,
    ConvertEmptySelect, DropDuplicateLabel, LiftNestedCard, MigratePropsChildren, NormalizePass,
    UnifyRowLayouts, WrapCardChildren,
};
