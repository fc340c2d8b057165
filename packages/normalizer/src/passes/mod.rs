mod cards;
mod children;
mod forms;
mod layout;

pub use cards::{lift_nested_card, wrap_card_children};
pub use children::migrate_props_children;
pub use forms::{align_form_submit, convert_empty_select, drop_duplicate_label};
pub use layout::{center_stepper, collapse_checklist_grid, unify_row_layouts};

use genui_common::Vocabulary;
use genui_document::Document;
use std::borrow::Cow;

/// A pure tree-to-tree rewrite.
///
/// Implementations are idempotent and return `Cow::Borrowed` when the tree
/// is already in normal form. Type families are matched through `vocabulary`.
pub trait NormalizePass: std::fmt::Debug {
    /// Unique identifier for this pass
    fn name(&self) -> &'static str;

    fn apply<'a>(&self, doc: &'a Document, vocabulary: Vocabulary<'_>) -> Cow<'a, Document>;
}

macro_rules! normalize_pass {
    (@struct $(#[$meta:meta])* $ty:ident => $func:ident, |$doc:ident, $vocabulary:ident| $call:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $ty;

        impl NormalizePass for $ty {
            fn name(&self) -> &'static str {
                stringify!($func)
            }

            fn apply<'a>(&self, $doc: &'a Document, $vocabulary: Vocabulary<'_>) -> Cow<'a, Document> {
                $call
            }
        }
    };
    ($(#[$meta:meta])* $ty:ident => $func:ident) => {
        normalize_pass!(@struct $(#[$meta])* $ty => $func, |doc, vocabulary| $func(doc, vocabulary));
    };
    ($(#[$meta:meta])* $ty:ident => $func:ident (tree only)) => {
        normalize_pass!(@struct $(#[$meta])* $ty => $func, |doc, _vocabulary| $func(doc));
    };
}

normalize_pass!(
    /// See [`migrate_props_children`]
    MigratePropsChildren => migrate_props_children (tree only)
);
normalize_pass!(
    /// See [`lift_nested_card`]
    LiftNestedCard => lift_nested_card
);
normalize_pass!(
    /// See [`wrap_card_children`]
    WrapCardChildren => wrap_card_children
);
normalize_pass!(
    /// See [`unify_row_layouts`]
    UnifyRowLayouts => unify_row_layouts
);
normalize_pass!(
    /// See [`convert_empty_select`]
    ConvertEmptySelect => convert_empty_select
);
normalize_pass!(
    /// See [`collapse_checklist_grid`]
    CollapseChecklistGrid => collapse_checklist_grid
);
normalize_pass!(
    /// See [`drop_duplicate_label`]
    DropDuplicateLabel => drop_duplicate_label
);
normalize_pass!(
    /// See [`center_stepper`]
    CenterStepper => center_stepper
);
normalize_pass!(
    /// See [`align_form_submit`]
    AlignFormSubmit => align_form_submit
);
