//! Type families shared by the graders and the normalization passes.
//!
//! Generated trees use synonyms for the same building block (`Dropdown` for
//! `Select`, `Panel` for `Card`). A [`Vocabulary`] borrows the alias table of
//! the catalog in use and maps every type to its canonical name before
//! matching, so a custom catalog's synonyms are honored everywhere.

use genui_document::Element;
use serde_json::Value;
use std::collections::BTreeMap;

static NO_ALIASES: BTreeMap<String, String> = BTreeMap::new();

const DECREMENT_LABELS: &[&str] = &["-", "−", "–", "decrease", "decrement"];
const INCREMENT_LABELS: &[&str] = &["+", "increase", "increment"];

/// Family predicates over canonical type names
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary<'a> {
    aliases: &'a BTreeMap<String, String>,
}

impl Default for Vocabulary<'_> {
    fn default() -> Self {
        Self {
            aliases: &NO_ALIASES,
        }
    }
}

impl<'a> Vocabulary<'a> {
    /// Match through `aliases` (synonym → canonical type)
    pub fn new(aliases: &'a BTreeMap<String, String>) -> Self {
        Self { aliases }
    }

    /// Canonical name of a type; unknown names map to themselves
    pub fn canonical<'b>(&self, element_type: &'b str) -> &'b str
    where
        'a: 'b,
    {
        match self.aliases.get(element_type) {
            Some(target) => target.as_str(),
            None => element_type,
        }
    }

    fn is_one_of(&self, element: &Element, family: &[&str]) -> bool {
        family.contains(&self.canonical(&element.element_type))
    }

    pub fn is_card_like(&self, element: &Element) -> bool {
        self.is_one_of(element, &["Card"])
    }

    pub fn is_form(&self, element: &Element) -> bool {
        self.is_one_of(element, &["Form"])
    }

    pub fn is_stack(&self, element: &Element) -> bool {
        self.is_one_of(element, &["Stack"])
    }

    /// Stack laid out vertically; `direction` defaults to vertical
    pub fn is_vertical_stack(&self, element: &Element) -> bool {
        self.is_stack(element)
            && matches!(
                element.prop_str("direction"),
                None | Some("vertical") | Some("column")
            )
    }

    pub fn is_horizontal_stack(&self, element: &Element) -> bool {
        self.is_stack(element)
            && matches!(element.prop_str("direction"), Some("horizontal") | Some("row"))
    }

    pub fn is_grid(&self, element: &Element) -> bool {
        self.is_one_of(element, &["Grid"])
    }

    pub fn is_two_column_grid(&self, element: &Element) -> bool {
        self.is_grid(element) && grid_columns(element) == Some(2)
    }

    pub fn is_select_family(&self, element: &Element) -> bool {
        self.is_one_of(element, &["Select"])
    }

    /// Controls that take typed or picked input
    pub fn is_input_family(&self, element: &Element) -> bool {
        self.is_one_of(element, &["Input", "Textarea"]) || self.is_select_family(element)
    }

    pub fn is_checkable(&self, element: &Element) -> bool {
        self.is_one_of(element, &["Checkbox", "Switch"])
    }

    pub fn is_checkable_group(&self, element: &Element) -> bool {
        self.is_one_of(element, &["RadioGroup", "CheckboxGroup"])
    }

    /// Form controls that need an accessible name
    pub fn is_interactive_control(&self, element: &Element) -> bool {
        self.is_input_family(element)
            || self.is_checkable(element)
            || self.is_checkable_group(element)
            || self.is_one_of(element, &["Slider"])
    }

    pub fn is_button(&self, element: &Element) -> bool {
        self.is_one_of(element, &["Button"])
    }

    pub fn is_text(&self, element: &Element) -> bool {
        self.is_one_of(element, &["Text"])
    }

    pub fn is_heading(&self, element: &Element) -> bool {
        self.is_one_of(element, &["Heading"])
    }

    /// Nodes whose `text` prop is their content
    pub fn is_text_bearing(&self, element: &Element) -> bool {
        self.is_text(element) || self.is_heading(element)
    }

    /// Heading level 1-6. Accepts `"h1"`, `"1"` or `1`; a heading without a level is an h2
    pub fn heading_level(&self, element: &Element) -> Option<u8> {
        if !self.is_heading(element) {
            return None;
        }

        let level = match element.prop("level") {
            None | Some(Value::Null) => return Some(2),
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s
                .trim_start_matches(|c: char| c == 'h' || c == 'H')
                .parse::<u64>()
                .ok(),
            Some(_) => None,
        };

        Some(level.map(|l| l.clamp(1, 6) as u8).unwrap_or(2))
    }

    /// Button that submits its form, by `kind` or by action name
    pub fn is_submit_button(&self, element: &Element) -> bool {
        if !self.is_button(element) {
            return false;
        }
        element.prop_str("kind") == Some("submit")
            || element
                .action
                .as_ref()
                .is_some_and(|action| action.name.to_lowercase().starts_with("submit"))
    }

    fn button_label(&self, element: &Element) -> Option<String> {
        if !self.is_button(element) {
            return None;
        }
        element
            .prop_str("label")
            .or_else(|| element.prop_str("ariaLabel"))
            .map(|label| label.trim().to_lowercase())
    }

    pub fn is_decrement_button(&self, element: &Element) -> bool {
        self.button_label(element)
            .is_some_and(|label| DECREMENT_LABELS.contains(&label.as_str()))
    }

    pub fn is_increment_button(&self, element: &Element) -> bool {
        self.button_label(element)
            .is_some_and(|label| INCREMENT_LABELS.contains(&label.as_str()))
    }
}

/// Column count of a grid, when declared as a number
pub fn grid_columns(element: &Element) -> Option<u64> {
    element.prop("columns").and_then(Value::as_u64)
}
