//! # genui Schema
//!
//! Component vocabulary and per-element validation.
//!
//! ```rust
//! use genui_document::Element;
//! use genui_schema::Validator;
//!
//! let validator = Validator::standard();
//! let button = Element::new("save", "Button").with_prop("variant", "success");
//! let outcome = validator.check_element(&button);
//! assert_eq!(outcome.element().prop_str("variant"), Some("primary"));
//! ```

mod catalog;
mod coercion;
mod error;
mod validator;

pub use catalog::{
    Catalog, ComponentSchema, PropSchema, Resolution, ResolvedSchema, SubComponentRef,
};
pub use coercion::CoercionTable;
pub use error::SchemaError;
pub use validator::{
    repair_element, ElementOutcome, ValidationIssue, ValidationResult, Validator,
};
