//! Known-invalid → valid value substitutions, applied before validation so
//! the intent of a near-miss value ("success" for a button variant) survives
//! instead of being stripped by repair.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

const STANDARD_COERCIONS: &str = include_str!("../catalog/coercions.json");

/// `type → prop → invalid value → replacement`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoercionTable {
    entries: BTreeMap<String, BTreeMap<String, BTreeMap<String, Value>>>,
}

impl CoercionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// The built-in table, parsed once
    pub fn standard() -> Arc<CoercionTable> {
        static STANDARD: OnceLock<Arc<CoercionTable>> = OnceLock::new();
        STANDARD
            .get_or_init(|| {
                Arc::new(
                    CoercionTable::from_json(STANDARD_COERCIONS)
                        .expect("embedded coercion table is valid"),
                )
            })
            .clone()
    }

    /// Register one substitution
    pub fn insert(
        &mut self,
        element_type: impl Into<String>,
        prop: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<Value>,
    ) {
        self.entries
            .entry(element_type.into())
            .or_default()
            .entry(prop.into())
            .or_default()
            .insert(from.into(), to.into());
    }

    /// Builder form of [`CoercionTable::insert`]
    pub fn with(
        mut self,
        element_type: impl Into<String>,
        prop: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<Value>,
    ) -> Self {
        self.insert(element_type, prop, from, to);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Props of `element_type` that have substitutions
    pub fn props_for(&self, element_type: &str) -> Option<&BTreeMap<String, BTreeMap<String, Value>>> {
        self.entries.get(element_type)
    }

    /// Replacement for a string value; exact match first, then case-insensitive
    pub fn lookup(&self, element_type: &str, prop: &str, value: &Value) -> Option<&Value> {
        let raw = value.as_str()?;
        let table = self.entries.get(element_type)?.get(prop)?;

        table.get(raw).or_else(|| {
            let folded = raw.trim().to_lowercase();
            table.get(&folded)
        })
    }
}
