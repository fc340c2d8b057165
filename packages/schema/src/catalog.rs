//! # Schema Catalog
//!
//! Declarative description of the component vocabulary: which props each
//! type accepts, which are required, and which values an enum prop may take.
//!
//! The catalog is supplied from outside (JSON) and is read-only at use
//! time. Share it through `Arc` between validators and graders.

use crate::error::SchemaError;
use genui_common::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

const STANDARD_CATALOG: &str = include_str!("../catalog/standard.json");

/// Constraint on one prop value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PropSchema {
    String,
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Boolean,
    Enum {
        values: Vec<String>,
    },
    Array {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        items: Option<Box<PropSchema>>,
    },
    Object {
        #[serde(default)]
        fields: BTreeMap<String, PropSchema>,
        #[serde(default)]
        required: Vec<String>,
    },
    Any,
}

impl PropSchema {
    /// Short human-readable name used in issue messages
    pub fn describe(&self) -> String {
        match self {
            PropSchema::String => "string".to_string(),
            PropSchema::Number { .. } => "number".to_string(),
            PropSchema::Boolean => "boolean".to_string(),
            PropSchema::Enum { values } => values
                .iter()
                .map(|v| format!("'{}'", v))
                .collect::<Vec<_>>()
                .join(" | "),
            PropSchema::Array { .. } => "array".to_string(),
            PropSchema::Object { .. } => "object".to_string(),
            PropSchema::Any => "any".to_string(),
        }
    }
}

/// Schema of one component type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSchema {
    #[serde(default)]
    pub required: Vec<String>,

    #[serde(default)]
    pub props: BTreeMap<String, PropSchema>,

    /// Named schemas for compound parts (e.g. a card's header)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sub_schemas: BTreeMap<String, ComponentSchema>,
}

/// A compound type validated against a parent type's sub-schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubComponentRef {
    pub parent: String,
    pub schema: String,
}

/// How a type name was matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Direct,
    Alias,
    SubComponent,
}

/// A type name resolved to the schema that validates it
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSchema<'a> {
    /// Canonical component name (the parent type for sub-components)
    pub type_name: &'a str,
    pub schema: &'a ComponentSchema,
    pub resolution: Resolution,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub components: BTreeMap<String, ComponentSchema>,

    /// Type synonym → canonical type
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    #[serde(default)]
    pub sub_components: BTreeMap<String, SubComponentRef>,
}

impl Catalog {
    /// Parse and check a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.check()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// The built-in vocabulary, parsed once
    pub fn standard() -> Arc<Catalog> {
        standard_catalog().clone()
    }

    /// Type families of the built-in catalog
    pub fn standard_vocabulary() -> Vocabulary<'static> {
        standard_catalog().vocabulary()
    }

    /// Every alias and sub-component must land on a declared schema
    pub fn check(&self) -> Result<(), SchemaError> {
        for (alias, target) in &self.aliases {
            if !self.components.contains_key(target) && !self.sub_components.contains_key(target)
            {
                return Err(SchemaError::UnknownAliasTarget {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
        }

        for (name, sub) in &self.sub_components {
            let found = self
                .components
                .get(&sub.parent)
                .is_some_and(|parent| parent.sub_schemas.contains_key(&sub.schema));
            if !found {
                return Err(SchemaError::UnknownSubSchema {
                    name: name.clone(),
                    parent: sub.parent.clone(),
                    schema: sub.schema.clone(),
                });
            }
        }

        Ok(())
    }

    /// Map a type through the component table, then aliases, then sub-components
    pub fn resolve(&self, element_type: &str) -> Option<ResolvedSchema<'_>> {
        if let Some((name, schema)) = self.components.get_key_value(element_type) {
            return Some(ResolvedSchema {
                type_name: name,
                schema,
                resolution: Resolution::Direct,
            });
        }

        if let Some(target) = self.aliases.get(element_type) {
            return self
                .resolve_canonical(target)
                .map(|resolved| ResolvedSchema {
                    resolution: Resolution::Alias,
                    ..resolved
                });
        }

        self.resolve_sub_component(element_type)
    }

    /// True when the type is part of the vocabulary
    pub fn is_known_type(&self, element_type: &str) -> bool {
        self.resolve(element_type).is_some()
    }

    /// Type families matched through this catalog's aliases
    pub fn vocabulary(&self) -> Vocabulary<'_> {
        Vocabulary::new(&self.aliases)
    }

    /// Number of distinct type names the catalog accepts
    pub fn type_count(&self) -> usize {
        self.components.len() + self.aliases.len() + self.sub_components.len()
    }

    fn resolve_canonical(&self, name: &str) -> Option<ResolvedSchema<'_>> {
        match self.components.get_key_value(name) {
            Some((name, schema)) => Some(ResolvedSchema {
                type_name: name,
                schema,
                resolution: Resolution::Direct,
            }),
            None => self.resolve_sub_component(name),
        }
    }

    fn resolve_sub_component(&self, name: &str) -> Option<ResolvedSchema<'_>> {
        let sub = self.sub_components.get(name)?;
        let (parent_name, parent) = self.components.get_key_value(&sub.parent)?;
        let schema = parent.sub_schemas.get(&sub.schema)?;
        Some(ResolvedSchema {
            type_name: parent_name,
            schema,
            resolution: Resolution::SubComponent,
        })
    }
}

fn standard_catalog() -> &'static Arc<Catalog> {
    static STANDARD: OnceLock<Arc<Catalog>> = OnceLock::new();
    STANDARD.get_or_init(|| {
        Arc::new(Catalog::from_json(STANDARD_CATALOG).expect("embedded standard catalog is valid"))
    })
}
