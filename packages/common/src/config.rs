use crate::error::GenuiError;
use crate::result::GenuiResult;
use crate::visitor::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "genui.config.json";

/// Grids with fewer children than this may stay single-column
pub const DEFAULT_MIN_GRID_CHILDREN: usize = 3;

/// genui configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Schema catalog JSON, relative to the config file (built-in catalog when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,

    /// Coercion table JSON, relative to the config file (built-in table when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coercions: Option<String>,

    #[serde(default)]
    pub grader: GraderConfig,

    /// Run the normalization pipeline before grading
    #[serde(default)]
    pub normalize: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraderConfig {
    #[serde(default = "default_depth_limit")]
    pub depth_limit: usize,

    #[serde(default = "default_min_grid_children")]
    pub min_grid_children: usize,

    #[serde(default)]
    pub composition: CompositionConfig,
}

/// Switches for the composition rules, each gated independently
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionConfig {
    #[serde(default = "default_true")]
    pub visual_hierarchy: bool,

    #[serde(default = "default_true")]
    pub responsive_layout: bool,

    #[serde(default = "default_true")]
    pub surface_hierarchy: bool,
}

fn default_true() -> bool {
    true
}

fn default_depth_limit() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_min_grid_children() -> usize {
    DEFAULT_MIN_GRID_CHILDREN
}

impl Config {
    /// Load config from a directory, falling back to defaults when no file exists
    pub fn load(dir: &Path) -> GenuiResult<Self> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_file(path: &Path) -> GenuiResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GenuiResult<()> {
        if self.grader.depth_limit == 0 {
            return Err(GenuiError::Config(
                "grader.depthLimit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Absolute path of the configured catalog, if any
    pub fn catalog_path(&self, dir: &Path) -> Option<PathBuf> {
        self.catalog.as_ref().map(|p| dir.join(p))
    }

    pub fn coercions_path(&self, dir: &Path) -> Option<PathBuf> {
        self.coercions.as_ref().map(|p| dir.join(p))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: None,
            coercions: None,
            grader: GraderConfig::default(),
            normalize: false,
        }
    }
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            depth_limit: DEFAULT_MAX_DEPTH,
            min_grid_children: DEFAULT_MIN_GRID_CHILDREN,
            composition: CompositionConfig::default(),
        }
    }
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            visual_hierarchy: true,
            responsive_layout: true,
            surface_hierarchy: true,
        }
    }
}
