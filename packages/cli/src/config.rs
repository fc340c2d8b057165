use anyhow::{Context, Result};
use genui_common::Config;
use genui_linter::GradeOptions;
use genui_normalizer::Normalizer;
use genui_schema::{Catalog, CoercionTable, Validator};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Loaded `genui.config.json` plus the directory it was read from
#[derive(Debug, Clone)]
pub struct Project {
    pub dir: PathBuf,
    pub config: Config,
}

impl Project {
    /// Load config from a directory, defaults when no file exists
    pub fn load(dir: &Path) -> Result<Self> {
        let config = Config::load(dir)
            .with_context(|| format!("Failed to load config from {}", dir.display()))?;
        debug!(dir = %dir.display(), ?config, "Loaded project config");

        Ok(Self {
            dir: dir.to_path_buf(),
            config,
        })
    }

    /// The configured catalog, or the built-in one
    pub fn catalog(&self) -> Result<Arc<Catalog>> {
        match self.config.catalog_path(&self.dir) {
            Some(path) => Ok(Arc::new(
                Catalog::load(&path)
                    .with_context(|| format!("Failed to load catalog {}", path.display()))?,
            )),
            None => Ok(Catalog::standard()),
        }
    }

    /// Validator over the configured catalog and coercion table
    pub fn validator(&self) -> Result<Validator> {
        let catalog = self.catalog()?;

        let coercions = match self.config.coercions_path(&self.dir) {
            Some(path) => Arc::new(
                CoercionTable::load(&path)
                    .with_context(|| format!("Failed to load coercions {}", path.display()))?,
            ),
            None => CoercionTable::standard(),
        };

        Ok(Validator::new(catalog, coercions))
    }

    /// Built-in passes over the configured catalog
    pub fn normalizer(&self) -> Result<Normalizer> {
        Ok(Normalizer::with_catalog(self.catalog()?))
    }

    pub fn grade_options(&self) -> Result<GradeOptions> {
        Ok(GradeOptions::from_config(
            &self.config.grader,
            self.validator()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn project_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("genui-cli-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_defaults_without_config_file() {
        let dir = project_dir("defaults");
        let project = Project::load(&dir).unwrap();
        let options = project.grade_options().unwrap();

        assert_eq!(options.depth_limit, 8);
        assert!(options.validator.catalog().is_known_type("Card"));
    }

    #[test]
    fn test_custom_catalog_relative_to_config() {
        let dir = project_dir("custom");
        fs::write(
            dir.join("catalog.json"),
            r#"{ "components": { "Tile": { "props": {} } } }"#,
        )
        .unwrap();
        fs::write(
            dir.join("genui.config.json"),
            r#"{ "catalog": "catalog.json", "grader": { "depthLimit": 4 } }"#,
        )
        .unwrap();

        let project = Project::load(&dir).unwrap();
        let options = project.grade_options().unwrap();
        assert_eq!(options.depth_limit, 4);
        assert!(options.validator.catalog().is_known_type("Tile"));
        assert!(!options.validator.catalog().is_known_type("Card"));
    }

    #[test]
    fn test_normalizer_uses_project_aliases() {
        let dir = project_dir("aliases");
        fs::write(
            dir.join("catalog.json"),
            r#"{ "components": { "Select": { "props": {} } }, "aliases": { "Picker": "Select" } }"#,
        )
        .unwrap();
        fs::write(dir.join("genui.config.json"), r#"{ "catalog": "catalog.json" }"#).unwrap();

        let doc = genui_document::Document::new().with_root("p").with_element(
            genui_document::Element::new("p", "Picker").with_prop("label", "Size"),
        );

        let project = Project::load(&dir).unwrap();
        let normalized = project.normalizer().unwrap().run(&doc);
        assert_eq!(normalized.get("p").unwrap().element_type, "Input");
    }

    #[test]
    fn test_missing_catalog_is_an_error() {
        let dir = project_dir("missing");
        fs::write(dir.join("genui.config.json"), r#"{ "catalog": "nope.json" }"#).unwrap();

        let project = Project::load(&dir).unwrap();
        let err = project.validator().unwrap_err();
        assert!(err.to_string().starts_with("Failed to load catalog"));
    }
}
