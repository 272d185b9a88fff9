//! Tool configuration file
//!
//! Optional `migration-json.toml`:
//!
//! ```toml
//! [generator]
//! program = "php"
//! args = ["artisan"]
//! working_dir = "/srv/app"     # optional
//!
//! [watch]
//! directories = ["app", "database/migrations"]
//!
//! [schema]
//! extra_column_types = ["citext"]
//! extra_modifiers = []
//! ```
//!
//! Every key is optional. Relative watch directories are resolved against
//! `generator.working_dir` when it is set.

use migjson_core::{Catalog, EngineError, EngineResult};
use migjson_generator::{ArtisanGenerator, DEFAULT_WATCH_DIRS};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "migration-json.toml";

/// `[generator]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSection {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            program: "php".to_string(),
            args: vec!["artisan".to_string()],
            working_dir: None,
        }
    }
}

/// `[watch]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchSection {
    pub directories: Vec<PathBuf>,
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            directories: DEFAULT_WATCH_DIRS.iter().map(PathBuf::from).collect(),
        }
    }
}

/// `[schema]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaSection {
    pub extra_column_types: Vec<String>,
    pub extra_modifiers: Vec<String>,
}

/// Parsed tool configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub generator: GeneratorSection,
    pub watch: WatchSection,
    pub schema: SchemaSection,
}

impl ToolConfig {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read when present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> EngineResult<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let raw = std::fs::read_to_string(&path).map_err(|e| EngineError::ConfigRead {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!("Loaded config from {}", path.display());
        Self::from_toml(&raw)
    }

    /// Parse and check a TOML document
    pub fn from_toml(raw: &str) -> EngineResult<Self> {
        let config: ToolConfig =
            toml::from_str(raw).map_err(|e| EngineError::invalid_config(e.to_string()))?;

        if config.generator.program.trim().is_empty() {
            return Err(EngineError::invalid_config(
                "generator.program must not be empty",
            ));
        }

        Ok(config)
    }

    /// The process-backed generator described by `[generator]`
    pub fn generator(&self) -> ArtisanGenerator {
        let generator = ArtisanGenerator::new(&self.generator.program, self.generator.args.clone());
        match &self.generator.working_dir {
            Some(dir) => generator.with_working_dir(dir),
            None => generator,
        }
    }

    /// Watched directories, resolved against the generator's working directory
    pub fn watch_dirs(&self) -> Vec<PathBuf> {
        self.watch
            .directories
            .iter()
            .map(|dir| match &self.generator.working_dir {
                Some(base) if dir.is_relative() => base.join(dir),
                _ => dir.clone(),
            })
            .collect()
    }

    /// Built-in catalog plus `[schema]` extras
    pub fn catalog(&self) -> Catalog {
        Catalog::builtin()
            .with_extra_column_types(self.schema.extra_column_types.iter().cloned())
            .with_extra_modifiers(self.schema.extra_modifiers.iter().cloned())
    }
}

// ============================================================================
// Tests
// ============================================================================
