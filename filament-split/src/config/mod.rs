//! Configuration management for filament-split
//!
//! Settings are merged from several sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `FILAMENT_SPLIT_` prefix)
//! 2. `./filament-split.toml` in the Laravel project root
//! 3. Hardcoded defaults (fallback)
//!
//! Command-line options are applied on top of the merged result by the
//! command layer.
//!
//! # Example Configuration
//!
//! ```toml
//! # filament-split.toml
//! php_binary = "/usr/bin/php8.3"
//! resources_dir = "app/Filament/Admin/Resources"
//! resources_namespace = "App\\Filament\\Admin\\Resources"
//! field_groups = ["ProfileFields", "AddressFields"]
//! strict_extraction = true
//! ```

use crate::error::{Result, SplitError};
use crate::scaffold::TemplateHelpers;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-project configuration file
pub const CONFIG_FILE_NAME: &str = "filament-split.toml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "FILAMENT_SPLIT_";

/// Field groups used when none are configured or passed on the command line
pub const DEFAULT_FIELD_GROUPS: &[&str] = &["PersonalFields", "SalaryFields", "LeaveFields"];

/// Splitter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// PHP interpreter used to run artisan
    pub php_binary: String,

    /// Artisan script, relative to the project root
    pub artisan: String,

    /// Artisan command that scaffolds a resource
    pub generator_command: String,

    /// Directory holding Filament resources, relative to the project root
    pub resources_dir: PathBuf,

    /// PHP namespace matching `resources_dir`
    pub resources_namespace: String,

    /// Suffix the generator appends to resource class names
    pub resource_suffix: String,

    /// Extension of generated source files (without the dot)
    pub extension: String,

    /// Field groups used when `--fields` is not given
    pub field_groups: Vec<String>,

    /// Treat a missing `form`/`table` method as an error
    pub strict_extraction: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            php_binary: "php".to_string(),
            artisan: "artisan".to_string(),
            generator_command: "make:filament-resource".to_string(),
            resources_dir: PathBuf::from("app/Filament/Resources"),
            resources_namespace: "App\\Filament\\Resources".to_string(),
            resource_suffix: "Resource".to_string(),
            extension: "php".to_string(),
            field_groups: DEFAULT_FIELD_GROUPS.iter().map(ToString::to_string).collect(),
            strict_extraction: false,
        }
    }
}

impl Settings {
    /// Load settings for the project rooted at `project_root`
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be parsed, an environment
    /// override has the wrong type, or a value fails validation.
    pub fn load(project_root: &Path) -> Result<Self> {
        Self::figment(project_root)
            .extract::<Self>()
            .map_err(|e| SplitError::Config(e.to_string()))?
            .normalized()
    }

    /// Build the layered figment without extracting it
    #[must_use]
    pub fn figment(project_root: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(project_root.join(CONFIG_FILE_NAME)))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Validate values and strip cosmetic variations
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is empty or `resource_suffix`
    /// cannot be part of a class name.
    pub fn normalized(mut self) -> Result<Self> {
        self.extension = self.extension.trim().trim_start_matches('.').to_string();
        self.resources_namespace = self.resources_namespace.trim().trim_matches('\\').to_string();

        if self.php_binary.trim().is_empty() {
            return Err(SplitError::Config("php_binary must not be empty".to_string()));
        }
        if self.artisan.trim().is_empty() {
            return Err(SplitError::Config("artisan must not be empty".to_string()));
        }
        if !self.resource_suffix.is_empty()
            && !TemplateHelpers::is_identifier(&self.resource_suffix)
        {
            return Err(SplitError::Config(format!(
                "resource_suffix '{}' is not a valid class name fragment",
                self.resource_suffix
            )));
        }
        if self.generator_command.trim().is_empty() {
            return Err(SplitError::Config(
                "generator_command must not be empty".to_string(),
            ));
        }
        if self.extension.is_empty() {
            return Err(SplitError::Config("extension must not be empty".to_string()));
        }
        if self.resources_namespace.is_empty() {
            return Err(SplitError::Config(
                "resources_namespace must not be empty".to_string(),
            ));
        }
        if self.field_groups.is_empty() {
            return Err(SplitError::Config(
                "field_groups must list at least one group".to_string(),
            ));
        }

        Ok(self)
    }

    /// Absolute directory holding resources for a project
    #[must_use]
    pub fn resources_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.resources_dir)
    }
}
