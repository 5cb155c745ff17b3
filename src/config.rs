//! Configuration for building linked trees
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Settings file handed to [`Settings::load`] (TOML)
//!
//! No environment variables are consulted; the embedding application decides
//! where settings come from.

use std::fmt::Display;
use std::path::Path;

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::fields::DEFAULT_NAME_FIELD;
use crate::domain::{TaxonAggregation, TreeBuilder, DEFAULT_MAX_DEPTH};

/// Settings for parsing publishing service payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Record field used as the node's display name (default: "title")
    pub name_field: String,
    /// Maximum number of levels in one chain before parsing gives up
    pub max_depth: usize,
    /// Whether `taxons_with_ancestors` keeps repeated ancestors
    pub taxon_aggregation: TaxonAggregation,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name_field: DEFAULT_NAME_FIELD.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            taxon_aggregation: TaxonAggregation::All,
        }
    }
}

fn config_err(e: impl Display) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Parse settings from TOML text; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ApplicationError> {
        toml::from_str(content).map_err(config_err)
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `path` - Optional TOML settings file. When given it must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ApplicationError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let defaults = Self::default();
        let config = Config::builder()
            .set_default("name_field", defaults.name_field)
            .map_err(config_err)?
            .set_default("max_depth", defaults.max_depth as i64)
            .map_err(config_err)?
            .set_default("taxon_aggregation", "all")
            .map_err(config_err)?
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()
            .map_err(|e| config_err(format!("load {}: {}", path.display(), e)))?;

        config.try_deserialize().map_err(config_err)
    }

    /// A tree builder configured from these settings.
    pub fn builder(&self) -> TreeBuilder {
        TreeBuilder::new()
            .with_name_field(self.name_field.clone())
            .with_max_depth(self.max_depth)
    }
}
