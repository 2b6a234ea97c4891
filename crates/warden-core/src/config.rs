//! Configuration for the warden engine.
//!
//! Every field has a default matching the standard project layout, so a
//! configuration file only needs the values it changes:
//!
//! ```json
//! { "trunk_branch": "trunk" }
//! ```
//!
//! Lookup order: an explicit path, then `$XDG_CONFIG_HOME/warden/config.json`
//! when it exists, then the defaults.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{IoResultExt, Result, ResultExt, WardenError};

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Branch all commits must land on
    pub trunk_branch: String,

    /// File name of the planning document guarded by the schema validator
    pub plan_file_name: String,

    /// Directory holding plan state (`ACTIVE-PLAN`, `plans/`)
    pub state_dir: PathBuf,

    /// Canonical schema document named in schema diagnostics
    pub schema_doc: String,

    /// Canonical template document named in schema diagnostics
    pub template_doc: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trunk_branch: "main".to_string(),
            plan_file_name: "PROJECT-PLAN.json".to_string(),
            state_dir: PathBuf::from(".claude"),
            schema_doc: ".claude/PLAN-SCHEMA.json".to_string(),
            template_doc: ".claude/PROJECT-PLAN-TEMPLATE.json".to_string(),
        }
    }
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicit `path` must exist. Without one, the XDG config file is
    /// used when present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) => Self::from_file(&path),
                None => {
                    debug!("No configuration file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Read and validate a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let raw = std::fs::read_to_string(path).fs_context(path)?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(format!("invalid configuration file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Existing XDG configuration file, if any.
    fn default_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("warden").find_config_file("config.json")
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.trunk_branch.trim().is_empty() {
            return Err(WardenError::invalid_input("trunk_branch").with_reason("must not be empty"));
        }
        if self.plan_file_name.trim().is_empty() {
            return Err(
                WardenError::invalid_input("plan_file_name").with_reason("must not be empty")
            );
        }
        Ok(())
    }
}
