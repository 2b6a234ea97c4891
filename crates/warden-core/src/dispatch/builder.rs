//! Builder for creating and configuring Warden instances.

use super::Warden;
use crate::{
    branch::{BranchResolver, GitBranchResolver},
    config::Config,
    error::Result,
};

/// Builder for creating and configuring Warden instances.
#[derive(Default)]
pub struct WardenBuilder {
    config: Option<Config>,
    trunk_branch: Option<String>,
    resolver: Option<Box<dyn BranchResolver>>,
}

impl WardenBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `config` instead of [`Config::default`].
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the configured trunk branch.
    pub fn with_trunk_branch<S: Into<String>>(mut self, trunk: Option<S>) -> Self {
        if let Some(trunk) = trunk {
            self.trunk_branch = Some(trunk.into());
        }
        self
    }

    /// Sets how the current branch is resolved.
    ///
    /// If not specified, git is asked in the current working directory.
    pub fn with_branch_resolver(mut self, resolver: impl BranchResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Builds the configured warden instance.
    ///
    /// # Errors
    ///
    /// Returns `WardenError::InvalidInput` if the resulting configuration is
    /// unusable (for example an empty trunk branch).
    pub fn build(self) -> Result<Warden> {
        let mut config = self.config.unwrap_or_default();
        if let Some(trunk) = self.trunk_branch {
            config.trunk_branch = trunk;
        }
        config.validate()?;

        let resolver: Box<dyn BranchResolver> = match self.resolver {
            Some(resolver) => resolver,
            None => Box::new(GitBranchResolver::new()),
        };
        Ok(Warden::new(config, resolver))
    }
}
