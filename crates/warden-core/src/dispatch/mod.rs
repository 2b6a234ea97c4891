//! Interception dispatcher.
//!
//! [`Warden`] is the entry point the hook, the CLI and the MCP server share.
//! It routes an intercepted action to the right validator:
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   HookPayload   │    │      Warden      │    │ SchemaValidator │
//! │ (Write / Bash)  │───▶│    intercept()   │───▶│  CommandPolicy  │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use warden_core::{FixedBranch, HookPayload, Target, WardenBuilder};
//!
//! # fn example() -> warden_core::Result<()> {
//! let warden = WardenBuilder::new()
//!     .with_branch_resolver(FixedBranch::new("main"))
//!     .build()?;
//!
//! let outcome = warden.intercept(&HookPayload::bash("git merge dev"));
//! assert_eq!(outcome.target, Target::Command);
//! assert!(!outcome.verdict.is_accept());
//! # Ok(())
//! # }
//! ```

use log::debug;

use crate::{
    branch::BranchResolver,
    config::Config,
    context::SessionContext,
    error::Result,
    models::HookPayload,
    validation::{CommandPolicy, SchemaValidator, Verdict},
};

pub mod builder;

#[cfg(test)]
mod tests;

/// Which validator handled an intercepted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A write of the planning document
    PlanDocument,

    /// A shell command
    Command,

    /// Nothing warden governs
    Ignored,
}

/// Result of intercepting one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interception {
    pub target: Target,
    pub verdict: Verdict,
}

impl Interception {
    fn ignored() -> Self {
        Self {
            target: Target::Ignored,
            verdict: Verdict::Accept,
        }
    }
}

/// Validators plus the configuration and branch resolver they run with.
pub struct Warden {
    config: Config,
    schema: SchemaValidator,
    policy: CommandPolicy,
    resolver: Box<dyn BranchResolver>,
}

impl Warden {
    pub(crate) fn new(config: Config, resolver: Box<dyn BranchResolver>) -> Self {
        Self {
            schema: SchemaValidator::new(&config),
            policy: CommandPolicy::new(config.trunk_branch.clone()),
            config,
            resolver,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn policy(&self) -> &CommandPolicy {
        &self.policy
    }

    /// Route an intercepted action to the validator that governs it.
    ///
    /// A write of the planning document goes to the schema validator (a
    /// write without content is validated as empty text). Anything carrying
    /// a command goes to the command policy. Everything else is ignored.
    pub fn intercept(&self, payload: &HookPayload) -> Interception {
        if payload.is_write_of(&self.config.plan_file_name) {
            debug!("Intercepted write of {}", self.config.plan_file_name);
            let content = payload.tool_input.content.as_deref().unwrap_or_default();
            return Interception {
                target: Target::PlanDocument,
                verdict: self.validate_plan(content),
            };
        }

        if let Some(command) = payload.command() {
            debug!("Intercepted command: {command}");
            return Interception {
                target: Target::Command,
                verdict: self.check_command(command),
            };
        }

        debug!("Nothing to govern in {:?} call", payload.tool);
        Interception::ignored()
    }

    /// Validate the raw text of a planning document.
    pub fn validate_plan(&self, raw: &str) -> Verdict {
        self.schema.validate(raw)
    }

    /// Check a command against the policy using the configured resolver.
    pub fn check_command(&self, command: &str) -> Verdict {
        self.policy.evaluate(command, self.resolver.as_ref())
    }

    /// Check a command against the policy using another resolver.
    pub fn check_command_with(&self, command: &str, resolver: &dyn BranchResolver) -> Verdict {
        self.policy.evaluate(command, resolver)
    }

    /// Read the session context from the configured state directory.
    pub fn session_context(&self) -> Result<SessionContext> {
        SessionContext::load(&self.config.state_dir, self.config.trunk_branch.clone())
    }
}
