//! Core library for the Warden workflow guard.
//!
//! Warden sits between a coding agent and the actions it takes. Before a
//! planning document is written or a shell command runs, the action is handed
//! to warden, which answers with a [`Verdict`]: accept, or reject with the
//! violations and the remediation to show the operator.
//!
//! # Components
//!
//! - [`SchemaValidator`]: checks `PROJECT-PLAN.json` against the plan shape,
//!   reporting every violation at once
//! - [`CommandPolicy`]: checks git usage against the direct-to-trunk workflow,
//!   stopping at the first violated rule
//! - [`Warden`]: routes an intercepted [`HookPayload`] to the right validator
//! - [`SessionContext`]: read-only view of the active plan for the agent's
//!   session start
//!
//! # Quick Start
//!
//! ```rust
//! use warden_core::{FixedBranch, WardenBuilder};
//!
//! # fn example() -> warden_core::Result<()> {
//! let warden = WardenBuilder::new()
//!     .with_branch_resolver(FixedBranch::new("feature"))
//!     .build()?;
//!
//! let verdict = warden.check_command("git commit -m \"[TASK-001] Add parser\"");
//! let rejection = verdict.rejection().expect("commits off trunk are blocked");
//! assert_eq!(rejection.violations, vec!["Current branch: feature".to_string()]);
//!
//! assert!(warden.check_command("ls -la").is_accept());
//! # Ok(())
//! # }
//! ```

pub mod branch;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod display;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use branch::{BranchResolver, FixedBranch, GitBranchResolver};
pub use config::Config;
pub use context::{ActivePlan, SessionContext};
pub use dispatch::{builder::WardenBuilder, Interception, Target, Warden};
pub use display::OperationStatus;
pub use error::{Result, WardenError};
pub use models::{
    HookPayload, Phase, PlanDocument, PlanSummary, Structure, TaskRecord, ToolInput,
};
pub use validation::{
    CommandPolicy, PolicyRule, Rejection, RejectionKind, RuleContext, RuleKind, SchemaValidator,
    Verdict,
};
