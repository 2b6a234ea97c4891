//! Display implementations for verdicts, session context and status lines.
//!
//! Presentation lives here rather than on the validators, so the hook, the CLI
//! subcommands and the MCP server print the same text:
//!
//! - [`Rejection`](crate::validation::Rejection) renders the blocked-action
//!   report written to stderr (and returned verbatim over MCP)
//! - [`SessionContext`](crate::context::SessionContext) renders markdown for
//!   the terminal renderer
//! - [`OperationStatus`] renders one-line confirmations
//!
//! ```rust
//! use warden_core::{Config, SchemaValidator};
//!
//! let verdict = SchemaValidator::new(&Config::default()).validate("{}");
//! let report = verdict.rejection().unwrap().to_string();
//! assert!(report.starts_with("❌ BLOCKED: PROJECT-PLAN.json does NOT follow template"));
//! assert!(report.contains("• Missing required field: planId"));
//! ```

mod context;
mod status;
mod verdict;

pub use status::OperationStatus;
