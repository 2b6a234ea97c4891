//! Validators and the decision type they share.
//!
//! Two independent validators live here:
//!
//! - [`schema::SchemaValidator`] checks a planning document before it is
//!   written. It accumulates every violation so the agent can fix the whole
//!   document in one pass.
//! - [`policy::CommandPolicy`] checks a shell command before it runs. It stops
//!   at the first violated rule, since each rule is a distinct category of
//!   prohibited git usage.
//!
//! Both return a [`Verdict`]. Neither returns an error: a bad document or a
//! forbidden command is an expected outcome, and it is up to the caller to
//! turn [`Verdict::Reject`] into a blocked action.

pub mod command;
pub mod policy;
pub mod schema;

pub use command::{git_invocations, GitInvocation};
pub use policy::{default_rules, CommandPolicy, PolicyRule, RuleContext, RuleKind};
pub use schema::SchemaValidator;

/// Why an action was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    /// The planning document was not valid JSON (or not a JSON object)
    Parse,

    /// The planning document did not match the required shape
    Schema,

    /// The command violated a workflow rule
    Policy(RuleKind),
}

/// A blocked action together with everything the operator needs to fix it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: RejectionKind,

    /// One line summary of why the action was blocked
    pub headline: String,

    /// Ordered violations, one per failed field or rule
    pub violations: Vec<String>,

    /// Fixed guidance pointing at the correct way of doing things
    pub remediation: Vec<String>,
}

/// Outcome of a single validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(Rejection),
}

impl Verdict {
    /// Returns `true` if the action may proceed.
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }

    /// The rejection details, if the action was blocked.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Verdict::Accept => None,
            Verdict::Reject(rejection) => Some(rejection),
        }
    }

    /// Violations of a rejected action; empty when accepted.
    pub fn violations(&self) -> &[String] {
        self.rejection()
            .map(|rejection| rejection.violations.as_slice())
            .unwrap_or_default()
    }
}
