//! Command policy: the direct-to-trunk git workflow.
//!
//! Rules are an ordered list of [`PolicyRule`]s. Each rule is tried against
//! every git invocation in the command before the next rule is tried, and the
//! first rule that matches decides the rejection. Commands without any git
//! invocation are accepted without looking at the repository.

use std::fmt;

use log::{debug, info, warn};

use super::{command::git_invocations, GitInvocation, Rejection, RejectionKind, Verdict};
use crate::branch::BranchResolver;

/// Long `git branch` options that only list branches.
const BRANCH_LISTING_OPTIONS: [&str; 5] = [
    "--show-current",
    "--list",
    "--all",
    "--remotes",
    "--verbose",
];

/// Short `git branch` flags that only list branches, alone or clustered (`-av`).
const BRANCH_LISTING_FLAGS: &str = "alrv";

/// Category of prohibited git usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Creating a branch (`checkout -b`, `switch -c`, `branch <name>`)
    BranchCreation,

    /// Merging a branch
    Merge,

    /// Committing while not on the trunk branch
    CommitOffTrunk,

    /// Force pushing
    ForcePush,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::BranchCreation => "no-branch-creation",
            RuleKind::Merge => "no-merge",
            RuleKind::CommitOffTrunk => "trunk-only-commits",
            RuleKind::ForcePush => "no-force-push",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Repository state a rule may consult.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Branch checked out when the command is evaluated
    pub branch: &'a str,

    /// Branch all commits must land on
    pub trunk: &'a str,
}

/// Predicate deciding whether one git invocation violates a rule.
pub type RulePredicate = fn(&GitInvocation, &RuleContext<'_>) -> bool;

/// A named prohibition.
#[derive(Clone, Copy)]
pub struct PolicyRule {
    pub kind: RuleKind,
    pub predicate: RulePredicate,
}

impl PolicyRule {
    pub const fn new(kind: RuleKind, predicate: RulePredicate) -> Self {
        Self { kind, predicate }
    }

    /// Returns `true` if `invocation` violates this rule.
    pub fn matches(&self, invocation: &GitInvocation, ctx: &RuleContext<'_>) -> bool {
        (self.predicate)(invocation, ctx)
    }
}

impl fmt::Debug for PolicyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyRule").field("kind", &self.kind).finish()
    }
}

/// The workflow rules in priority order.
pub fn default_rules() -> Vec<PolicyRule> {
    vec![
        PolicyRule::new(RuleKind::BranchCreation, creates_branch),
        PolicyRule::new(RuleKind::Merge, merges),
        PolicyRule::new(RuleKind::CommitOffTrunk, commits_off_trunk),
        PolicyRule::new(RuleKind::ForcePush, force_pushes),
    ]
}

fn creates_branch(invocation: &GitInvocation, _: &RuleContext<'_>) -> bool {
    match invocation.subcommand.as_str() {
        "checkout" => invocation.has_short('b') || invocation.has_short('B'),
        "switch" => {
            invocation.has_short('c')
                || invocation.has_short('C')
                || invocation.has_long("--create")
                || invocation.has_long("--force-create")
        }
        "branch" => {
            let args = || invocation.args.iter().map(String::as_str);
            !args().any(lists_by_pattern) && args().any(|arg| !is_listing_option(arg))
        }
        _ => false,
    }
}

fn is_listing_option(arg: &str) -> bool {
    BRANCH_LISTING_OPTIONS.contains(&arg)
        || arg
            .strip_prefix('-')
            .filter(|flags| !flags.is_empty() && !flags.starts_with('-'))
            .is_some_and(|flags| flags.chars().all(|c| BRANCH_LISTING_FLAGS.contains(c)))
}

/// In list mode the remaining words are patterns, not branch names.
fn lists_by_pattern(arg: &str) -> bool {
    matches!(arg, "--show-current" | "--list")
        || (is_listing_option(arg) && !arg.starts_with("--") && arg.contains('l'))
}

fn merges(invocation: &GitInvocation, _: &RuleContext<'_>) -> bool {
    invocation.is("merge")
}

fn commits_off_trunk(invocation: &GitInvocation, ctx: &RuleContext<'_>) -> bool {
    invocation.is("commit") && ctx.branch != ctx.trunk
}

fn force_pushes(invocation: &GitInvocation, _: &RuleContext<'_>) -> bool {
    invocation.is("push")
        && (invocation.has_long("--force")
            || invocation.has_long("--force-with-lease")
            || invocation.has_short('f'))
}

/// Evaluates shell commands against the workflow rules.
#[derive(Debug, Clone)]
pub struct CommandPolicy {
    trunk_branch: String,
    rules: Vec<PolicyRule>,
}

impl CommandPolicy {
    /// Policy with the default rules for the given trunk branch.
    pub fn new(trunk_branch: impl Into<String>) -> Self {
        Self::with_rules(trunk_branch, default_rules())
    }

    /// Policy with a custom ordered rule list.
    pub fn with_rules(trunk_branch: impl Into<String>, rules: Vec<PolicyRule>) -> Self {
        Self {
            trunk_branch: trunk_branch.into(),
            rules,
        }
    }

    pub fn trunk_branch(&self) -> &str {
        &self.trunk_branch
    }

    pub fn rules(&self) -> &[PolicyRule] {
        &self.rules
    }

    /// Evaluate `command`, resolving the current branch through `resolver`.
    ///
    /// The resolver is only consulted when the command contains a git
    /// invocation. If it fails the command is accepted: outside a repository
    /// there is no workflow to enforce.
    pub fn evaluate(&self, command: &str, resolver: &dyn BranchResolver) -> Verdict {
        let invocations = git_invocations(command);
        if invocations.is_empty() {
            debug!("No git invocation in command, skipping policy");
            return Verdict::Accept;
        }

        let branch = match resolver.current_branch() {
            Ok(branch) => branch,
            Err(e) => {
                warn!("Allowing command, current branch unknown: {e}");
                return Verdict::Accept;
            }
        };

        let ctx = RuleContext {
            branch: &branch,
            trunk: &self.trunk_branch,
        };

        for rule in &self.rules {
            if invocations.iter().any(|inv| rule.matches(inv, &ctx)) {
                info!("Command blocked by rule {} on branch {branch}", rule.kind);
                return Verdict::Reject(self.rejection(rule.kind, command, &branch));
            }
        }

        debug!("Command allowed on branch {branch}");
        Verdict::Accept
    }

    fn rejection(&self, kind: RuleKind, command: &str, branch: &str) -> Rejection {
        let trunk = &self.trunk_branch;
        let (headline, violation, remediation) = match kind {
            RuleKind::BranchCreation => (
                "Branch creation is NOT allowed".to_string(),
                format!(
                    "Direct {trunk} workflow: all work happens on {trunk}. Command blocked: {command}"
                ),
                vec![
                    "Correct workflow:".to_string(),
                    format!("git checkout {trunk}"),
                    format!("# work on {trunk}"),
                    "git commit -m \"[TASK-XXX] Description\"".to_string(),
                    format!("git push origin {trunk}"),
                ],
            ),
            RuleKind::Merge => (
                "Git merge is NOT allowed".to_string(),
                format!("Direct {trunk} workflow: no branching means no merging"),
                vec![
                    "Correct workflow:".to_string(),
                    format!("Work directly on {trunk}"),
                    "Commit and push regularly".to_string(),
                ],
            ),
            RuleKind::CommitOffTrunk => (
                format!("Commits only allowed on {trunk} branch"),
                format!("Current branch: {branch}"),
                vec![
                    format!("Switch to {trunk}:"),
                    format!("git checkout {trunk}"),
                ],
            ),
            RuleKind::ForcePush => (
                "Force push is NOT allowed".to_string(),
                "Never rewrite published history".to_string(),
                vec![
                    "Push without rewriting history:".to_string(),
                    format!("git push origin {trunk}"),
                ],
            ),
        };

        Rejection {
            kind: RejectionKind::Policy(kind),
            headline,
            violations: vec![violation],
            remediation,
        }
    }
}
