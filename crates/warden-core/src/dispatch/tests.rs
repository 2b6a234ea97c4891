use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::{
    branch::FixedBranch,
    dispatch::builder::WardenBuilder,
    error::WardenError,
    validation::{RejectionKind, RuleKind},
};

fn warden_on(branch: &str) -> Warden {
    WardenBuilder::new()
        .with_branch_resolver(FixedBranch::new(branch))
        .build()
        .unwrap()
}

fn valid_plan() -> String {
    json!({
        "planId": "PLAN-001",
        "projectName": "Demo",
        "description": "Demo project",
        "structure": "flat",
        "tasks": [{
            "id": "TASK-001",
            "title": "x",
            "description": "y",
            "phase": "design",
            "dependencies": [],
            "estimatedHours": 0
        }]
    })
    .to_string()
}

#[test]
fn test_plan_write_goes_to_schema_validator() {
    let warden = warden_on("main");
    let outcome = warden.intercept(&HookPayload::write(".claude/PROJECT-PLAN.json", valid_plan()));

    assert_eq!(outcome.target, Target::PlanDocument);
    assert!(outcome.verdict.is_accept());
}

#[test]
fn test_plan_write_without_content_is_a_parse_failure() {
    let warden = warden_on("main");
    let mut payload = HookPayload::write("PROJECT-PLAN.json", "");
    payload.tool_input.content = None;

    let outcome = warden.intercept(&payload);
    assert_eq!(outcome.target, Target::PlanDocument);
    assert_eq!(
        outcome.verdict.rejection().map(|r| r.kind),
        Some(RejectionKind::Parse)
    );
}

#[test]
fn test_other_writes_are_ignored() {
    let warden = warden_on("main");
    let outcome = warden.intercept(&HookPayload::write("src/main.rs", "not json"));

    assert_eq!(outcome.target, Target::Ignored);
    assert!(outcome.verdict.is_accept());
}

#[test]
fn test_command_goes_to_policy() {
    let warden = warden_on("feature");
    let outcome = warden.intercept(&HookPayload::bash("git commit -m x"));

    assert_eq!(outcome.target, Target::Command);
    assert_eq!(
        outcome.verdict.rejection().map(|r| r.kind),
        Some(RejectionKind::Policy(RuleKind::CommitOffTrunk))
    );
}

#[test]
fn test_empty_payload_is_ignored() {
    let warden = warden_on("main");
    assert_eq!(warden.intercept(&HookPayload::default()).target, Target::Ignored);
}

#[test]
fn test_trunk_override_applies_to_policy() {
    let warden = WardenBuilder::new()
        .with_trunk_branch(Some("trunk"))
        .with_branch_resolver(FixedBranch::new("trunk"))
        .build()
        .unwrap();

    assert_eq!(warden.config().trunk_branch, "trunk");
    assert_eq!(warden.policy().trunk_branch(), "trunk");
    assert!(warden.check_command("git commit -m x").is_accept());
}

#[test]
fn test_empty_trunk_fails_to_build() {
    let result = WardenBuilder::new().with_trunk_branch(Some("")).build();
    assert!(matches!(result, Err(WardenError::InvalidInput { .. })));
}

#[test]
fn test_resolver_not_called_for_plain_commands() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let warden = WardenBuilder::new()
        .with_branch_resolver(move || -> crate::Result<String> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok("main".to_string())
        })
        .build()
        .unwrap();

    assert!(warden.check_command("ls -la").is_accept());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert!(warden.check_command("git status").is_accept());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_check_command_with_overrides_resolver() {
    let warden = warden_on("main");
    assert!(warden.check_command("git commit -m x").is_accept());
    assert!(!warden
        .check_command_with("git commit -m x", &FixedBranch::new("feature"))
        .is_accept());
}
