#![allow(dead_code)]

use serde_json::{json, Value};
use warden_core::{Config, FixedBranch, SchemaValidator, Verdict, Warden, WardenBuilder};

/// Smallest planning document that passes validation.
pub fn minimal_plan() -> Value {
    json!({
        "planId": "PLAN-001",
        "projectName": "Demo",
        "description": "Demo project",
        "structure": "flat",
        "tasks": [minimal_task("TASK-001")]
    })
}

pub fn minimal_task(id: &str) -> Value {
    json!({
        "id": id,
        "title": "x",
        "description": "y",
        "phase": "design",
        "dependencies": [],
        "estimatedHours": 0
    })
}

/// Validate a JSON value with the default configuration.
pub fn validate(plan: &Value) -> Verdict {
    SchemaValidator::new(&Config::default()).validate(&plan.to_string())
}

/// Helper function to create a warden that believes it is on `branch`
pub fn warden_on(branch: &str) -> Warden {
    WardenBuilder::new()
        .with_branch_resolver(FixedBranch::new(branch))
        .build()
        .expect("Failed to create warden")
}
