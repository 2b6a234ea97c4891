use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;
use warden_core::{SessionContext, WardenError};

/// Helper function to lay out tracker state the way plan initialisation does
fn write_plan_state(state_dir: &Path, plan: &str, tracker: serde_json::Value) {
    let plan_dir = state_dir.join("plans").join(plan);
    fs::create_dir_all(plan_dir.join("tasks")).unwrap();
    fs::write(state_dir.join("ACTIVE-PLAN"), format!("{plan}\n")).unwrap();
    fs::write(plan_dir.join("TASK-TRACKER.json"), tracker.to_string()).unwrap();
}

#[test]
fn test_missing_state_means_no_active_plan() {
    let temp_dir = TempDir::new().unwrap();
    let context = SessionContext::load(temp_dir.path(), "main").unwrap();

    assert!(context.active.is_none());
    let rendered = context.to_string();
    assert!(rendered.contains("## No Active Project Plan"));
    assert!(rendered.contains("Work only on `main`"));
}

#[test]
fn test_marker_without_tracker_means_no_active_plan() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("ACTIVE-PLAN"), "checkout").unwrap();

    let context = SessionContext::load(temp_dir.path(), "main").unwrap();
    assert!(context.active.is_none());
}

#[test]
fn test_active_plan_with_active_task() {
    let temp_dir = TempDir::new().unwrap();
    write_plan_state(
        temp_dir.path(),
        "checkout",
        json!({
            "projectName": "Checkout revamp",
            "activeTask": "TASK-002",
            "statistics": {"totalTasks": 5, "completed": 1, "inProgress": 1, "pending": 3}
        }),
    );
    fs::write(
        temp_dir.path().join("plans/checkout/tasks/TASK-002.json"),
        json!({"title": "Build it", "status": "in_progress", "description": "Implement the flow"})
            .to_string(),
    )
    .unwrap();

    let context = SessionContext::load(temp_dir.path(), "trunk").unwrap();
    let plan = context.active.as_ref().expect("plan is active");
    assert_eq!(plan.name, "checkout");
    assert_eq!(plan.tracker.statistics.total_tasks, 5);
    assert_eq!(plan.active_task.as_ref().map(|t| t.title.as_str()), Some("Build it"));

    let rendered = context.to_string();
    assert!(rendered.contains("- Project: Checkout revamp"));
    assert!(rendered.contains("### Active Task: TASK-002"));
    assert!(rendered.contains("- Status: in_progress"));
    assert!(rendered.contains("- Completed: 1/5 tasks"));
    assert!(rendered.contains("`git push origin trunk`"));
}

#[test]
fn test_active_plan_without_active_task() {
    let temp_dir = TempDir::new().unwrap();
    write_plan_state(
        temp_dir.path(),
        "checkout",
        json!({"projectName": "Checkout revamp"}),
    );

    let context = SessionContext::load(temp_dir.path(), "main").unwrap();
    let rendered = context.to_string();
    assert!(rendered.contains("No active task"));
    assert!(rendered.contains("- Completed: 0/0 tasks"));
}

#[test]
fn test_malformed_tracker_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let plan_dir = temp_dir.path().join("plans/checkout");
    fs::create_dir_all(&plan_dir).unwrap();
    fs::write(temp_dir.path().join("ACTIVE-PLAN"), "checkout").unwrap();
    fs::write(plan_dir.join("TASK-TRACKER.json"), "{not json").unwrap();

    let err = SessionContext::load(temp_dir.path(), "main").unwrap_err();
    assert!(matches!(err, WardenError::Serialization { .. }));
}
