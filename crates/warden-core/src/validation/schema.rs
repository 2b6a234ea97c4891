//! Planning document schema validation.
//!
//! The checks run over an untyped [`serde_json::Value`] so that every
//! violation can be collected, and follow JSON truthiness for the optional
//! shape checks: `null`, `false`, `0` and `""` count as "not set" there,
//! while the task presence check only looks at whether the key exists.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde_json::{Map, Value};

use super::{Rejection, RejectionKind, Verdict};
use crate::{
    config::Config,
    models::{Phase, Structure},
};

/// Top-level fields every planning document must set.
pub const REQUIRED_PLAN_FIELDS: [&str; 5] =
    ["planId", "projectName", "description", "structure", "tasks"];

/// Keys every task record must carry.
pub const REQUIRED_TASK_FIELDS: [&str; 6] = [
    "id",
    "title",
    "description",
    "phase",
    "dependencies",
    "estimatedHours",
];

// ASCII digits only; `\d` would also accept other Unicode digits.
static TASK_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^TASK-[0-9]{3}$").expect("task id pattern is valid"));

/// Validates planning documents before they are written.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    plan_file_name: String,
    schema_doc: String,
    template_doc: String,
}

impl SchemaValidator {
    /// Create a validator whose diagnostics point at the configured documents.
    pub fn new(config: &Config) -> Self {
        Self {
            plan_file_name: config.plan_file_name.clone(),
            schema_doc: config.schema_doc.clone(),
            template_doc: config.template_doc.clone(),
        }
    }

    /// Validate the raw text of a planning document.
    ///
    /// Unparseable input is rejected with a single violation and no further
    /// checks. Otherwise every structural violation is reported, in document
    /// order.
    pub fn validate(&self, raw: &str) -> Verdict {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                debug!("Planning document is not valid JSON: {e}");
                return Verdict::Reject(self.parse_rejection(format!("Parse error: {e}")));
            }
        };

        let Some(plan) = value.as_object() else {
            return Verdict::Reject(
                self.parse_rejection("Plan document must be a JSON object".to_string()),
            );
        };

        let violations = check_plan(plan);
        if violations.is_empty() {
            debug!("Planning document accepted");
            Verdict::Accept
        } else {
            debug!("Planning document has {} violation(s)", violations.len());
            Verdict::Reject(self.schema_rejection(violations))
        }
    }

    fn parse_rejection(&self, violation: String) -> Rejection {
        Rejection {
            kind: RejectionKind::Parse,
            headline: format!("{} must be valid JSON", self.plan_file_name),
            violations: vec![violation],
            remediation: Vec::new(),
        }
    }

    fn schema_rejection(&self, violations: Vec<String>) -> Rejection {
        Rejection {
            kind: RejectionKind::Schema,
            headline: format!("{} does NOT follow template", self.plan_file_name),
            violations,
            remediation: vec![
                "Use the official template:".to_string(),
                format!("1. Read {} for structure", self.schema_doc),
                format!("2. Read {} for format", self.template_doc),
                "3. Follow the exact structure".to_string(),
                format!("Required fields: {}", REQUIRED_PLAN_FIELDS.join(", ")),
                "Each task: id (TASK-XXX), title, description, phase, dependencies, estimatedHours"
                    .to_string(),
            ],
        }
    }
}

/// Collect every violation of a parsed planning document.
pub fn check_plan(plan: &Map<String, Value>) -> Vec<String> {
    let mut violations = Vec::new();

    for field in REQUIRED_PLAN_FIELDS {
        if !plan.get(field).is_some_and(is_truthy) {
            violations.push(format!("Missing required field: {field}"));
        }
    }

    if let Some(structure) = plan.get("structure").filter(|v| is_truthy(v)) {
        let recognized = structure
            .as_str()
            .is_some_and(|s| s.parse::<Structure>().is_ok());
        if !recognized {
            violations.push(format!(
                "Field \"structure\" must be {}",
                Structure::ALL
                    .iter()
                    .map(|s| format!("\"{s}\""))
                    .collect::<Vec<_>>()
                    .join(" or ")
            ));
        }
    }

    match plan.get("tasks") {
        Some(Value::Array(tasks)) => {
            for (index, task) in tasks.iter().enumerate() {
                check_task(task, index, &mut violations);
            }
        }
        Some(tasks) if is_truthy(tasks) => {
            violations.push("Field \"tasks\" must be an array".to_string());
        }
        _ => {}
    }

    violations
}

fn check_task(task: &Value, index: usize, violations: &mut Vec<String>) {
    let label = task_label(task, index);

    for field in REQUIRED_TASK_FIELDS {
        if task.get(field).is_none() {
            violations.push(format!("Task {label}: Missing required field \"{field}\""));
        }
    }

    if let Some(id) = task.get("id").filter(|v| is_truthy(v)) {
        if !id.as_str().is_some_and(|id| TASK_ID.is_match(id)) {
            violations.push(format!(
                "Task {label}: Invalid ID format. Must be TASK-XXX (e.g., TASK-001)"
            ));
        }
    }

    if let Some(dependencies) = task.get("dependencies").filter(|v| is_truthy(v)) {
        if !dependencies.is_array() {
            violations.push(format!("Task {label}: dependencies must be an array"));
        }
    }

    if let Some(phase) = task.get("phase").filter(|v| is_truthy(v)) {
        if !phase.as_str().is_some_and(|p| p.parse::<Phase>().is_ok()) {
            violations.push(format!(
                "Task {label}: Invalid phase \"{}\". Must be one of: {}",
                display_value(phase),
                Phase::ALL
                    .iter()
                    .map(Phase::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
    }
}

/// Tasks are named by their id when it is set, otherwise by position.
fn task_label(task: &Value, index: usize) -> String {
    match task.get("id") {
        Some(id) if is_truthy(id) => display_value(id),
        _ => index.to_string(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JSON truthiness: `null`, `false`, zero and the empty string are unset.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_task_label_prefers_id() {
        assert_eq!(task_label(&json!({"id": "TASK-007"}), 3), "TASK-007");
        assert_eq!(task_label(&json!({"id": ""}), 3), "3");
        assert_eq!(task_label(&json!({"id": 12}), 3), "12");
        assert_eq!(task_label(&json!("not a task"), 4), "4");
    }

    #[test]
    fn test_task_id_pattern_is_ascii_only() {
        assert!(TASK_ID.is_match("TASK-001"));
        assert!(!TASK_ID.is_match("TASK-\u{0661}\u{0662}\u{0663}"));
        assert!(!TASK_ID.is_match("TASK-001\n"));
    }

    #[test]
    fn test_non_object_task_reports_every_field() {
        let mut violations = Vec::new();
        check_task(&json!("TASK-001"), 0, &mut violations);
        assert_eq!(violations.len(), REQUIRED_TASK_FIELDS.len());
        assert!(violations[0].starts_with("Task 0: Missing required field"));
    }
}
