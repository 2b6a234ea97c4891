//! Planning document model definition and related functionality.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Layout mode of a planning document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Structure {
    /// All tasks live in a single list
    Flat,

    /// Tasks are grouped under parent tasks
    Hierarchical,
}

impl Structure {
    /// Every recognized layout mode, in canonical order.
    pub const ALL: [Structure; 2] = [Structure::Flat, Structure::Hierarchical];

    /// Wire representation of the layout mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Structure::Flat => "flat",
            Structure::Hierarchical => "hierarchical",
        }
    }
}

impl FromStr for Structure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(Structure::Flat),
            "hierarchical" => Ok(Structure::Hierarchical),
            _ => Err(format!("Invalid structure: {s}")),
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle phase a task belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Design,
    Implementation,
    Testing,
    Deployment,
}

impl Phase {
    /// Every recognized phase, in lifecycle order.
    pub const ALL: [Phase; 4] = [
        Phase::Design,
        Phase::Implementation,
        Phase::Testing,
        Phase::Deployment,
    ];

    /// Wire representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Design => "design",
            Phase::Implementation => "implementation",
            Phase::Testing => "testing",
            Phase::Deployment => "deployment",
        }
    }
}

// Matching is exact: "Design" is not a valid phase in a planning document.
impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| format!("Invalid phase: {s}"))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A project plan as written to `PROJECT-PLAN.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanDocument {
    /// Unique identifier for the plan
    pub plan_id: String,

    /// Human readable project name
    pub project_name: String,

    /// Free-text description of the project
    pub description: String,

    /// Layout mode of the task list
    pub structure: Structure,

    /// Ordered task breakdown
    pub tasks: Vec<TaskRecord>,
}

/// One unit of work within a [`PlanDocument`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Task identifier in `TASK-###` form
    pub id: String,

    /// Brief title of the task
    pub title: String,

    /// Detailed description of the task
    pub description: String,

    /// Lifecycle phase
    pub phase: Phase,

    /// Ids of tasks that must complete first
    pub dependencies: Vec<String>,

    /// Estimated effort in hours
    pub estimated_hours: f64,
}

/// Task count and total estimate of a planning document.
///
/// Read from the raw JSON rather than [`PlanDocument`]: an accepted document
/// may still hold `null` text fields or a string `estimatedHours`. Estimates
/// that are not numbers are left out of the total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanSummary {
    pub task_count: usize,
    pub estimated_hours: f64,
}

impl PlanSummary {
    pub fn from_value(plan: &Value) -> Self {
        let tasks = plan
            .get("tasks")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        Self {
            task_count: tasks.len(),
            estimated_hours: tasks
                .iter()
                .filter_map(|task| task.get("estimatedHours").and_then(Value::as_f64))
                .sum(),
        }
    }
}
