//! Task tracker state persisted next to an initialised plan.
//!
//! Warden never writes these files; it only reads them to report the
//! session context.

use serde::{Deserialize, Serialize};

/// Contents of `plans/<plan>/TASK-TRACKER.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskTracker {
    /// Human readable project name
    pub project_name: String,

    /// Task currently being worked on
    #[serde(default)]
    pub active_task: Option<String>,

    /// Progress counters
    #[serde(default)]
    pub statistics: TrackerStatistics,
}

/// Progress counters kept by the tracker.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrackerStatistics {
    #[serde(default)]
    pub total_tasks: u32,
    #[serde(default)]
    pub completed: u32,
    #[serde(default)]
    pub in_progress: u32,
    #[serde(default)]
    pub pending: u32,
}

/// Contents of `plans/<plan>/tasks/<TASK-ID>.json`, reduced to what is shown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskDetails {
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
