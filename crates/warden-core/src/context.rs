//! Session context: what plan and task the agent is working on.
//!
//! Reads the state the task tracker persists under the state directory:
//!
//! ```text
//! <state_dir>/ACTIVE-PLAN                       name of the active plan
//! <state_dir>/plans/<plan>/TASK-TRACKER.json    progress of that plan
//! <state_dir>/plans/<plan>/tasks/<TASK>.json    details of each task
//! ```
//!
//! Missing files mean "nothing active". Files that exist but do not parse are
//! errors.

use std::path::{Path, PathBuf};

use log::debug;
use serde::de::DeserializeOwned;

use crate::{
    error::{IoResultExt, Result},
    models::{TaskDetails, TaskTracker},
};

/// Snapshot of the active plan, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    /// Active plan and its tracker; `None` when no plan is initialised
    pub active: Option<ActivePlan>,

    /// Trunk branch named in the workflow rules
    pub trunk_branch: String,
}

/// A plan with a readable tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePlan {
    /// Directory name of the plan under `plans/`
    pub name: String,

    /// Directory of the plan relative to the working directory
    pub location: PathBuf,

    pub tracker: TaskTracker,

    /// Details of the tracker's active task, when its task file exists
    pub active_task: Option<TaskDetails>,
}

impl SessionContext {
    /// Read the session context from `state_dir`.
    pub fn load(state_dir: &Path, trunk_branch: impl Into<String>) -> Result<Self> {
        Ok(Self {
            active: load_active_plan(state_dir)?,
            trunk_branch: trunk_branch.into(),
        })
    }
}

fn load_active_plan(state_dir: &Path) -> Result<Option<ActivePlan>> {
    let marker = state_dir.join("ACTIVE-PLAN");
    let Some(name) = read_optional(&marker)? else {
        debug!("No active plan marker at {}", marker.display());
        return Ok(None);
    };
    let name = name.trim().to_string();
    if name.is_empty() {
        return Ok(None);
    }

    let location = state_dir.join("plans").join(&name);
    let Some(tracker) = read_json::<TaskTracker>(&location.join("TASK-TRACKER.json"))? else {
        debug!("Active plan {name} has no tracker");
        return Ok(None);
    };

    let active_task = match &tracker.active_task {
        Some(task_id) => {
            read_json::<TaskDetails>(&location.join("tasks").join(format!("{task_id}.json")))?
        }
        None => None,
    };

    Ok(Some(ActivePlan {
        name,
        location,
        tracker,
        active_task,
    }))
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).fs_context(path),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    read_optional(path)?
        .map(|raw| serde_json::from_str(&raw).map_err(Into::into))
        .transpose()
}
