//! Markdown rendering of the session context.

use std::fmt;

use crate::context::{ActivePlan, SessionContext};

impl fmt::Display for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Workflow Session")?;
        writeln!(f)?;

        match &self.active {
            Some(plan) => write!(f, "{plan}")?,
            None => {
                writeln!(f, "## No Active Project Plan")?;
                writeln!(f)?;
                writeln!(f, "You MUST work within an active plan. Create one first:")?;
                writeln!(f)?;
                writeln!(f, "1. Write PROJECT-PLAN.json following the official template")?;
                writeln!(f, "2. Initialise the plan")?;
                writeln!(f, "3. Start the next task")?;
            }
        }

        let trunk = &self.trunk_branch;
        writeln!(f)?;
        writeln!(f, "## Workflow Rules")?;
        writeln!(f)?;
        writeln!(f, "1. No work without an active plan and task")?;
        writeln!(f, "2. Work only on `{trunk}` (no feature branches)")?;
        writeln!(f, "3. Write tests first, then code")?;
        writeln!(f, "4. Commit with the task id: `[TASK-XXX] Description`")?;
        writeln!(f, "5. Push regularly: `git push origin {trunk}`")?;
        writeln!(f)?;
        writeln!(f, "## Enforced")?;
        writeln!(f)?;
        writeln!(f, "- PROJECT-PLAN.json must follow the plan template")?;
        writeln!(f, "- Branch creation and merges are blocked")?;
        writeln!(f, "- Commits are blocked outside `{trunk}`")?;
        writeln!(f, "- Force pushes are blocked")?;

        Ok(())
    }
}

impl fmt::Display for ActivePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Active Project")?;
        writeln!(f)?;
        writeln!(f, "- Project: {}", self.tracker.project_name)?;
        writeln!(f, "- Plan: {}", self.name)?;
        writeln!(f, "- Location: {}/", self.location.display())?;
        writeln!(f)?;

        match (&self.tracker.active_task, &self.active_task) {
            (Some(id), Some(task)) => {
                writeln!(f, "### Active Task: {id}")?;
                writeln!(f)?;
                writeln!(f, "- Title: {}", task.title)?;
                if let Some(status) = &task.status {
                    writeln!(f, "- Status: {status}")?;
                }
                if let Some(description) = &task.description {
                    writeln!(f, "- Description: {description}")?;
                }
            }
            (Some(id), None) => {
                writeln!(f, "### Active Task: {id}")?;
                writeln!(f)?;
                writeln!(f, "Task file not found.")?;
            }
            (None, _) => {
                writeln!(f, "No active task. Start the next task before editing.")?;
            }
        }

        let stats = &self.tracker.statistics;
        writeln!(f)?;
        writeln!(f, "### Progress")?;
        writeln!(f)?;
        writeln!(
            f,
            "- Completed: {}/{} tasks",
            stats.completed, stats.total_tasks
        )?;
        writeln!(f, "- In Progress: {}", stats.in_progress)?;
        writeln!(f, "- Pending: {}", stats.pending)?;

        Ok(())
    }
}
