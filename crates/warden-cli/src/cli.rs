//! Command handlers for the warden CLI.
//!
//! Every validating command follows the same contract as the hook: an allowed
//! action exits with [`ALLOW`], a blocked one prints the rejection on stderr
//! and exits with [`BLOCK`].

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::Value;
use warden_core::{HookPayload, OperationStatus, PlanSummary, Target, Verdict, Warden};

use crate::{
    exit_codes::{ALLOW, BLOCK},
    renderer::TerminalRenderer,
};

/// Handles CLI subcommands against a configured [`Warden`].
pub struct Cli {
    warden: Warden,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(warden: Warden, renderer: TerminalRenderer) -> Self {
        Self { warden, renderer }
    }

    /// Validate a hook payload given inline or on stdin.
    ///
    /// A payload that is not valid JSON is not something warden governs, so
    /// it is allowed.
    pub fn hook(&self, payload: Option<String>) -> Result<ExitCode> {
        let raw = match payload {
            Some(raw) => raw,
            None => {
                let mut raw = String::new();
                std::io::stdin()
                    .read_to_string(&mut raw)
                    .context("Failed to read hook payload from stdin")?;
                raw
            }
        };

        let payload = match HookPayload::from_json(&raw) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Ignoring unreadable hook payload: {e}");
                return Ok(ExitCode::from(ALLOW));
            }
        };

        let outcome = self.warden.intercept(&payload);
        match (outcome.target, &outcome.verdict) {
            (Target::PlanDocument, Verdict::Accept) => {
                self.plan_accepted(None)?;
                Ok(ExitCode::from(ALLOW))
            }
            (_, verdict) => Ok(self.finish(verdict)),
        }
    }

    /// Validate a planning document on disk.
    pub fn validate_plan(&self, file: &Path) -> Result<ExitCode> {
        let raw = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;

        match self.warden.validate_plan(&raw) {
            Verdict::Accept => {
                let summary = serde_json::from_str::<Value>(&raw)
                    .ok()
                    .map(|plan| PlanSummary::from_value(&plan));
                self.plan_accepted(summary)?;
                Ok(ExitCode::from(ALLOW))
            }
            verdict => Ok(self.finish(&verdict)),
        }
    }

    /// Check a command against the git workflow policy.
    pub fn check_command(&self, command: &str) -> Result<ExitCode> {
        let verdict = self.warden.check_command(command);
        if verdict.is_accept() {
            self.renderer
                .render(&OperationStatus::success("Command allowed".to_string()).to_string())?;
        }
        Ok(self.finish(&verdict))
    }

    /// Print the session context.
    pub fn context(&self) -> Result<ExitCode> {
        let context = self
            .warden
            .session_context()
            .context("Failed to read session context")?;
        self.renderer.render(&context.to_string())?;
        Ok(ExitCode::from(ALLOW))
    }

    fn plan_accepted(&self, summary: Option<PlanSummary>) -> Result<()> {
        let file_name = &self.warden.config().plan_file_name;
        let message = match summary {
            Some(summary) => format!(
                "{file_name} follows official template ({} tasks, {} estimated hours)",
                summary.task_count, summary.estimated_hours
            ),
            None => format!("{file_name} follows official template"),
        };
        self.renderer
            .render(&OperationStatus::success(message).to_string())
    }

    fn finish(&self, verdict: &Verdict) -> ExitCode {
        match verdict.rejection() {
            Some(rejection) => {
                info!("Blocked: {}", rejection.headline);
                self.renderer.report(&format!("\n{rejection}\n"));
                ExitCode::from(BLOCK)
            }
            None => ExitCode::from(ALLOW),
        }
    }
}
