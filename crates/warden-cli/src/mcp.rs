//! MCP server implementation for Warden
//!
//! Exposes the validators as Model Context Protocol tools so an agent can
//! check a planning document or a git command before attempting it. A blocked
//! action is a successful tool call whose text is the rejection report.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::{
    signal::unix::{signal, SignalKind},
    task,
};
use warden_core::{FixedBranch, HookPayload, OperationStatus, Verdict, Warden};

pub type McpResult = Result<CallToolResult, McpError>;

/// Parameters for validating a planning document
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ValidatePlanParams {
    /// Full JSON text of the planning document
    content: String,
}

/// Parameters for checking a command
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CheckCommandParams {
    /// Shell command about to run
    command: String,
    /// Branch to assume instead of asking git
    branch: Option<String>,
}

/// MCP server for Warden
#[derive(Clone)]
pub struct WardenMcpServer {
    warden: Arc<Warden>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WardenMcpServer {
    /// Create a new Warden MCP server
    pub fn new(warden: Warden) -> Self {
        Self {
            warden: Arc::new(warden),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "validate_plan",
        description = "Validate a PROJECT-PLAN.json document before writing it. Required fields: planId, projectName, description, structure ('flat' or 'hierarchical'), tasks. Each task needs id (TASK-XXX), title, description, phase (design, implementation, testing or deployment), dependencies (array) and estimatedHours. Returns every violation at once."
    )]
    async fn validate_plan(
        &self,
        Parameters(params): Parameters<ValidatePlanParams>,
    ) -> McpResult {
        debug!("validate_plan: {} bytes", params.content.len());
        let verdict = self.warden.validate_plan(&params.content);
        let accepted = format!(
            "{} follows official template",
            self.warden.config().plan_file_name
        );
        Ok(verdict_result(&verdict, accepted))
    }

    #[tool(
        name = "check_command",
        description = "Check a shell command against the direct-to-trunk git workflow before running it. Branch creation, merges, commits outside the trunk branch and force pushes are blocked. Pass branch to evaluate as if that branch were checked out."
    )]
    async fn check_command(
        &self,
        Parameters(params): Parameters<CheckCommandParams>,
    ) -> McpResult {
        debug!("check_command: {:?}", params);
        let verdict = self
            .blocking(move |warden| match params.branch {
                Some(branch) => {
                    warden.check_command_with(&params.command, &FixedBranch::new(branch))
                }
                None => warden.check_command(&params.command),
            })
            .await?;
        Ok(verdict_result(&verdict, "Command allowed".to_string()))
    }

    #[tool(
        name = "intercept",
        description = "Evaluate a raw hook payload ({tool, tool_input: {file_path, content, command}}) exactly as the hook would: plan writes are schema-checked, commands are policy-checked, anything else is allowed."
    )]
    async fn intercept(&self, Parameters(payload): Parameters<HookPayload>) -> McpResult {
        debug!("intercept: {:?}", payload.tool);
        let outcome = self
            .blocking(move |warden| warden.intercept(&payload))
            .await?;
        Ok(verdict_result(
            &outcome.verdict,
            format!("Allowed ({:?})", outcome.target),
        ))
    }

    #[tool(
        name = "session_context",
        description = "Show the active plan, active task, progress and the workflow rules in force. Call at the start of a session."
    )]
    async fn session_context(&self) -> McpResult {
        let context = self
            .blocking(|warden| warden.session_context())
            .await?
            .map_err(|e| {
                McpError::internal_error(format!("Failed to read session context: {e}"), None)
            })?;
        Ok(CallToolResult::success(vec![Content::text(
            context.to_string(),
        )]))
    }
}

impl WardenMcpServer {
    /// Run `f` on the blocking pool: branch resolution spawns git and the
    /// session context reads files.
    async fn blocking<T, F>(&self, f: F) -> Result<T, McpError>
    where
        F: FnOnce(&Warden) -> T + Send + 'static,
        T: Send + 'static,
    {
        let warden = Arc::clone(&self.warden);
        task::spawn_blocking(move || f(&warden))
            .await
            .map_err(|e| McpError::internal_error(format!("Task join error: {e}"), None))
    }
}

fn verdict_result(verdict: &Verdict, accepted: String) -> CallToolResult {
    let text = match verdict.rejection() {
        Some(rejection) => rejection.to_string(),
        None => OperationStatus::success(accepted).to_string(),
    };
    CallToolResult::success(vec![Content::text(text)])
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for WardenMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "warden".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(format!(r#"Warden enforces a direct-to-trunk workflow for this project.

## Rules
- PROJECT-PLAN.json must follow the plan template: check it with `validate_plan` before writing
- No branch creation, no merges, no force pushes
- Commits only on `{trunk}`: check git commands with `check_command` before running them

## Workflow
1. Call `session_context` to see the active plan and task
2. Work on `{trunk}`, commit with `[TASK-XXX] Description`
3. Push with `git push origin {trunk}`

A blocked action returns a report starting with "❌ BLOCKED" listing every violation and how to fix it."#,
                trunk = self.warden.config().trunk_branch
            )),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: WardenMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Warden MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        sync::Mutex,
        thread::{self, ThreadId},
    };

    use warden_core::WardenBuilder;

    use super::*;

    fn text(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).unwrap();
        value["content"][0]["text"].as_str().unwrap().to_string()
    }

    /// Server whose branch resolver records the thread it was called on.
    fn recording_server(branch: &'static str) -> (WardenMcpServer, Arc<Mutex<Option<ThreadId>>>) {
        let seen = Arc::new(Mutex::new(None));
        let recorder = Arc::clone(&seen);
        let warden = WardenBuilder::new()
            .with_branch_resolver(move || -> warden_core::Result<String> {
                *recorder.lock().unwrap() = Some(thread::current().id());
                Ok(branch.to_string())
            })
            .build()
            .unwrap();
        (WardenMcpServer::new(warden), seen)
    }

    #[tokio::test]
    async fn test_check_command_resolves_branch_off_the_runtime() {
        let (server, seen) = recording_server("feature");

        let result = server
            .check_command(Parameters(CheckCommandParams {
                command: "git commit -m x".to_string(),
                branch: None,
            }))
            .await
            .unwrap();

        assert!(text(&result).contains("BLOCKED: Commits only allowed on main branch"));
        let resolved_on = seen.lock().unwrap().expect("branch was resolved");
        assert_ne!(resolved_on, thread::current().id());
    }

    #[tokio::test]
    async fn test_check_command_with_explicit_branch() {
        let (server, seen) = recording_server("feature");

        let result = server
            .check_command(Parameters(CheckCommandParams {
                command: "git commit -m x".to_string(),
                branch: Some("main".to_string()),
            }))
            .await
            .unwrap();

        assert!(text(&result).contains("Command allowed"));
        assert!(seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_intercept_blocks_merge() {
        let (server, _) = recording_server("main");

        let result = server
            .intercept(Parameters(HookPayload::bash("git merge dev")))
            .await
            .unwrap();

        assert!(text(&result).starts_with("❌ BLOCKED: Git merge is NOT allowed"));
    }

    #[tokio::test]
    async fn test_validate_plan_reports_violations() {
        let (server, _) = recording_server("main");

        let result = server
            .validate_plan(Parameters(ValidatePlanParams {
                content: "{}".to_string(),
            }))
            .await
            .unwrap();

        assert!(text(&result).contains("Missing required field: planId"));
    }
}
