//! Data models for planning documents, hook payloads and tracker state.
//!
//! These are the typed views of the JSON the agent produces and the JSON the
//! task tracker persists. Validation deliberately does not go through these
//! types (see [`crate::validation::schema`]): serde stops at the first bad
//! field, while the schema validator has to report every defect at once.
//! Acceptance only checks that task fields are present, so an accepted
//! document need not deserialize into [`PlanDocument`]; [`PlanSummary`]
//! works on any of them.
//!
//! # Examples
//!
//! ```rust
//! use warden_core::models::{Phase, Structure};
//!
//! assert_eq!("hierarchical".parse::<Structure>(), Ok(Structure::Hierarchical));
//! assert_eq!(Phase::Testing.to_string(), "testing");
//! assert!("review".parse::<Phase>().is_err());
//! ```

pub mod hook;
pub mod plan;
pub mod tracker;


pub use hook::{HookPayload, ToolInput};
pub use plan::{Phase, PlanDocument, PlanSummary, Structure, TaskRecord};
pub use tracker::{TaskDetails, TaskTracker, TrackerStatistics};
