//! Stable exit codes for warden commands.

/// The action is allowed (or not governed by warden).
pub const ALLOW: u8 = 0;
/// The action is blocked; the agent runtime aborts it and shows stderr.
pub const BLOCK: u8 = 2;
