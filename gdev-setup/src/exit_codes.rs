//! Stable exit codes for the `gdev-setup` CLI.

/// Every step resolved (or the config is valid for `validate`).
pub const OK: i32 = 0;
/// A step failed and no remaining fix could resolve it, or a step or fix
/// command could not be started.
pub const SETUP_FAILED: i32 = 1;
/// Invalid config or flags. Nothing was run.
pub const INVALID: i32 = 2;
