//! Local development environment provisioning.
//!
//! A setup plan (`.gdev/gdev.setup.yaml`) is an ordered list of shell steps. Each
//! step may carry fix commands that are tried when it fails, and known issues
//! that are shown once no fix helps. The architecture keeps a strict split:
//!
//! - **[`core`]**: Pure, deterministic logic (fix classification, attempt
//!   bookkeeping, plan invariants, progress events). No I/O.
//! - **[`io`]**: Side-effecting operations (config loading, log files, process
//!   execution). Isolated behind [`io::process::CommandRunner`] for tests.
//!
//! Orchestration modules ([`retry`], [`setup`]) coordinate core logic with I/O;
//! [`render`] turns the resulting event stream into terminal output.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod known_issues;
pub mod logging;
pub mod plan;
pub mod render;
pub mod retry;
pub mod setup;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
