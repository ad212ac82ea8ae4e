//! I/O helpers for the setup runner.

pub mod config;
pub mod context;
pub mod fix_executor;
pub mod process;
pub mod step_executor;
