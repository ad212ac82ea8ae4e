//! Deterministic, pure logic shared by the setup runner.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod attempts;
pub mod events;
pub mod invariants;
pub mod types;
