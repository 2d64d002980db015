//! The `job_saver` command line: argument parsing, the effect runner, and
//! the per-command sessions driving the core state machines.

pub mod cli;
pub mod effects;
pub mod session;
