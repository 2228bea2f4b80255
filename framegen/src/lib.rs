//! Configuration-driven document generator.
//!
//! Reads an INI config (`V21.ini`) and writes a fixed set of project documents
//! (PRD, CLAUDE, PLANNING, TASKS) from templates. The architecture keeps a
//! strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (allowlist matching, render
//!   context, output types). No I/O.
//! - **[`io`]**: Config loading, template rendering, and file writes.
//!
//! [`generate`] wires them into the single-pass pipeline behind the CLI.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod generate;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
