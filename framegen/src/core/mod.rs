//! Deterministic, pure logic shared by the generator.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! values and return deterministic outputs suitable for tests.

pub mod allowlist;
pub mod context;
pub mod types;
