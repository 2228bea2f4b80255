//! I/O helpers for the generator: config input, templates, file output.

pub mod config;
pub mod render;
pub mod writer;
