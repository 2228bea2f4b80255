//! Test-only helpers for scratch project directories.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::generate::{GenerateOptions, GenerateReport, generate};
use crate::io::config::DEFAULT_CONFIG_FILE;

/// Sample config covering every section the generator reads.
pub const SAMPLE_CONFIG: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/V21.ini"
));

/// A temporary project root, removed on drop.
pub struct TestProject {
    temp: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create temp project")?;
        Ok(Self { temp })
    }

    /// Project initialized with [`SAMPLE_CONFIG`].
    pub fn with_sample_config() -> Result<Self> {
        let project = Self::new()?;
        project.write_config(SAMPLE_CONFIG)?;
        Ok(project)
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `V21.ini` at the project root.
    pub fn write_config(&self, contents: &str) -> Result<()> {
        self.write_file(DEFAULT_CONFIG_FILE, contents)
    }

    pub fn write_file(&self, relative: &str, contents: &str) -> Result<()> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }

    pub fn read(&self, relative: &str) -> Result<String> {
        let path = self.path(relative);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    pub fn options(&self) -> GenerateOptions {
        GenerateOptions::new(self.root())
    }

    pub fn generate(&self) -> Result<GenerateReport> {
        Ok(generate(&self.options())?)
    }
}
