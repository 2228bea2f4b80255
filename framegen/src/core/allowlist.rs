//! Output path allowlist.
//!
//! Paths are compared lexically: no filesystem access, no symlink
//! resolution. Both the candidate path and each prefix are normalized first.

use std::path::{Component, Path, PathBuf};

use crate::core::types::OutputSpec;
use crate::error::{GenError, GenResult};

/// Ordered set of permitted path prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Allowlist {
    prefixes: Vec<PathBuf>,
}

impl Allowlist {
    /// Build from raw entries, skipping blanks and duplicates while keeping order.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut prefixes: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let normalized = normalize(Path::new(entry.as_ref().trim()));
            if normalized.as_os_str().is_empty() || prefixes.contains(&normalized) {
                continue;
            }
            prefixes.push(normalized);
        }
        Self { prefixes }
    }

    /// Parse a comma-separated list, as stored under `guardrails.allowlist`.
    pub fn from_csv(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    /// True if `path` normalizes to something under one of the prefixes.
    pub fn permits(&self, path: &str) -> bool {
        let normalized = normalize(Path::new(path));
        if normalized.as_os_str().is_empty() {
            return false;
        }
        self.prefixes
            .iter()
            .any(|prefix| normalized.starts_with(prefix))
    }
}

/// Check a single path against an allowlist.
pub fn check(path: &str, allowlist: &Allowlist) -> bool {
    allowlist.permits(path)
}

/// Verify every pending output before anything is written.
///
/// Fails on the first path outside the allowlist.
pub fn preflight(outputs: &[OutputSpec], allowlist: &Allowlist) -> GenResult<()> {
    for output in outputs {
        if !check(&output.path, allowlist) {
            return Err(GenError::PathNotAllowed(output.path.clone()));
        }
    }
    Ok(())
}

/// Resolve `.` and `..` lexically.
///
/// A `..` that cannot pop a normal component is kept, so paths escaping
/// their base never collapse into something that looks contained.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}
