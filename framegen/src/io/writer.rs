//! Writes rendered documents under the project root.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::core::allowlist::normalize;
use crate::core::types::{OutputSpec, WriteResult, WriteStatus};
use crate::error::{GenError, GenResult};

/// Writes [`OutputSpec`]s relative to a fixed root directory.
///
/// Callers are expected to have run the allowlist preflight first; the writer
/// does not re-check paths.
#[derive(Debug, Clone)]
pub struct Writer {
    root: PathBuf,
}

impl Writer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write one document, creating parent directories as needed.
    ///
    /// Content is staged in a uniquely named temp file beside the target and
    /// renamed into place, so a failed write never leaves a truncated file
    /// behind. Identical content is left untouched.
    pub fn write(&self, output: &OutputSpec) -> GenResult<WriteResult> {
        let relative = normalize(Path::new(&output.path));
        let path = self.root.join(&relative);
        let failed = |source: io::Error| GenError::WriteFailed {
            path: path.clone(),
            source,
        };

        let status = match fs::read(&path) {
            Ok(existing) if existing == output.content.as_bytes() => WriteStatus::Unchanged,
            Ok(_) => WriteStatus::Updated,
            Err(err) if err.kind() == io::ErrorKind::NotFound => WriteStatus::Created,
            Err(err) => return Err(failed(err)),
        };

        if status == WriteStatus::Unchanged {
            debug!(path = %relative.display(), "unchanged");
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(failed)?;
            }
            write_atomic(&path, &output.content).map_err(failed)?;
            info!(
                path = %relative.display(),
                status = status.as_str(),
                bytes = output.content.len(),
                "wrote document"
            );
        }

        Ok(WriteResult {
            document: output.document,
            path: relative,
            bytes: output.content.len(),
            status,
        })
    }
}

/// The staged file is removed on drop if it was never persisted.
fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let mut staged = NamedTempFile::new_in(parent)?;
    staged.write_all(contents.as_bytes())?;
    staged.persist(path).map_err(|err| err.error)?;
    Ok(())
}
