//! Orchestration for a generation run.
//!
//! A run is one linear pass: load config, resolve settings, render every
//! document, check every output path against the allowlist, then write. No
//! file is written unless all paths pass the allowlist.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::core::allowlist::{normalize, preflight};
use crate::core::types::{Document, OutputSpec, WriteResult, WriteStatus};
use crate::error::GenResult;
use crate::io::config::{DEFAULT_CONFIG_FILE, IniConfig, Settings};
use crate::io::render::{TemplateRenderer, TemplateSet};
use crate::io::writer::Writer;

/// Inputs for [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Project root; output paths and the templates directory resolve here.
    pub root: PathBuf,
    /// Config file, resolved against `root` when relative.
    pub config_path: PathBuf,
    /// Render and check everything, but write nothing.
    pub dry_run: bool,
}

impl GenerateOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config_path: PathBuf::from(DEFAULT_CONFIG_FILE),
            dry_run: false,
        }
    }
}

/// Outcome of a run, one entry per document in write order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateReport {
    pub dry_run: bool,
    pub results: Vec<WriteResult>,
}

impl GenerateReport {
    pub fn count(&self, status: WriteStatus) -> usize {
        self.results
            .iter()
            .filter(|result| result.status == status)
            .count()
    }
}

/// Run the full pipeline.
pub fn generate(options: &GenerateOptions) -> GenResult<GenerateReport> {
    let config_path = options.root.join(&options.config_path);
    debug!(config = %config_path.display(), dry_run = options.dry_run, "generating");

    let settings = Settings::resolve(&IniConfig::load(&config_path));
    let templates = match &settings.templates_dir {
        Some(dir) => TemplateSet::with_overrides(&options.root.join(dir))?,
        None => TemplateSet::builtin(),
    };
    let renderer = templates.renderer()?;
    let outputs = render_outputs(&settings, &renderer)?;

    preflight(&outputs, &settings.allowlist())?;

    let results: Vec<WriteResult> = if options.dry_run {
        outputs
            .iter()
            .map(|output| WriteResult {
                document: output.document,
                path: normalize(Path::new(&output.path)),
                bytes: output.content.len(),
                status: WriteStatus::Skipped,
            })
            .collect()
    } else {
        let writer = Writer::new(&options.root);
        outputs
            .iter()
            .map(|output| writer.write(output))
            .collect::<GenResult<Vec<_>>>()?
    };

    let report = GenerateReport {
        dry_run: options.dry_run,
        results,
    };
    info!(
        created = report.count(WriteStatus::Created),
        updated = report.count(WriteStatus::Updated),
        unchanged = report.count(WriteStatus::Unchanged),
        dry_run = report.dry_run,
        "generation complete"
    );
    Ok(report)
}

/// Render every document against the settings' context, in write order.
pub fn render_outputs(
    settings: &Settings,
    renderer: &TemplateRenderer<'_>,
) -> GenResult<Vec<OutputSpec>> {
    let ctx = settings.render_context();
    Document::ALL
        .into_iter()
        .map(|document| {
            Ok(OutputSpec {
                document,
                path: settings.output_path(document).to_string(),
                content: renderer.render(document.template_name(), &ctx)?,
            })
        })
        .collect()
}
