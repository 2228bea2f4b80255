//! Template rendering for the generated documents.
//!
//! Built-in templates are compiled into the binary. A templates directory can
//! replace any of them by providing a file with the document's name.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use tracing::debug;

use crate::core::context::RenderContext;
use crate::core::types::Document;
use crate::error::{GenError, GenResult};

const PRD_TEMPLATE: &str = include_str!("templates/PRD.md");
const CLAUDE_TEMPLATE: &str = include_str!("templates/CLAUDE.md");
const PLANNING_TEMPLATE: &str = include_str!("templates/PLANNING.md");
const TASKS_TEMPLATE: &str = include_str!("templates/TASKS.md");

fn builtin_source(doc: Document) -> &'static str {
    match doc {
        Document::Prd => PRD_TEMPLATE,
        Document::Claude => CLAUDE_TEMPLATE,
        Document::Planning => PLANNING_TEMPLATE,
        Document::Tasks => TASKS_TEMPLATE,
    }
}

/// Template sources keyed by template name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    sources: BTreeMap<&'static str, String>,
}

impl TemplateSet {
    pub fn builtin() -> Self {
        let sources = Document::ALL
            .into_iter()
            .map(|doc| (doc.template_name(), builtin_source(doc).to_string()))
            .collect();
        Self { sources }
    }

    /// Built-ins, with any `<dir>/<FILE>.md` present on disk taking precedence.
    pub fn with_overrides(dir: &Path) -> GenResult<Self> {
        let mut set = Self::builtin();
        for doc in Document::ALL {
            let path = dir.join(doc.file_name());
            match fs::read_to_string(&path) {
                Ok(source) => {
                    debug!(
                        template = doc.template_name(),
                        path = %path.display(),
                        "template override"
                    );
                    set.sources.insert(doc.template_name(), source);
                }
                Err(err) if err.kind() == IoErrorKind::NotFound => {}
                Err(source) => return Err(GenError::TemplateLoad { path, source }),
            }
        }
        Ok(set)
    }

    pub fn source(&self, name: &str) -> Option<&str> {
        self.sources.get(name).map(String::as_str)
    }

    /// Compile every template into a renderer borrowing these sources.
    pub fn renderer(&self) -> GenResult<TemplateRenderer<'_>> {
        TemplateRenderer::new(self)
    }
}

/// Template engine wrapper around minijinja.
///
/// Undefined variables are errors, and a trailing newline in a template is
/// preserved in the output.
pub struct TemplateRenderer<'source> {
    env: Environment<'source>,
}

impl<'source> TemplateRenderer<'source> {
    fn new(set: &'source TemplateSet) -> GenResult<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.add_filter("csv_items", csv_items);
        for (name, text) in &set.sources {
            env.add_template(*name, text)
                .map_err(|source| GenError::Template {
                    name: (*name).to_string(),
                    source,
                })?;
        }
        Ok(Self { env })
    }

    /// Render `name` with `ctx`.
    ///
    /// Every top-level variable the template reads must be present in `ctx`
    /// or be an environment global such as `range`. When several are
    /// missing, the alphabetically first is reported.
    pub fn render(&self, name: &str, ctx: &RenderContext) -> GenResult<String> {
        let template = self.env.get_template(name).map_err(|err| match err.kind() {
            ErrorKind::TemplateNotFound => GenError::UnknownTemplate(name.to_string()),
            _ => GenError::Template {
                name: name.to_string(),
                source: err,
            },
        })?;

        let mut referenced: Vec<String> =
            template.undeclared_variables(false).into_iter().collect();
        referenced.sort();
        let missing = referenced
            .into_iter()
            .find(|var| !ctx.contains(var) && !self.is_global(var));
        if let Some(missing) = missing {
            return Err(GenError::MissingVariable {
                template: name.to_string(),
                name: missing,
            });
        }

        let rendered = template.render(ctx).map_err(|source| GenError::Template {
            name: name.to_string(),
            source,
        })?;
        debug!(template = name, bytes = rendered.len(), "rendered template");
        Ok(rendered)
    }

    fn is_global(&self, var: &str) -> bool {
        self.env.globals().any(|(global, _)| global == var)
    }
}

/// Split a comma-separated value into trimmed, non-empty items.
fn csv_items(value: String) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
