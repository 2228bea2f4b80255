//! INI configuration (`V21.ini`) and the settings resolved from it.
//!
//! Lookups never fail: a missing, unreadable, or malformed file behaves like
//! an empty one, and absent keys fall back to caller-supplied defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use config::{Config, ConfigError, File, FileFormat, Source};
use serde::Serialize;
use tracing::{debug, warn};

use crate::core::allowlist::Allowlist;
use crate::core::context::RenderContext;
use crate::core::types::Document;

/// Config file read by a zero-argument run, relative to the project root.
pub const DEFAULT_CONFIG_FILE: &str = "V21.ini";

pub const DEFAULT_FRONTEND_FRAMEWORK: &str = "sveltekit";
pub const DEFAULT_FRONTEND_UI: &str = "tailwind+shadcn";
pub const DEFAULT_BACKEND_LANGUAGE: &str = "go";
pub const DEFAULT_BACKEND_AUTH: &str = "supabase";
pub const DEFAULT_DB_ENGINE: &str = "postgres";
pub const DEFAULT_DB_LOCAL: &str = "supabase";
pub const DEFAULT_UI_DIFF_THRESHOLD: &str = "0.03";
pub const DEFAULT_ALLOWLIST: &str =
    "apps/web,apps/api,contracts,ops,PRD.md,PLANNING.md,CLAUDE.md,TASKS.md,V21.ini";

/// Parsed INI file: section → key → raw string value.
///
/// Section and key names are folded to lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniConfig {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl IniConfig {
    /// Load from disk, degrading to an empty config on any failure.
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "config unreadable, using defaults");
                return Self::default();
            }
        };
        match Self::parse(&contents) {
            Ok(cfg) => {
                debug!(path = %path.display(), sections = cfg.sections.len(), "loaded config");
                cfg
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "config malformed, using defaults");
                Self::default()
            }
        }
    }

    /// Parse INI text. Keys outside any section are ignored.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let raw = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Ini))
            .build()?;

        let mut sections: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for (section, value) in raw.collect()? {
            let Ok(table) = value.into_table() else {
                continue;
            };
            let entries = sections.entry(section.to_lowercase()).or_default();
            for (key, value) in table {
                if let Ok(value) = value.into_string() {
                    entries.insert(key.to_lowercase(), value);
                }
            }
        }
        Ok(Self { sections })
    }

    /// Raw value for `(section, key)`, if present.
    pub fn lookup(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(&section.to_lowercase())?
            .get(&key.to_lowercase())
            .map(String::as_str)
    }

    /// Value for `(section, key)`, or `default` when absent.
    pub fn get(&self, section: &str, key: &str, default: &str) -> String {
        self.lookup(section, key).unwrap_or(default).to_string()
    }
}

/// Every value the generator consumes, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub frontend_framework: String,
    pub frontend_ui: String,
    pub backend_language: String,
    pub backend_auth: String,
    pub db_engine: String,
    pub db_local: String,
    pub ui_screenshot_diff_threshold: String,
    /// Raw comma-separated allowlist.
    pub allowlist: String,
    pub outputs: BTreeMap<Document, String>,
    /// Directory (relative to the project root) holding template overrides.
    pub templates_dir: Option<String>,
}

impl Settings {
    pub fn resolve(cfg: &IniConfig) -> Self {
        let outputs = Document::ALL
            .into_iter()
            .map(|doc| {
                let path = cfg
                    .lookup("outputs", doc.config_key())
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .unwrap_or(doc.file_name());
                (doc, path.to_string())
            })
            .collect();

        Self {
            frontend_framework: cfg.get("frontend", "framework", DEFAULT_FRONTEND_FRAMEWORK),
            frontend_ui: cfg.get("frontend", "ui", DEFAULT_FRONTEND_UI),
            backend_language: cfg.get("backend", "language", DEFAULT_BACKEND_LANGUAGE),
            backend_auth: cfg.get("backend", "auth", DEFAULT_BACKEND_AUTH),
            db_engine: cfg.get("db", "engine", DEFAULT_DB_ENGINE),
            db_local: cfg.get("db", "local", DEFAULT_DB_LOCAL),
            ui_screenshot_diff_threshold: cfg.get(
                "guardrails",
                "ui_screenshot_diff_threshold",
                DEFAULT_UI_DIFF_THRESHOLD,
            ),
            allowlist: cfg.get("guardrails", "allowlist", DEFAULT_ALLOWLIST),
            outputs,
            templates_dir: cfg
                .lookup("generator", "templates_dir")
                .map(str::trim)
                .filter(|dir| !dir.is_empty())
                .map(str::to_string),
        }
    }

    pub fn allowlist(&self) -> Allowlist {
        Allowlist::from_csv(&self.allowlist)
    }

    /// Root-relative output path for `doc`.
    pub fn output_path(&self, doc: Document) -> &str {
        self.outputs
            .get(&doc)
            .map(String::as_str)
            .unwrap_or(doc.file_name())
    }

    /// Flatten into template variables.
    pub fn render_context(&self) -> RenderContext {
        let mut ctx = RenderContext::new()
            .with("frontend_framework", &self.frontend_framework)
            .with("frontend_ui", &self.frontend_ui)
            .with("backend_language", &self.backend_language)
            .with("backend_auth", &self.backend_auth)
            .with("db_engine", &self.db_engine)
            .with("db_local", &self.db_local)
            .with(
                "ui_screenshot_diff_threshold",
                &self.ui_screenshot_diff_threshold,
            )
            .with("allowlist", &self.allowlist);
        for doc in Document::ALL {
            ctx.insert(format!("{}_path", doc.config_key()), self.output_path(doc));
        }
        ctx
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(&IniConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
[frontend]
framework = nextjs
ui = tailwind

[backend]
language = go

[guardrails]
ui_screenshot_diff_threshold = 0.05
allowlist = ops, PRD.md
";

    #[test]
    fn get_returns_configured_value_or_default() {
        let cfg = IniConfig::parse(SAMPLE).expect("parse");
        assert_eq!(cfg.get("backend", "language", "go"), "go");
        assert_eq!(cfg.get("frontend", "framework", "sveltekit"), "nextjs");
        assert_eq!(cfg.get("backend", "auth", "supabase"), "supabase");
        assert_eq!(cfg.get("nope", "missing", "fallback"), "fallback");
    }

    #[test]
    fn absent_key_and_present_key_agree_when_value_matches_default() {
        let with_key = IniConfig::parse("[backend]\nlanguage = go\n").expect("parse");
        let without_key = IniConfig::parse("[backend]\n").expect("parse");
        assert_eq!(
            with_key.get("backend", "language", "go"),
            without_key.get("backend", "language", "go")
        );
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let cfg = IniConfig::parse("[db]\nengine = sqlite\n").expect("parse");
        assert_eq!(cfg.lookup("DB", "Engine"), Some("sqlite"));
    }

    #[test]
    fn mixed_case_names_are_folded_on_load() {
        let cfg = IniConfig::parse("[Backend]\nLanguage = Rust\n").expect("parse");
        assert_eq!(cfg.lookup("backend", "language"), Some("Rust"));
        assert_eq!(cfg.get("BACKEND", "LANGUAGE", "go"), "Rust");
    }

    #[test]
    fn quotes_are_stripped_and_backslash_escapes_applied() {
        let cfg = IniConfig::parse(
            "[frontend]\nframework = \"nextjs\"\n\n[generator]\ntemplates_dir = ops\\new\n",
        )
        .expect("parse");
        assert_eq!(cfg.lookup("frontend", "framework"), Some("nextjs"));
        assert_eq!(cfg.lookup("generator", "templates_dir"), Some("ops\new"));
    }

    #[test]
    fn missing_file_yields_empty_config() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = IniConfig::load(&temp.path().join("missing.ini"));
        assert_eq!(cfg, IniConfig::default());
        assert_eq!(cfg.get("db", "engine", "postgres"), "postgres");
    }

    #[test]
    fn unreadable_path_yields_empty_config() {
        let temp = tempfile::tempdir().expect("tempdir");
        // A directory cannot be read as a file.
        let cfg = IniConfig::load(temp.path());
        assert_eq!(cfg, IniConfig::default());
    }

    #[test]
    fn malformed_file_yields_empty_config() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("broken.ini");
        fs::write(&path, "[frontend\nframework = nextjs\n").expect("write");
        let cfg = IniConfig::load(&path);
        assert_eq!(cfg.get("frontend", "framework", "sveltekit"), "sveltekit");
    }

    #[test]
    fn settings_apply_defaults_for_missing_keys() {
        let settings = Settings::default();
        assert_eq!(settings.frontend_framework, DEFAULT_FRONTEND_FRAMEWORK);
        assert_eq!(settings.db_local, DEFAULT_DB_LOCAL);
        assert_eq!(settings.allowlist, DEFAULT_ALLOWLIST);
        assert_eq!(settings.output_path(Document::Tasks), "TASKS.md");
        assert_eq!(settings.templates_dir, None);
    }

    #[test]
    fn settings_read_output_overrides_and_templates_dir() {
        let cfg = IniConfig::parse(
            "[outputs]\nprd = ops/docs/PRD.md\nclaude =\n\n[generator]\ntemplates_dir = ops/templates\n",
        )
        .expect("parse");
        let settings = Settings::resolve(&cfg);
        assert_eq!(settings.output_path(Document::Prd), "ops/docs/PRD.md");
        assert_eq!(settings.output_path(Document::Claude), "CLAUDE.md");
        assert_eq!(settings.templates_dir.as_deref(), Some("ops/templates"));
    }

    #[test]
    fn render_context_exposes_values_and_output_paths() {
        let cfg = IniConfig::parse(SAMPLE).expect("parse");
        let ctx = Settings::resolve(&cfg).render_context();
        assert_eq!(ctx.get("frontend_framework"), Some("nextjs"));
        assert_eq!(ctx.get("ui_screenshot_diff_threshold"), Some("0.05"));
        assert_eq!(ctx.get("allowlist"), Some("ops, PRD.md"));
        assert_eq!(ctx.get("planning_path"), Some("PLANNING.md"));
    }
}
