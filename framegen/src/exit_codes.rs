//! Stable exit codes for the framegen CLI.

use crate::error::GenError;

/// All documents were rendered and written (or checked, with `--dry-run`).
pub const OK: i32 = 0;
/// Invalid config or template, including a missing template variable.
pub const INVALID: i32 = 1;
/// An output path fell outside the allowlist; nothing was written.
pub const PATH_NOT_ALLOWED: i32 = 2;
/// Writing an output file failed.
pub const WRITE_FAILED: i32 = 3;

/// Map a pipeline error to its exit code.
pub fn for_error(err: &GenError) -> i32 {
    match err {
        GenError::PathNotAllowed(_) => PATH_NOT_ALLOWED,
        GenError::WriteFailed { .. } => WRITE_FAILED,
        GenError::MissingVariable { .. }
        | GenError::UnknownTemplate(_)
        | GenError::Template { .. }
        | GenError::TemplateLoad { .. } => INVALID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_failure_kind_exits_non_zero() {
        assert_eq!(
            for_error(&GenError::PathNotAllowed("x".to_string())),
            PATH_NOT_ALLOWED
        );
        assert_eq!(
            for_error(&GenError::MissingVariable {
                template: "PRD.md".to_string(),
                name: "x".to_string(),
            }),
            INVALID
        );
        let write = GenError::WriteFailed {
            path: "PRD.md".into(),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(for_error(&write), WRITE_FAILED);
    }
}
