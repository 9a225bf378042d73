//! Diagnostic extraction from Rolldown errors.
//!
//! Rolldown reports failures as a batch of `BuildDiagnostic`s. Each one is
//! classified by its event kind and flattened into a [`BuildDiagnostic`] that
//! can be serialized and shown to users.

use rolldown_error::{BuildDiagnostic as RolldownDiagnostic, EventKind};
use serde::{Deserialize, Serialize};

/// One problem reported by the bundler for a module build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDiagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// Import specifier involved, for resolution failures.
    pub specifier: Option<String>,
    /// Source file the diagnostic points at, when one could be found.
    pub file: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// An internal reference that does not exist on disk.
    Resolution,
    /// Source that could not be parsed.
    Syntax,
    /// Anything else Rolldown rejected.
    Other,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::Resolution => write!(f, "unresolved import"),
            DiagnosticKind::Syntax => write!(f, "syntax error"),
            DiagnosticKind::Other => write!(f, "bundler error"),
        }
    }
}

impl DiagnosticKind {
    fn of(kind: EventKind) -> Self {
        match kind {
            EventKind::UnresolvedImport
            | EventKind::UnresolvedEntry
            | EventKind::ResolveError
            | EventKind::UnloadableDependencyError => DiagnosticKind::Resolution,
            EventKind::ParseError | EventKind::JsonParseError => DiagnosticKind::Syntax,
            _ => DiagnosticKind::Other,
        }
    }
}

/// Flatten a batch of Rolldown diagnostics.
pub fn extract_from_rolldown_error(errors: &[RolldownDiagnostic]) -> Vec<BuildDiagnostic> {
    errors.iter().map(BuildDiagnostic::from_rolldown).collect()
}

impl BuildDiagnostic {
    pub fn from_rolldown(diag: &RolldownDiagnostic) -> Self {
        let kind = DiagnosticKind::of(diag.kind());

        // Resolve errors report the importee as their "exporter".
        let specifier = match kind {
            DiagnosticKind::Resolution => diag.exporter(),
            _ => None,
        };

        let file = diag
            .id()
            .or_else(|| debug_field(&format!("{diag:?}"), "filename"));

        Self {
            kind,
            message: diag.to_string(),
            specifier,
            file,
        }
    }
}

/// Value of a string field in a `Debug` rendering, e.g. `filename: "a.js"`.
///
/// Parse errors keep their file name private, so this is the only way to it.
fn debug_field(rendered: &str, field: &str) -> Option<String> {
    let marker = format!("{field}: \"");
    let start = rendered.find(&marker)? + marker.len();

    let mut value = String::new();
    let mut chars = rendered[start..].chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => return Some(value),
            '\\' => value.push(chars.next()?),
            c => value.push(c),
        }
    }
    None
}
