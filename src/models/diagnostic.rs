//! Positioned diagnostics reported by the validator

use serde::Serialize;
use std::fmt;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Error,
    Warning,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Error => write!(f, "error"),
            DiagnosticKind::Warning => write!(f, "warning"),
        }
    }
}

/// One problem in the source text, anchored to `[row,column)..[end_row,end_column)`.
///
/// Rows and columns are zero-based, columns count characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub row: usize,
    pub column: usize,
    pub end_row: usize,
    pub end_column: usize,
    pub text: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }
}

impl fmt::Display for Diagnostic {
    /// `row:column: kind: text`, one-based for humans
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}: {}", self.row + 1, self.column + 1, self.kind, self.text)
    }
}
