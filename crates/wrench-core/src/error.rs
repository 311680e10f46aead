//! Error and diagnostic types for wrench
//!
//! Two families live here:
//! - [`WrenchError`] aborts a run (or fails before one starts).
//! - [`Diagnostic`] is recoverable: it is reported to a [`Diagnostics`] sink and
//!   only affects its local unit (one annotation, one field, one file).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wrench operations
pub type WrenchResult<T> = Result<T, WrenchError>;

/// Fatal error type for wrench operations
#[derive(Error, Debug)]
pub enum WrenchError {
    /// The external analysis reported a failure while traversing a translation unit
    #[error("analysis failed for '{unit}': {reason}")]
    AnalysisFailure { unit: String, reason: String },

    /// A generated class declares more than one direct base
    #[error("class '{class}' has {count} direct base classes; only single inheritance is supported")]
    MultipleInheritance { class: String, count: usize },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error outside of per-class output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// AST dump could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl WrenchError {
    /// Whether this error is one of the conditions that abort a generation run
    pub fn is_fatal_run_error(&self) -> bool {
        matches!(
            self,
            WrenchError::AnalysisFailure { .. } | WrenchError::MultipleInheritance { .. }
        )
    }
}

/// Stable classification of a [`Diagnostic`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    DuplicateMatch,
    AnnotationShape,
    FieldType,
    NonRecordBase,
    OutputDirectory,
    OutputFile,
}

/// A recoverable problem found during a run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The same declaration (or another declaration with the same name) matched again
    #[error("class '{class}' ({location}) found multiple times")]
    DuplicateMatch { class: String, location: String },

    /// A marker or annotation argument does not have the expected shape
    #[error("class '{class}': annotation '{annotation}' {reason}")]
    AnnotationShape {
        class: String,
        annotation: String,
        reason: String,
    },

    /// A reflected field's type cannot be expressed in the schema language
    #[error("class '{class}': type '{ty}' of declaration '{member}' cannot be handled")]
    FieldType {
        class: String,
        member: String,
        ty: String,
    },

    /// The single direct base is not a record type
    #[error("class '{class}': base '{base}' is not a record type")]
    NonRecordBase { class: String, base: String },

    /// The output directory could not be created
    #[error("failed to create output directory '{}': {message}", path.display())]
    OutputDirectory { path: PathBuf, message: String },

    /// The output file for a class could not be written
    #[error("failed to write '{}': {message}", path.display())]
    OutputFile { path: PathBuf, message: String },
}

impl Diagnostic {
    /// Returns the kind of this diagnostic
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::DuplicateMatch { .. } => DiagnosticKind::DuplicateMatch,
            Diagnostic::AnnotationShape { .. } => DiagnosticKind::AnnotationShape,
            Diagnostic::FieldType { .. } => DiagnosticKind::FieldType,
            Diagnostic::NonRecordBase { .. } => DiagnosticKind::NonRecordBase,
            Diagnostic::OutputDirectory { .. } => DiagnosticKind::OutputDirectory,
            Diagnostic::OutputFile { .. } => DiagnosticKind::OutputFile,
        }
    }
}

/// Ordered sink for recoverable diagnostics
///
/// Every reported diagnostic is logged at `warn` level as it arrives and kept
/// for the run report.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic
    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(kind = ?diagnostic.kind(), "{diagnostic}");
        self.entries.push(diagnostic);
    }

    /// All diagnostics in report order
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of diagnostics of the given kind
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind() == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
