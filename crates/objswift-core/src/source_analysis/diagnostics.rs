// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Structured diagnostics for the parser and intention builder.
//!
//! A single [`Diagnostics`] sink exists per parser session. It is
//! append-only and preserves production order, which for recoverable
//! parse errors is the order encountered in source. Severities partition
//! the log into errors, warnings and notes; the error count is the only
//! stable observable for tests — message text is not a contract, but
//! every entry carries a [`Span`].

use ecow::EcoString;

use super::Span;

/// A single diagnostic entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The severity of the diagnostic.
    pub severity: Severity,
    /// The message text.
    pub message: EcoString,
    /// The source location. Mandatory on every diagnostic.
    pub span: Span,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    #[must_use]
    pub fn error(message: impl Into<EcoString>, span: Span) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            span,
        }
    }

    /// Creates a new warning diagnostic.
    #[must_use]
    pub fn warning(message: impl Into<EcoString>, span: Span) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            span,
        }
    }

    /// Creates a new note diagnostic.
    #[must_use]
    pub fn note(message: impl Into<EcoString>, span: Span) -> Self {
        Self {
            severity: Severity::Note,
            message: message.into(),
            span,
        }
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A recoverable syntax or semantic problem.
    Error,
    /// A suspicious construct that does not block rewriting.
    Warning,
    /// Supplementary information attached to another diagnostic.
    Note,
}

/// An append-only diagnostics log, partitioned by severity.
///
/// # Examples
///
/// ```
/// use objswift_core::source_analysis::{Diagnostic, Diagnostics, Span};
///
/// let mut diagnostics = Diagnostics::new();
/// diagnostics.push(Diagnostic::error("expected ';'", Span::new(4, 5)));
/// diagnostics.push(Diagnostic::warning("unused ivar", Span::new(10, 18)));
/// assert_eq!(diagnostics.error_count(), 1);
/// assert_eq!(diagnostics.warnings().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, preserving production order.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Appends all entries of `other` after the existing ones.
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// All entries in production order.
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Entries with severity [`Severity::Error`].
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// Entries with severity [`Severity::Warning`].
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Entries with severity [`Severity::Note`].
    pub fn notes(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.severity == Severity::Note)
    }

    /// Number of error entries. The stable observable for tests.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Returns `true` if no entries of any severity were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_by_severity() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::error("a", Span::new(0, 1)));
        diagnostics.push(Diagnostic::warning("b", Span::new(1, 2)));
        diagnostics.push(Diagnostic::note("c", Span::new(2, 3)));
        diagnostics.push(Diagnostic::error("d", Span::new(3, 4)));

        assert_eq!(diagnostics.error_count(), 2);
        assert_eq!(diagnostics.warnings().count(), 1);
        assert_eq!(diagnostics.notes().count(), 1);
        assert_eq!(diagnostics.entries().len(), 4);
    }

    #[test]
    fn production_order_preserved() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::error("first", Span::new(0, 1)));
        diagnostics.push(Diagnostic::error("second", Span::new(5, 6)));

        let messages: Vec<_> = diagnostics.errors().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn extend_appends_after_existing() {
        let mut a = Diagnostics::new();
        a.push(Diagnostic::error("one", Span::new(0, 1)));
        let mut b = Diagnostics::new();
        b.push(Diagnostic::warning("two", Span::new(1, 2)));

        a.extend(b);
        assert_eq!(a.entries().len(), 2);
        assert_eq!(a.entries()[1].severity, Severity::Warning);
    }

    #[test]
    fn empty_log() {
        let diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        assert_eq!(diagnostics.error_count(), 0);
    }
}
