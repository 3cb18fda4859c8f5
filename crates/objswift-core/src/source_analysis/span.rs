// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source location tracking.
//!
//! Every token and AST node carries a [`Span`] indicating its position in
//! the source file as a half-open byte interval. Line and column numbers
//! are not stored; they are resolved on demand via [`Location::resolve`]
//! when a diagnostic is rendered.

use std::ops::Range;

/// A span of source code, represented as a half-open byte offset range.
///
/// Spans are attached to every token, AST node and diagnostic. They are
/// cheap to copy and compare; human-readable positions are derived lazily
/// with [`Location::resolve`].
///
/// # Examples
///
/// ```
/// use objswift_core::source_analysis::Span;
///
/// let span = Span::new(0, 10);
/// assert_eq!(span.start(), 0);
/// assert_eq!(span.end(), 10);
/// assert_eq!(span.len(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: u32,
    end: u32,
}

impl Span {
    /// Creates a new span from start and end byte offsets.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns the start byte offset.
    #[must_use]
    pub const fn start(self) -> u32 {
        self.start
    }

    /// Returns the end byte offset (exclusive).
    #[must_use]
    pub const fn end(self) -> u32 {
        self.end
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Returns true if `other` is fully contained within `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Creates a span that covers both `self` and `other`.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// Converts to a `Range<usize>` for indexing into source text.
    #[must_use]
    pub const fn as_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl From<Range<u32>> for Span {
    fn from(range: Range<u32>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Range<usize>> for Span {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start as u32, range.end as u32)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.as_range()
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start as usize, span.len() as usize).into()
    }
}

/// A human-readable source position: 1-based line and column.
///
/// Columns count Unicode scalar values, not bytes, so a position after a
/// multi-byte character still reads naturally in an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column, counted in Unicode scalars.
    pub column: u32,
}

impl Location {
    /// Resolves the line/column of a byte `offset` within `source`.
    ///
    /// Offsets past the end of the source resolve to the position just
    /// after the final character.
    #[must_use]
    pub fn resolve(source: &str, offset: u32) -> Self {
        let offset = (offset as usize).min(source.len());
        let mut line = 1;
        let mut column = 1;
        for (pos, c) in source.char_indices() {
            if pos >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { line, column }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_new_and_accessors() {
        let span = Span::new(5, 15);
        assert_eq!(span.start(), 5);
        assert_eq!(span.end(), 15);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
    }

    #[test]
    fn span_empty() {
        let span = Span::new(5, 5);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
    }

    #[test]
    fn span_merge_and_contains() {
        let a = Span::new(5, 10);
        let b = Span::new(15, 20);
        let merged = a.merge(b);
        assert_eq!(merged.start(), 5);
        assert_eq!(merged.end(), 20);
        assert!(merged.contains(a));
        assert!(merged.contains(b));
        assert!(!a.contains(merged));
    }

    #[test]
    fn span_from_range() {
        let span: Span = (0u32..10u32).into();
        assert_eq!(span.start(), 0);

        let span: Span = (3usize..7usize).into();
        assert_eq!(span.as_range(), 3..7);
    }

    #[test]
    fn location_resolve_first_line() {
        let loc = Location::resolve("hello", 3);
        assert_eq!(loc, Location { line: 1, column: 4 });
    }

    #[test]
    fn location_resolve_across_lines() {
        let source = "ab\ncd\nef";
        let loc = Location::resolve(source, 4);
        assert_eq!(loc, Location { line: 2, column: 2 });
        let loc = Location::resolve(source, 6);
        assert_eq!(loc, Location { line: 3, column: 1 });
    }

    #[test]
    fn location_counts_scalars_not_bytes() {
        // 'é' is two bytes but one scalar; the column after it is 2.
        let source = "é!";
        let loc = Location::resolve(source, 2);
        assert_eq!(loc, Location { line: 1, column: 2 });
    }

    #[test]
    fn location_past_end_clamps() {
        let loc = Location::resolve("ab", 99);
        assert_eq!(loc, Location { line: 1, column: 3 });
    }
}
