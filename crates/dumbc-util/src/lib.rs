//! dumbc-util - Core Utilities and Foundation Types
//!
//! Foundation types shared by every stage of the compiler: interned
//! [`Symbol`]s, source [`Span`]s and the spec-facing [`Location`] triple,
//! the [`diagnostic`] sink, and the [`CompileError`] taxonomy used by the
//! lexer, parser and semantic passes.

pub mod diagnostic;
pub mod error;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use error::{CompileError, CompileResult};
pub use span::{FileId, Span};
pub use symbol::Symbol;

// Re-export commonly used hash collections, matching the rest of the
// workspace's preference for rustc-hash over the stdlib's SipHash maps.
pub use rustc_hash::{FxHashMap, FxHashSet};

/// A source location expressed the way the compiler's own diagnostics
/// describe it: a 1-based line, a 1-based column, and the length (in
/// characters) of the token or node the location was taken from.
///
/// This is distinct from [`Span`], which tracks byte offsets for internal
/// cursor bookkeeping. `Location` is the type that crosses the boundary
/// into ASTs, diagnostics, and public driver output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: u32,
    pub column: u32,
    pub extent: u32,
}

impl Location {
    pub const fn new(line: u32, column: u32, extent: u32) -> Self {
        Self {
            line,
            column,
            extent,
        }
    }

    /// Build a `Location` from a [`Span`], taking the span's recorded
    /// line/column as the start and its byte length as the extent.
    pub fn from_span(span: Span) -> Self {
        Self {
            line: span.line,
            column: span.column,
            extent: span.len() as u32,
        }
    }

    pub fn to_span(self) -> Span {
        Span::new(0, self.extent as usize, self.line, self.column)
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
    fn location_from_span_copies_line_column_and_length() {
        let span = Span::new(10, 14, 3, 7);
        let loc = Location::from_span(span);
        assert_eq!(loc.line, 3);
        assert_eq!(loc.column, 7);
        assert_eq!(loc.extent, 4);
    }

    #[test]
    fn location_display_is_line_colon_column() {
        let loc = Location::new(2, 6, 1);
        assert_eq!(loc.to_string(), "2:6");
    }
}
