//! The compiler's error taxonomy.
//!
//! Every stage—lexer, parser, and each semantic pass—reports failures
//! through this single enum rather than inventing its own error type.
//! Each variant carries a human-readable message and the [`Location`] the
//! failure occurred at, when one is available (lexing past the end of
//! input has none).

use thiserror::Error;

use crate::Location;

/// A compiler failure, tagged with the stage-level category the original
/// implementation distinguished.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompileError {
    /// Malformed token stream: an unexpected token, a missing delimiter,
    /// a character no lexical rule matches.
    #[error("{message}")]
    Syntax {
        message: String,
        loc: Option<Location>,
    },

    /// A name was used that has no binding in scope, or a name was bound
    /// twice in a scope that forbids shadowing.
    #[error("{message}")]
    Name {
        message: String,
        loc: Option<Location>,
    },

    /// A value's type is incompatible with the position it's used in.
    #[error("{message}")]
    Type {
        message: String,
        loc: Option<Location>,
    },

    /// The lexer's scanning rules don't match at the current position —
    /// an unknown character, or a numeric literal that doesn't fit its
    /// target representation.
    #[error("{message}")]
    Value {
        message: String,
        loc: Option<Location>,
    },

    /// The input ended while a rule still expected more tokens.
    #[error("{message}")]
    Eof { message: String },
}

impl CompileError {
    pub fn syntax(message: impl Into<String>, loc: Location) -> Self {
        Self::Syntax {
            message: message.into(),
            loc: Some(loc),
        }
    }

    pub fn name(message: impl Into<String>, loc: Location) -> Self {
        Self::Name {
            message: message.into(),
            loc: Some(loc),
        }
    }

    pub fn ty(message: impl Into<String>, loc: Location) -> Self {
        Self::Type {
            message: message.into(),
            loc: Some(loc),
        }
    }

    pub fn value(message: impl Into<String>, loc: Location) -> Self {
        Self::Value {
            message: message.into(),
            loc: Some(loc),
        }
    }

    pub fn eof(message: impl Into<String>) -> Self {
        Self::Eof {
            message: message.into(),
        }
    }

    /// The location the failure occurred at, if one was recorded.
    pub fn loc(&self) -> Option<Location> {
        match self {
            CompileError::Syntax { loc, .. }
            | CompileError::Name { loc, .. }
            | CompileError::Type { loc, .. }
            | CompileError::Value { loc, .. } => *loc,
            CompileError::Eof { .. } => None,
        }
    }

    /// A short tag naming the error category, used by the driver when
    /// printing diagnostics (`error[syntax]: ...`).
    pub fn kind(&self) -> &'static str {
        match self {
            CompileError::Syntax { .. } => "syntax",
            CompileError::Name { .. } => "name",
            CompileError::Type { .. } => "type",
            CompileError::Value { .. } => "value",
            CompileError::Eof { .. } => "eof",
        }
    }
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;
