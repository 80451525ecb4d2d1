//! dumbc-par - Parser (Syntactic Analyzer)
//!
//! Recursive descent over the token stream produced by `dumbc-lex`, with
//! one token of lookahead. Statements and declarations are handled by
//! dedicated recursive-descent routines (`items.rs`, `stmt.rs`); expressions
//! use a precedence-climbing engine (`expr.rs`). The output is the untyped
//! AST defined in `ast.rs` — every expression node's `ty` is `None` until
//! `dumbc-sem`'s `TypePass` fills it in.
//!
//! Errors are fatal: the first rule mismatch aborts the parse and returns
//! a `CompileError` rather than attempting recovery, matching the "no
//! recovery, no batching" error model the whole front-end follows.

pub mod ast;
mod expr;
mod items;
mod stmt;

pub use ast::*;

use dumbc_lex::{Lexer, Token, TokenKind};
use dumbc_util::{CompileError, CompileResult, Location};

/// Tokenizes and parses a complete source string in one call. Convenience
/// wrapper around [`Lexer`] and [`Parser`] for callers (the driver, tests)
/// that don't need to inspect the token stream themselves.
pub fn parse(source: &str) -> CompileResult<TranslationUnit> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens).parse()
}

/// Recursive-descent parser over a fully materialized token vector.
///
/// The token vector always ends with a synthetic `Eof` token, which `pos`
/// can point at but never past — every `bump`/`expect` call checks for it
/// first rather than indexing out of bounds.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        assert!(
            !tokens.is_empty() && tokens.last().unwrap().kind == TokenKind::Eof,
            "parser expects a token stream terminated by Eof"
        );
        Self { tokens, pos: 0 }
    }

    /// Entry point: `translation_unit := (function | attributed_function)*`.
    pub fn parse(mut self) -> CompileResult<TranslationUnit> {
        self.parse_translation_unit()
    }

    // -- token stream primitives ------------------------------------------------

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn current_loc(&self) -> Location {
        self.current().loc
    }

    fn at_eof(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Unconditionally consumes and returns the current token. Reaching
    /// `Eof` here means a rule tried to consume a token that doesn't
    /// exist — an `EOFError` per the specification, not a syntax error.
    fn bump(&mut self) -> CompileResult<Token> {
        if self.at_eof() {
            return Err(CompileError::eof("unexpected end of input"));
        }
        let tok = self.tokens[self.pos].clone();
        self.pos += 1;
        Ok(tok)
    }

    fn match_token(&mut self, kind: TokenKind) -> CompileResult<bool> {
        if self.check(kind) {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes the current token if it has the expected kind, else
    /// reports `unexpected token (expected=X, actual=Y)` (or `EOFError`
    /// if the stream was already exhausted).
    fn expect(&mut self, kind: TokenKind) -> CompileResult<Token> {
        if self.check(kind) {
            return self.bump();
        }
        if self.at_eof() {
            return Err(CompileError::eof(format!(
                "unexpected end of input (expected={kind:?})"
            )));
        }
        Err(CompileError::syntax(
            format!("unexpected token (expected={:?}, actual={:?})", kind, self.current_kind()),
            self.current_loc(),
        ))
    }

    fn syntax_error(&self, message: impl Into<String>) -> CompileError {
        CompileError::syntax(message, self.current_loc())
    }

    /// True for any token kind that can begin an expression; used by
    /// `return` to decide whether a value follows.
    fn can_start_expression(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Integer
                | TokenKind::Float
                | TokenKind::Bool
                | TokenKind::Str
                | TokenKind::Ident
                | TokenKind::LParen
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Bang
                | TokenKind::Tilde
        )
    }

    /// `colon-separated type := IDENT`; used for var annotations, argument
    /// types, return types and cast targets alike. Unknown names are
    /// accepted here (they become `Type::Unknown`) — only `var` checks its
    /// annotation against `VAR_TYPES`, and that check belongs to TypePass.
    fn parse_type(&mut self) -> CompileResult<Type> {
        let tok = self.expect(TokenKind::Ident)?;
        Ok(Type::from_name(tok.ident_name()))
    }
}
