//! dumbc-lex - Lexical Analyzer
//!
//! Scans source text into a stream of [`Token`]s terminated by a synthetic
//! `EOF`. The rule table is priority-ordered (§4.1): the first rule that
//! matches at the current position wins, which produces a handful of
//! deliberate quirks (FLOAT before INTEGER, BOOL before IDENT with no word
//! boundary) that [`Lexer`] reproduces exactly — see `lexer.rs`.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind, TokenValue};
