//! Token kinds and the [`Token`] produced by the lexer.
//!
//! The kind set mirrors the closed partition in the scanning table: literals,
//! keywords, operators/punctuation, structural markers, and `EOF`. Keyword
//! promotion means [`TokenKind::Ident`] never reaches the parser spelled as
//! one of the nine reserved words below; the lexer retags it first.

use dumbc_util::{Location, Symbol};

/// The nine reserved words. An `IDENT` lexeme matching one of these is
/// re-tagged as the corresponding keyword kind.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("func", TokenKind::Func),
    ("return", TokenKind::Return),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("as", TokenKind::As),
    ("var", TokenKind::Var),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Integer,
    Float,
    Bool,
    Str,
    Ident,

    // Keywords
    Func,
    Return,
    If,
    Else,
    While,
    Break,
    Continue,
    As,
    Var,

    // Multi-char operators
    ShlEq,
    ShrEq,
    Shl,
    Shr,
    OrOr,
    AndAnd,
    Le,
    Ge,
    EqEq,
    Ne,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    PipeEq,
    AmpEq,
    CaretEq,

    // Single-char operators
    Lt,
    Gt,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Pipe,
    Amp,
    Caret,
    Bang,
    Eq,
    Tilde,

    // Structural
    AttrStart,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Colon,
    Semicolon,
    Comma,

    Eof,
}

impl TokenKind {
    /// True for every compound-assignment operator kind (§precedence table,
    /// level 1), used by the parser to decide whether a binary operator is
    /// actually an assignment in disguise.
    pub fn is_compound_assign(self) -> bool {
        matches!(
            self,
            TokenKind::ShlEq
                | TokenKind::ShrEq
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::PercentEq
                | TokenKind::PipeEq
                | TokenKind::AmpEq
                | TokenKind::CaretEq
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The value carried by a token, when its kind implies one. Structural and
/// operator tokens carry `None`.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    None,
    Int(u64),
    Float(f64),
    Bool(bool),
    /// Interned text shared by identifiers and string literals. String
    /// text is the raw, still-escaped content between the quotes — escape
    /// processing is the parser's job, not the lexer's.
    Str(Symbol),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub loc: Location,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, loc: Location) -> Self {
        Self { kind, value, loc }
    }

    pub fn ident_name(&self) -> Symbol {
        match &self.value {
            TokenValue::Str(s) => *s,
            _ => panic!("token {:?} carries no identifier name", self.kind),
        }
    }

    pub fn value_as_int(&self) -> u64 {
        match self.value {
            TokenValue::Int(v) => v,
            _ => panic!("token {:?} carries no integer value", self.kind),
        }
    }

    pub fn value_as_float(&self) -> f64 {
        match self.value {
            TokenValue::Float(v) => v,
            _ => panic!("token {:?} carries no float value", self.kind),
        }
    }

    pub fn value_as_bool(&self) -> bool {
        match self.value {
            TokenValue::Bool(v) => v,
            _ => panic!("token {:?} carries no boolean value", self.kind),
        }
    }

    pub fn string_value(&self) -> Symbol {
        match self.value {
            TokenValue::Str(s) => s,
            _ => panic!("token {:?} carries no string value", self.kind),
        }
    }
}
