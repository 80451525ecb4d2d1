//! Hand-rolled priority-ordered scanner.
//!
//! There is no regex engine in the dependency stack, so the ordered rule
//! table is implemented directly as a sequence of "try this, fall back to
//! that" dispatch arms. The ordering between arms is significant and
//! reproduces deliberate quirks of the original scanner:
//!
//! - `FLOAT` is attempted before `INTEGER` at any digit (or bare `.`), with
//!   the match backtracking to `INTEGER` if no `.` follows the leading
//!   digit run, or if the `.` isn't followed by at least one digit.
//! - `true`/`false` are matched as a literal prefix *before* identifier
//!   scanning, with no word-boundary check — `truefoo` lexes as `BOOL(true)`
//!   followed by `IDENT(foo)`, not a single identifier.
//! - An unterminated string (no closing quote before a newline or EOF)
//!   fails to match at all, rather than producing a partial token; the
//!   opening quote is then reported as the unexpected character.

use dumbc_util::{CompileError, CompileResult, Location, Symbol};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind, TokenValue, KEYWORDS};

pub struct Lexer<'source> {
    cursor: Cursor<'source>,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Scan every token up to and including the terminal `EOF`.
    pub fn tokenize(mut self) -> CompileResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Scan and return the next token, skipping whitespace and comments
    /// first. Returns a synthetic `EOF` token (never an error) once the
    /// input is exhausted.
    pub fn next_token(&mut self) -> CompileResult<Token> {
        self.skip_trivia();

        let line = self.cursor.line();
        let column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Ok(Token::new(TokenKind::Eof, TokenValue::None, Location::new(line, column, 0)));
        }

        let c = self.cursor.current_char();
        if c.is_ascii_digit() || c == '.' {
            return self.lex_number(line, column);
        }
        if c.is_ascii_alphabetic() || c == '_' {
            return self.lex_ident_or_bool(line, column);
        }
        if c == '"' || c == '\'' {
            return self.lex_string(c, line, column);
        }
        self.lex_symbol(line, column)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' => {
                    self.cursor.advance();
                }
                '\n' => {
                    self.cursor.advance();
                }
                '#' if self.cursor.peek_char(1) != '[' => {
                    while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn lex_number(&mut self, line: u32, column: u32) -> CompileResult<Token> {
        let start = self.cursor.position();

        if self.try_lex_float() {
            let text = self.cursor.slice_from(start);
            let extent = text.chars().count() as u32;
            let value: f64 = text
                .parse()
                .map_err(|_| CompileError::value(format!("malformed float literal {text:?}"), Location::new(line, column, extent)))?;
            return Ok(Token::new(TokenKind::Float, TokenValue::Float(value), Location::new(line, column, extent)));
        }

        if self.cursor.current_char().is_ascii_digit() {
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
            let text = self.cursor.slice_from(start);
            let extent = text.chars().count() as u32;
            let value: u64 = text.parse().map_err(|_| {
                CompileError::value(format!("integer literal out of range {text:?}"), Location::new(line, column, extent))
            })?;
            return Ok(Token::new(TokenKind::Integer, TokenValue::Int(value), Location::new(line, column, extent)));
        }

        Err(self.unexpected_char_error(line, column))
    }

    /// Attempts `\d*\.\d+([eE][-+]?\d+)?` at the cursor's current position.
    /// Leaves the cursor past the match on success; restores it unchanged
    /// on failure.
    fn try_lex_float(&mut self) -> bool {
        let snapshot = self.cursor.snapshot();

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.current_char() != '.' {
            self.cursor.restore(snapshot);
            return false;
        }
        self.cursor.advance();

        let mut frac_digits = 0;
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
            frac_digits += 1;
        }
        if frac_digits == 0 {
            self.cursor.restore(snapshot);
            return false;
        }

        if self.cursor.current_char() == 'e' || self.cursor.current_char() == 'E' {
            let exp_snapshot = self.cursor.snapshot();
            self.cursor.advance();
            if self.cursor.current_char() == '+' || self.cursor.current_char() == '-' {
                self.cursor.advance();
            }
            let mut exp_digits = 0;
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
                exp_digits += 1;
            }
            if exp_digits == 0 {
                self.cursor.restore(exp_snapshot);
            }
        }

        true
    }

    fn lex_ident_or_bool(&mut self, line: u32, column: u32) -> CompileResult<Token> {
        let start = self.cursor.position();

        if self.literal_prefix_is("true") {
            self.cursor.advance_n(4);
            return Ok(Token::new(TokenKind::Bool, TokenValue::Bool(true), Location::new(line, column, 4)));
        }
        if self.literal_prefix_is("false") {
            self.cursor.advance_n(5);
            return Ok(Token::new(TokenKind::Bool, TokenValue::Bool(false), Location::new(line, column, 5)));
        }

        while {
            let c = self.cursor.current_char();
            c.is_ascii_alphanumeric() || c == '_'
        } {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(start);
        let extent = text.chars().count() as u32;

        if let Some((_, kind)) = KEYWORDS.iter().find(|(kw, _)| *kw == text) {
            return Ok(Token::new(*kind, TokenValue::None, Location::new(line, column, extent)));
        }

        let sym = Symbol::intern(text);
        Ok(Token::new(TokenKind::Ident, TokenValue::Str(sym), Location::new(line, column, extent)))
    }

    /// Scans a string literal without interpreting its escapes; the raw
    /// (still-escaped) text between the quotes is interned as-is. Escape
    /// processing happens in the parser, which is the stage the
    /// specification assigns it to.
    fn lex_string(&mut self, quote: char, line: u32, column: u32) -> CompileResult<Token> {
        let snapshot = self.cursor.snapshot();
        let start = self.cursor.position();
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
                self.cursor.restore(snapshot);
                return Err(self.unexpected_char_error(line, column));
            }
            let c = self.cursor.current_char();
            if c == '\\' {
                self.cursor.advance();
                if self.cursor.is_at_end() {
                    self.cursor.restore(snapshot);
                    return Err(self.unexpected_char_error(line, column));
                }
                self.cursor.advance();
                continue;
            }
            if c == quote {
                self.cursor.advance();
                break;
            }
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(start);
        let inner = &raw[1..raw.len() - 1];
        let extent = raw.chars().count() as u32;
        let sym = Symbol::intern(inner);
        Ok(Token::new(TokenKind::Str, TokenValue::Str(sym), Location::new(line, column, extent)))
    }

    fn lex_symbol(&mut self, line: u32, column: u32) -> CompileResult<Token> {
        macro_rules! single {
            ($kind:expr) => {{
                self.cursor.advance();
                Ok(Token::new($kind, TokenValue::None, Location::new(line, column, 1)))
            }};
        }

        match self.cursor.current_char() {
            '#' if self.cursor.peek_char(1) == '[' => {
                self.cursor.advance_n(2);
                Ok(Token::new(TokenKind::AttrStart, TokenValue::None, Location::new(line, column, 2)))
            }
            '<' => self.lex_multi(line, column, &[("<<=", TokenKind::ShlEq), ("<<", TokenKind::Shl), ("<=", TokenKind::Le)], TokenKind::Lt),
            '>' => self.lex_multi(line, column, &[(">>=", TokenKind::ShrEq), (">>", TokenKind::Shr), (">=", TokenKind::Ge)], TokenKind::Gt),
            '|' => self.lex_multi(line, column, &[("||", TokenKind::OrOr), ("|=", TokenKind::PipeEq)], TokenKind::Pipe),
            '&' => self.lex_multi(line, column, &[("&&", TokenKind::AndAnd), ("&=", TokenKind::AmpEq)], TokenKind::Amp),
            '=' => self.lex_multi(line, column, &[("==", TokenKind::EqEq)], TokenKind::Eq),
            '!' => self.lex_multi(line, column, &[("!=", TokenKind::Ne)], TokenKind::Bang),
            '+' => self.lex_multi(line, column, &[("+=", TokenKind::PlusEq)], TokenKind::Plus),
            '-' => self.lex_multi(line, column, &[("-=", TokenKind::MinusEq)], TokenKind::Minus),
            '*' => self.lex_multi(line, column, &[("*=", TokenKind::StarEq)], TokenKind::Star),
            '/' => self.lex_multi(line, column, &[("/=", TokenKind::SlashEq)], TokenKind::Slash),
            '%' => self.lex_multi(line, column, &[("%=", TokenKind::PercentEq)], TokenKind::Percent),
            '^' => self.lex_multi(line, column, &[("^=", TokenKind::CaretEq)], TokenKind::Caret),
            '~' => single!(TokenKind::Tilde),
            '(' => single!(TokenKind::LParen),
            ')' => single!(TokenKind::RParen),
            '[' => single!(TokenKind::LBracket),
            ']' => single!(TokenKind::RBracket),
            '{' => single!(TokenKind::LBrace),
            '}' => single!(TokenKind::RBrace),
            ':' => single!(TokenKind::Colon),
            ';' => single!(TokenKind::Semicolon),
            ',' => single!(TokenKind::Comma),
            _ => Err(self.unexpected_char_error(line, column)),
        }
    }

    fn lex_multi(&mut self, line: u32, column: u32, candidates: &[(&str, TokenKind)], fallback: TokenKind) -> CompileResult<Token> {
        for (text, kind) in candidates {
            if self.literal_prefix_is(text) {
                let len = text.chars().count();
                self.cursor.advance_n(len);
                return Ok(Token::new(*kind, TokenValue::None, Location::new(line, column, len as u32)));
            }
        }
        self.cursor.advance();
        Ok(Token::new(fallback, TokenValue::None, Location::new(line, column, 1)))
    }

    fn literal_prefix_is(&self, word: &str) -> bool {
        word.chars().enumerate().all(|(i, c)| self.cursor.char_at(i) == c)
    }

    fn unexpected_char_error(&self, line: u32, column: u32) -> CompileError {
        let c = self.cursor.current_char();
        CompileError::value(format!("unexpected character {c:?}"), Location::new(line, column, 1))
    }
}
