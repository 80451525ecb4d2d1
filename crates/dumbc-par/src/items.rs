//! Top-level grammar: the translation unit, attribute blocks, and function
//! (or prototype) declarations.
//!
//! ```text
//! translation_unit   := (function | attributed_function)*
//! function           := 'func' IDENT '(' arg_list? ')' (':' type)? block?
//! attributed_function := '#[' attr (',' attr)* ']' function
//! attr                := IDENT ('(' attr_arg (',' attr_arg)* ')')?
//! attr_arg            := INTEGER | FLOAT | BOOL | IDENT
//! ```
//!
//! A missing block marks a prototype-only declaration, intended to be
//! paired with `#[external]` — `AttrPass` enforces that pairing, not the
//! parser.

use dumbc_lex::TokenKind;
use dumbc_util::CompileResult;

use crate::ast::*;
use crate::Parser;

impl Parser {
    pub(crate) fn parse_translation_unit(&mut self) -> CompileResult<TranslationUnit> {
        let mut decls = Vec::new();
        while !self.at_eof() {
            decls.push(self.parse_function_decl()?);
        }
        Ok(TranslationUnit { decls, loc: TranslationUnit::ROOT_LOC })
    }

    /// A function declaration optionally preceded by one `#[...]` block.
    /// Attributes may only decorate functions; any other leading token is
    /// a syntax error, which `parse_function` naturally reports since it
    /// immediately expects `func`.
    fn parse_function_decl(&mut self) -> CompileResult<Function> {
        let attrs = if self.check(TokenKind::AttrStart) {
            Some(self.parse_attr_block()?)
        } else {
            None
        };
        self.parse_function(attrs)
    }

    fn parse_attr_block(&mut self) -> CompileResult<Vec<Attribute>> {
        self.expect(TokenKind::AttrStart)?;
        if self.check(TokenKind::RBracket) {
            return Err(self.syntax_error("empty attribute block"));
        }

        let mut attrs = vec![self.parse_attr()?];
        while self.match_token(TokenKind::Comma)? {
            attrs.push(self.parse_attr()?);
        }
        self.expect(TokenKind::RBracket)?;
        Ok(attrs)
    }

    fn parse_attr(&mut self) -> CompileResult<Attribute> {
        let loc = self.current_loc();
        let name = self.expect(TokenKind::Ident)?.ident_name();

        let args = if self.match_token(TokenKind::LParen)? {
            if self.check(TokenKind::RParen) {
                self.bump()?;
                Some(Vec::new())
            } else {
                let mut args = vec![self.parse_attr_arg()?];
                while self.match_token(TokenKind::Comma)? {
                    args.push(self.parse_attr_arg()?);
                }
                self.expect(TokenKind::RParen)?;
                Some(args)
            }
        } else {
            None
        };

        Ok(Attribute { name, args, loc })
    }

    /// `attr_arg := INTEGER | FLOAT | BOOL | IDENT` — explicitly no
    /// function calls, unlike a general expression.
    fn parse_attr_arg(&mut self) -> CompileResult<AttrArg> {
        match self.current_kind() {
            TokenKind::Integer => {
                let tok = self.bump()?;
                Ok(AttrArg::Integer(tok.value_as_int()))
            }
            TokenKind::Float => {
                let tok = self.bump()?;
                Ok(AttrArg::Float(tok.value_as_float()))
            }
            TokenKind::Bool => {
                let tok = self.bump()?;
                Ok(AttrArg::Bool(tok.value_as_bool()))
            }
            TokenKind::Ident => {
                let tok = self.bump()?;
                Ok(AttrArg::Ident(tok.ident_name()))
            }
            _ => Err(self.syntax_error("expected attribute argument (literal or identifier)")),
        }
    }

    fn parse_function(&mut self, attrs: Option<Vec<Attribute>>) -> CompileResult<Function> {
        let loc = self.current_loc();
        self.expect(TokenKind::Func)?;
        let name = self.expect(TokenKind::Ident)?.ident_name();

        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            args.push(self.parse_argument()?);
            while self.match_token(TokenKind::Comma)? {
                args.push(self.parse_argument()?);
            }
        }
        self.expect(TokenKind::RParen)?;

        let ret_ty = if self.match_token(TokenKind::Colon)? { self.parse_type()? } else { Type::Void };

        let proto = FunctionProto { name, args, ret_ty, attrs, loc };

        let body = if self.check(TokenKind::LBrace) { Some(self.parse_block()?) } else { None };

        Ok(Function { proto, body, loc })
    }

    fn parse_argument(&mut self) -> CompileResult<Argument> {
        let loc = self.current_loc();
        let name = self.expect(TokenKind::Ident)?.ident_name();
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        Ok(Argument { name, ty, loc })
    }
}
