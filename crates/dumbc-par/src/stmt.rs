//! Statement grammar.
//!
//! ```text
//! block        := '{' stmt* '}'
//! stmt         := if_stmt | while_stmt | 'break' | 'continue'
//!               | return_stmt | var_stmt | block | expr_stmt
//! if_stmt      := 'if' expr block ('else' (if_stmt | block))?
//! while_stmt   := 'while' expr block
//! return_stmt  := 'return' expr?
//! var_stmt     := 'var' IDENT (':' type)? '=' expr
//! expr_stmt    := expr
//! ```
//!
//! Semicolons between statements are optional and are simply skipped
//! wherever they appear, inside or between statements — they carry no
//! grammatical weight.

use dumbc_lex::TokenKind;
use dumbc_util::CompileResult;

use crate::ast::*;
use crate::Parser;

impl Parser {
    pub(crate) fn parse_block(&mut self) -> CompileResult<Block> {
        let loc = self.current_loc();
        self.expect(TokenKind::LBrace)?;

        let mut stmts = Vec::new();
        self.skip_semicolons()?;
        while !self.check(TokenKind::RBrace) {
            stmts.push(self.parse_stmt()?);
            self.skip_semicolons()?;
        }
        self.expect(TokenKind::RBrace)?;

        Ok(Block { stmts, loc })
    }

    fn skip_semicolons(&mut self) -> CompileResult<()> {
        while self.match_token(TokenKind::Semicolon)? {}
        Ok(())
    }

    fn parse_stmt(&mut self) -> CompileResult<Stmt> {
        match self.current_kind() {
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Break => {
                let loc = self.current_loc();
                self.bump()?;
                Ok(Stmt::Break { loc })
            }
            TokenKind::Continue => {
                let loc = self.current_loc();
                self.bump()?;
                Ok(Stmt::Continue { loc })
            }
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Var => self.parse_var_stmt(),
            TokenKind::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            _ => self.parse_expr_stmt(),
        }
    }

    fn parse_if_stmt(&mut self) -> CompileResult<Stmt> {
        let loc = self.current_loc();
        self.expect(TokenKind::If)?;
        let cond = self.parse_expr()?;
        let then = self.parse_block()?;

        let otherwise = if self.match_token(TokenKind::Else)? {
            if self.check(TokenKind::If) {
                Some(Box::new(self.parse_if_stmt()?))
            } else {
                Some(Box::new(Stmt::Block(self.parse_block()?)))
            }
        } else {
            None
        };

        Ok(Stmt::If { cond, then, otherwise, loc })
    }

    fn parse_while_stmt(&mut self) -> CompileResult<Stmt> {
        let loc = self.current_loc();
        self.expect(TokenKind::While)?;
        let cond = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::While { cond, body, loc })
    }

    fn parse_return_stmt(&mut self) -> CompileResult<Stmt> {
        let loc = self.current_loc();
        self.expect(TokenKind::Return)?;
        let value = if self.can_start_expression() { Some(self.parse_expr()?) } else { None };
        Ok(Stmt::Return { value, loc })
    }

    fn parse_var_stmt(&mut self) -> CompileResult<Stmt> {
        let loc = self.current_loc();
        self.expect(TokenKind::Var)?;
        let name = self.expect(TokenKind::Ident)?.ident_name();
        let ty = if self.match_token(TokenKind::Colon)? { Some(self.parse_type()?) } else { None };
        self.expect(TokenKind::Eq)?;
        let initial_value = self.parse_expr()?;
        Ok(Stmt::Var { name, ty, initial_value, loc })
    }

    fn parse_expr_stmt(&mut self) -> CompileResult<Stmt> {
        let loc = self.current_loc();
        let expr = self.parse_expr()?;
        Ok(Stmt::Expression { expr, loc })
    }
}
