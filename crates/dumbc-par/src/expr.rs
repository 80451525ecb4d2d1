//! Expression grammar: precedence climbing over a single uniform operator
//! table.
//!
//! ```text
//! expr       := bin_expr(1)
//! bin_expr(p) := unary (op bin_expr(prec(op)+1))*    -- left associative
//! unary      := ('+' | '-' | '!' | '~')* primary
//! primary    := INTEGER | FLOAT | BOOL | STRING
//!             | IDENT ('(' (expr (',' expr)*)? ')')?
//!             | '(' expr ')'
//! ```
//!
//! Precedence increases with binding strength: assignment (1, including
//! every compound-assignment spelling) is loosest, `as` (12) is tightest.
//! Every operator — assignment and cast included — is folded through the
//! *same* left-associative climbing step (`right = bin_expr(prec+1)`, then
//! loop at the same level), which is what makes `x = y = z` parse as
//! `(x = y) = z` rather than the right-associative reading a dedicated
//! assignment rule would give; this is deliberately preserved — see
//! `DESIGN.md`.

use dumbc_lex::TokenKind;
use dumbc_util::{CompileResult, Symbol};

use crate::ast::*;
use crate::Parser;

/// Translates `\'`, `\"`, `\t`, `\n` to their literal characters; any other
/// backslash escape passes through unchanged (backslash and the following
/// character both kept), matching the only four sequences the
/// specification defines.
fn unescape_string(raw: Symbol) -> Symbol {
    let text = raw.as_str();
    if !text.contains('\\') {
        return raw;
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Symbol::intern(&out)
}

/// What an operator token means to the climbing loop, beyond its
/// precedence: a plain binary op, an assignment (maybe compound), or a
/// cast, whose "right-hand side" is a type rather than an expression.
enum BinKind {
    Op(Operator),
    Assign(Option<Operator>),
    Cast,
}

/// Returns `(precedence, kind)` for any token that can appear as a binary
/// operator, or `None` if `kind` can't continue a binary expression.
fn binop_info(kind: TokenKind) -> Option<(u8, BinKind)> {
    use TokenKind::*;
    Some(match kind {
        Eq => (1, BinKind::Assign(None)),
        PlusEq => (1, BinKind::Assign(Some(Operator::Add))),
        MinusEq => (1, BinKind::Assign(Some(Operator::Sub))),
        StarEq => (1, BinKind::Assign(Some(Operator::Mul))),
        SlashEq => (1, BinKind::Assign(Some(Operator::Div))),
        PercentEq => (1, BinKind::Assign(Some(Operator::Mod))),
        PipeEq => (1, BinKind::Assign(Some(Operator::BitOr))),
        AmpEq => (1, BinKind::Assign(Some(Operator::BitAnd))),
        CaretEq => (1, BinKind::Assign(Some(Operator::BitXor))),
        ShlEq => (1, BinKind::Assign(Some(Operator::Shl))),
        ShrEq => (1, BinKind::Assign(Some(Operator::Shr))),

        OrOr => (2, BinKind::Op(Operator::LogOr)),
        AndAnd => (3, BinKind::Op(Operator::LogAnd)),
        Pipe => (4, BinKind::Op(Operator::BitOr)),
        Caret => (5, BinKind::Op(Operator::BitXor)),
        Amp => (6, BinKind::Op(Operator::BitAnd)),
        EqEq => (7, BinKind::Op(Operator::Eq)),
        Ne => (7, BinKind::Op(Operator::Ne)),
        Lt => (8, BinKind::Op(Operator::Lt)),
        Le => (8, BinKind::Op(Operator::Le)),
        Gt => (8, BinKind::Op(Operator::Gt)),
        Ge => (8, BinKind::Op(Operator::Ge)),
        Shl => (9, BinKind::Op(Operator::Shl)),
        Shr => (9, BinKind::Op(Operator::Shr)),
        Plus => (10, BinKind::Op(Operator::Add)),
        Minus => (10, BinKind::Op(Operator::Sub)),
        Star => (11, BinKind::Op(Operator::Mul)),
        Slash => (11, BinKind::Op(Operator::Div)),
        Percent => (11, BinKind::Op(Operator::Mod)),
        As => (12, BinKind::Cast),

        _ => return None,
    })
}

impl Parser {
    pub(crate) fn parse_expr(&mut self) -> CompileResult<Expr> {
        self.parse_bin_expr(1)
    }

    fn parse_bin_expr(&mut self, min_prec: u8) -> CompileResult<Expr> {
        let mut left = self.parse_unary()?;

        while let Some((prec, kind)) = binop_info(self.current_kind()) {
            if prec < min_prec {
                break;
            }
            let loc = self.current_loc();
            self.bump()?;

            left = match kind {
                BinKind::Assign(op) => {
                    let rvalue = self.parse_bin_expr(prec)?;
                    Expr::Assignment {
                        lvalue: Box::new(left),
                        rvalue: Box::new(rvalue),
                        op,
                        ty: None,
                        loc,
                    }
                }
                BinKind::Cast => {
                    let dst_ty = self.parse_type()?;
                    Expr::Cast { value: Box::new(left), src_ty: None, dst_ty, ty: None, loc }
                }
                BinKind::Op(operator) => {
                    let right = self.parse_bin_expr(prec + 1)?;
                    Expr::BinaryOp {
                        op: operator,
                        left: Box::new(left),
                        right: Box::new(right),
                        ty: None,
                        loc,
                    }
                }
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CompileResult<Expr> {
        let op = match self.current_kind() {
            TokenKind::Plus => Some(Operator::Pos),
            TokenKind::Minus => Some(Operator::Neg),
            TokenKind::Bang => Some(Operator::LogNot),
            TokenKind::Tilde => Some(Operator::BitNot),
            _ => None,
        };

        match op {
            Some(op) => {
                let loc = self.current_loc();
                self.bump()?;
                let value = self.parse_unary()?;
                Ok(Expr::UnaryOp { op, value: Box::new(value), ty: None, loc })
            }
            None => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> CompileResult<Expr> {
        let loc = self.current_loc();
        match self.current_kind() {
            TokenKind::Integer => {
                let tok = self.bump()?;
                Ok(Expr::IntegerConstant { value: tok.value_as_int(), ty: None, loc })
            }
            TokenKind::Float => {
                let tok = self.bump()?;
                Ok(Expr::FloatConstant { value: tok.value_as_float(), ty: None, loc })
            }
            TokenKind::Bool => {
                let tok = self.bump()?;
                Ok(Expr::BooleanConstant { value: tok.value_as_bool(), ty: None, loc })
            }
            TokenKind::Str => {
                let tok = self.bump()?;
                Ok(Expr::StringConstant { value: unescape_string(tok.string_value()), ty: None, loc })
            }
            TokenKind::Ident => {
                let tok = self.bump()?;
                if self.match_token(TokenKind::LParen)? {
                    let mut args = Vec::new();
                    if !self.check(TokenKind::RParen) {
                        args.push(self.parse_expr()?);
                        while self.match_token(TokenKind::Comma)? {
                            args.push(self.parse_expr()?);
                        }
                    }
                    self.expect(TokenKind::RParen)?;
                    Ok(Expr::FuncCall { name: tok.ident_name(), args, ty: None, loc })
                } else {
                    Ok(Expr::Identifier { name: tok.ident_name(), ty: None, loc })
                }
            }
            TokenKind::LParen => {
                self.bump()?;
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.syntax_error("expected an expression")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use crate::ast::*;

    fn first_expr(src: &str) -> Expr {
        let tu = parse(src).unwrap();
        match &tu.decls[0].body.as_ref().unwrap().stmts[0] {
            Stmt::Expression { expr, .. } => expr.clone(),
            Stmt::Return { value: Some(expr), .. } => expr.clone(),
            other => panic!("expected an expression statement, got {other:?}"),
        }
    }

    #[test]
    fn arithmetic_respects_precedence() {
        // 1 + 2 * 3 must parse as 1 + (2 * 3), not (1 + 2) * 3.
        let expr = first_expr("func f() { return 1 + 2 * 3 }");
        match expr {
            Expr::BinaryOp { op: Operator::Add, right, .. } => {
                assert!(matches!(*right, Expr::BinaryOp { op: Operator::Mul, .. }));
            }
            other => panic!("expected top-level Add, got {other:?}"),
        }
    }

    #[test]
    fn chained_assignment_is_left_associative() {
        // x = y = z parses as (x = y) = z, not x = (y = z).
        let expr = first_expr("func f() { x = y = z }");
        match expr {
            Expr::Assignment { lvalue, rvalue, .. } => {
                assert!(matches!(*lvalue, Expr::Assignment { .. }));
                assert!(matches!(*rvalue, Expr::Identifier { .. }));
            }
            other => panic!("expected top-level Assignment, got {other:?}"),
        }
    }

    #[test]
    fn compound_assignment_carries_its_operator() {
        let expr = first_expr("func f() { x += 1 }");
        match expr {
            Expr::Assignment { op: Some(Operator::Add), .. } => {}
            other => panic!("expected compound Add assignment, got {other:?}"),
        }
    }

    #[test]
    fn cast_binds_tighter_than_arithmetic() {
        // 1 + x as i32 parses as 1 + (x as i32).
        let expr = first_expr("func f() { return 1 + x as i32 }");
        match expr {
            Expr::BinaryOp { op: Operator::Add, right, .. } => {
                assert!(matches!(*right, Expr::Cast { dst_ty: Type::I32, .. }));
            }
            other => panic!("expected top-level Add, got {other:?}"),
        }
    }

    #[test]
    fn unary_minus_is_right_recursive() {
        let expr = first_expr("func f() { return --x }");
        match expr {
            Expr::UnaryOp { op: Operator::Neg, value, .. } => {
                assert!(matches!(*value, Expr::UnaryOp { op: Operator::Neg, .. }));
            }
            other => panic!("expected nested unary Neg, got {other:?}"),
        }
    }

    #[test]
    fn function_call_with_arguments() {
        let expr = first_expr("func f() { return add(1, 2) }");
        match expr {
            Expr::FuncCall { args, .. } => assert_eq!(args.len(), 2),
            other => panic!("expected FuncCall, got {other:?}"),
        }
    }

    #[test]
    fn parenthesized_expression_overrides_precedence() {
        // (1 + 2) * 3 must parse as Mul(Add(1,2), 3).
        let expr = first_expr("func f() { return (1 + 2) * 3 }");
        match expr {
            Expr::BinaryOp { op: Operator::Mul, left, .. } => {
                assert!(matches!(*left, Expr::BinaryOp { op: Operator::Add, .. }));
            }
            other => panic!("expected top-level Mul, got {other:?}"),
        }
    }

    #[test]
    fn logical_or_binds_looser_than_logical_and() {
        let expr = first_expr("func f() { return a || b && c }");
        match expr {
            Expr::BinaryOp { op: Operator::LogOr, right, .. } => {
                assert!(matches!(*right, Expr::BinaryOp { op: Operator::LogAnd, .. }));
            }
            other => panic!("expected top-level LogOr, got {other:?}"),
        }
    }

    #[test]
    fn string_literal_escapes_are_translated_at_parse_time() {
        let expr = first_expr(r#"func f() { return "a\tb\nc\"d\'e" }"#);
        match expr {
            Expr::StringConstant { value, .. } => {
                assert_eq!(value.as_str(), "a\tb\nc\"d'e");
            }
            other => panic!("expected StringConstant, got {other:?}"),
        }
    }

    #[test]
    fn relational_binds_looser_than_shift() {
        let expr = first_expr("func f() { return a < b << c }");
        match expr {
            Expr::BinaryOp { op: Operator::Lt, right, .. } => {
                assert!(matches!(*right, Expr::BinaryOp { op: Operator::Shl, .. }));
            }
            other => panic!("expected top-level Lt, got {other:?}"),
        }
    }
}
