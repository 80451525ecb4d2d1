//! TypePass (§4.4): assigns a concrete type to every expression,
//! validates operator operands, and materializes implicit conversions
//! as `Cast` nodes.
//!
//! Runs in two phases per the "pre-scan for forward references" design
//! note: first every top-level function's signature is collected into
//! `func_sigs` (duplicate names rejected here), then each body is
//! visited with that table already complete, so forward and mutually
//! recursive calls resolve regardless of declaration order.

use dumbc_par::{Block, Expr, Function, Operator, Stmt, TranslationUnit, Type};
use dumbc_util::{CompileError, CompileResult, Location, Symbol};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::scope::SymbolTable;
use crate::types::{builtin_type_conversion, builtin_type_promotion};

#[derive(Clone)]
struct FuncSig {
    arg_types: Vec<Type>,
    ret_ty: Type,
}

pub struct TypePass {
    func_sigs: FxHashMap<Symbol, FuncSig>,
}

impl Default for TypePass {
    fn default() -> Self {
        Self::new()
    }
}

impl TypePass {
    pub fn new() -> Self {
        Self { func_sigs: FxHashMap::default() }
    }

    pub fn run(&mut self, tu: &mut TranslationUnit) -> CompileResult<()> {
        self.prescan(tu)?;
        for func in &mut tu.decls {
            self.visit_function(func)?;
        }
        Ok(())
    }

    fn prescan(&mut self, tu: &TranslationUnit) -> CompileResult<()> {
        for func in &tu.decls {
            let name = func.proto.name;
            if self.func_sigs.contains_key(&name) {
                return Err(CompileError::name(
                    format!("duplicate function '{}'", name),
                    func.loc,
                ));
            }
            let arg_types = func.proto.args.iter().map(|a| a.ty).collect();
            self.func_sigs.insert(name, FuncSig { arg_types, ret_ty: func.proto.ret_ty });
        }
        Ok(())
    }

    fn visit_function(&mut self, func: &mut Function) -> CompileResult<()> {
        let mut scope: SymbolTable<Type> = SymbolTable::new();
        let mut frame = scope.scoped();

        let mut seen = FxHashSet::default();
        for arg in &func.proto.args {
            if !seen.insert(arg.name) {
                return Err(CompileError::name(
                    format!("duplicate argument '{}'", arg.name),
                    arg.loc,
                ));
            }
            if arg.ty == Type::Void {
                return Err(CompileError::ty(
                    format!("argument '{}' cannot have type void", arg.name),
                    arg.loc,
                ));
            }
            frame.set(arg.name, arg.ty);
        }

        if let Some(body) = &mut func.body {
            Self::visit_block_in(&mut frame, body, func.proto.ret_ty, &self.func_sigs)?;
        }

        Ok(())
    }

    // Associated rather than `&mut self` so the borrow on `func_sigs` (read
    // only from here down) doesn't fight the `&mut scope` borrow above.
    fn visit_block_in(
        scope: &mut SymbolTable<Type>,
        block: &mut Block,
        ret_ty: Type,
        func_sigs: &FxHashMap<Symbol, FuncSig>,
    ) -> CompileResult<()> {
        let mut frame = scope.scoped();
        for stmt in &mut block.stmts {
            Self::visit_stmt(&mut frame, stmt, ret_ty, func_sigs)?;
        }
        Ok(())
    }

    fn visit_stmt(
        scope: &mut SymbolTable<Type>,
        stmt: &mut Stmt,
        ret_ty: Type,
        func_sigs: &FxHashMap<Symbol, FuncSig>,
    ) -> CompileResult<()> {
        match stmt {
            Stmt::Block(block) => Self::visit_block_in(scope, block, ret_ty, func_sigs),
            Stmt::If { cond, then, otherwise, loc } => {
                let cond_ty = Self::visit_expr(scope, cond, func_sigs)?;
                if cond_ty != Type::Bool {
                    return Err(CompileError::ty("if condition must be bool", *loc));
                }
                Self::visit_block_in(scope, then, ret_ty, func_sigs)?;
                if let Some(otherwise) = otherwise {
                    Self::visit_stmt(scope, otherwise, ret_ty, func_sigs)?;
                }
                Ok(())
            }
            Stmt::While { cond, body, loc } => {
                let cond_ty = Self::visit_expr(scope, cond, func_sigs)?;
                if cond_ty != Type::Bool {
                    return Err(CompileError::ty("while condition must be bool", *loc));
                }
                Self::visit_block_in(scope, body, ret_ty, func_sigs)
            }
            Stmt::Break { .. } | Stmt::Continue { .. } => Ok(()),
            Stmt::Return { value, loc } => match (value, ret_ty) {
                (None, Type::Void) => Ok(()),
                (None, _) => Err(CompileError::ty("missing return value", *loc)),
                (Some(_), Type::Void) => {
                    Err(CompileError::ty("void function must not return a value", *loc))
                }
                (Some(expr), ret_ty) => {
                    let vt = Self::visit_expr(scope, expr, func_sigs)?;
                    Self::coerce(expr, vt, ret_ty, *loc)
                }
            },
            Stmt::Var { name, ty, initial_value, loc } => {
                let init_ty = Self::visit_expr(scope, initial_value, func_sigs)?;
                let final_ty = match ty {
                    None => init_ty,
                    Some(annotated) => {
                        if !annotated.is_var_type() {
                            return Err(CompileError::ty(
                                format!("'{}' is not a valid variable type", annotated.name()),
                                *loc,
                            ));
                        }
                        if *annotated != init_ty {
                            Self::coerce(initial_value, init_ty, *annotated, *loc)?;
                        }
                        *annotated
                    }
                };
                scope.set(*name, final_ty);
                Ok(())
            }
            Stmt::Expression { expr, .. } => {
                Self::visit_expr(scope, expr, func_sigs)?;
                Ok(())
            }
        }
    }

    fn visit_expr(
        scope: &mut SymbolTable<Type>,
        expr: &mut Expr,
        func_sigs: &FxHashMap<Symbol, FuncSig>,
    ) -> CompileResult<Type> {
        match expr {
            Expr::IntegerConstant { ty, .. } => {
                *ty = Some(Type::I32);
                Ok(Type::I32)
            }
            Expr::FloatConstant { ty, .. } => {
                *ty = Some(Type::F32);
                Ok(Type::F32)
            }
            Expr::BooleanConstant { ty, .. } => {
                *ty = Some(Type::Bool);
                Ok(Type::Bool)
            }
            Expr::StringConstant { ty, .. } => {
                *ty = Some(Type::Str);
                Ok(Type::Str)
            }
            Expr::Identifier { name, ty, loc } => {
                let found = scope
                    .get(*name)
                    .ok_or_else(|| CompileError::name(format!("undefined variable '{}'", name), *loc))?;
                *ty = Some(found);
                Ok(found)
            }
            Expr::FuncCall { name, args, ty, loc } => {
                let sig = func_sigs
                    .get(name)
                    .cloned()
                    .ok_or_else(|| CompileError::name(format!("undefined function '{}'", name), *loc))?;
                if args.len() != sig.arg_types.len() {
                    return Err(CompileError::ty(
                        format!(
                            "{}() takes {} arguments ({} given)",
                            name,
                            sig.arg_types.len(),
                            args.len()
                        ),
                        *loc,
                    ));
                }
                for (arg, &param_ty) in args.iter_mut().zip(sig.arg_types.iter()) {
                    let arg_loc = arg.loc();
                    let at = Self::visit_expr(scope, arg, func_sigs)?;
                    if at != param_ty {
                        Self::coerce(arg, at, param_ty, arg_loc)?;
                    }
                }
                *ty = Some(sig.ret_ty);
                Ok(sig.ret_ty)
            }
            Expr::UnaryOp { op, value, ty, loc } => {
                let vt = Self::visit_expr(scope, value, func_sigs)?;
                match op {
                    Operator::LogNot if vt != Type::Bool => {
                        return Err(CompileError::ty("'!' requires a bool operand", *loc));
                    }
                    Operator::BitNot if !vt.is_integer() => {
                        return Err(CompileError::ty("'~' requires an integer operand", *loc));
                    }
                    (Operator::Pos | Operator::Neg) if !vt.is_numerical() => {
                        return Err(CompileError::ty("unary +/- requires a numerical operand", *loc));
                    }
                    _ => {}
                }
                *ty = Some(vt);
                Ok(vt)
            }
            Expr::Cast { value, src_ty, dst_ty, ty, loc } => {
                let vt = Self::visit_expr(scope, value, func_sigs)?;
                *src_ty = Some(vt);
                if *dst_ty == Type::Str || *dst_ty == Type::Void {
                    return Err(CompileError::ty(
                        format!("cannot cast to '{}'", dst_ty.name()),
                        *loc,
                    ));
                }
                *ty = Some(*dst_ty);
                Ok(*dst_ty)
            }
            Expr::BinaryOp { op, left, right, ty, loc } => {
                let left_loc = left.loc();
                let right_loc = right.loc();
                let lt = Self::visit_expr(scope, left, func_sigs)?;
                let rt = Self::visit_expr(scope, right, func_sigs)?;
                let common = builtin_type_conversion(lt, rt).ok_or_else(|| {
                    CompileError::ty(
                        format!("incompatible operand types '{}' and '{}'", lt.name(), rt.name()),
                        *loc,
                    )
                })?;
                validate_operator_category(*op, common, *loc)?;

                if lt != common {
                    Self::coerce(left, lt, common, left_loc)?;
                }
                if rt != common {
                    Self::coerce(right, rt, common, right_loc)?;
                }

                let result_ty = if op.produces_bool() { Type::Bool } else { common };
                *ty = Some(result_ty);
                Ok(result_ty)
            }
            Expr::Assignment { lvalue, rvalue, op, ty, loc } => {
                if !matches!(**lvalue, Expr::Identifier { .. }) {
                    return Err(CompileError::ty("assignment target must be an identifier", *loc));
                }
                let lt = Self::visit_expr(scope, lvalue, func_sigs)?;
                let rt = Self::visit_expr(scope, rvalue, func_sigs)?;

                if let Some(operator) = op {
                    let common = builtin_type_conversion(lt, rt).ok_or_else(|| {
                        CompileError::ty(
                            format!("incompatible operand types '{}' and '{}'", lt.name(), rt.name()),
                            *loc,
                        )
                    })?;
                    validate_operator_category(*operator, common, *loc)?;
                }

                if rt != lt {
                    Self::coerce(rvalue, rt, lt, *loc)?;
                }

                *ty = Some(lt);
                Ok(lt)
            }
        }
    }

    /// Replaces `expr` in place with a `Cast` node if `from` can be
    /// implicitly promoted to `to`; errors otherwise. A no-op if the types
    /// already match.
    fn coerce(expr: &mut Expr, from: Type, to: Type, loc: Location) -> CompileResult<()> {
        if from == to {
            return Ok(());
        }
        if builtin_type_promotion(from, to).is_none() {
            return Err(CompileError::ty(
                format!("cannot convert '{}' to '{}'", from.name(), to.name()),
                loc,
            ));
        }
        let placeholder = Expr::IntegerConstant { value: 0, ty: None, loc };
        let original = std::mem::replace(expr, placeholder);
        *expr = Expr::Cast {
            value: Box::new(original),
            src_ty: Some(from),
            dst_ty: to,
            ty: Some(to),
            loc,
        };
        Ok(())
    }
}

/// Shared by `BinaryOp` and compound `Assignment` — compound assignment
/// is validated "as if the corresponding BinaryOp were being type-checked"
/// so that e.g. a non-bitwise common type rejects `x &= 1.0`.
fn validate_operator_category(op: Operator, common: Type, loc: Location) -> CompileResult<()> {
    if op.is_logical() {
        if common != Type::Bool {
            return Err(CompileError::ty("logical operator requires bool operands", loc));
        }
    } else if op.is_bitwise() {
        if !common.is_integer() {
            return Err(CompileError::ty("bitwise operator requires integer operands", loc));
        }
    } else if op.is_shift() {
        if !common.is_integer() {
            return Err(CompileError::ty("shift operator requires integer operands", loc));
        }
    } else if op.is_relational() && !op.is_equality() {
        if !common.is_numerical() {
            return Err(CompileError::ty("relational operator requires numerical operands", loc));
        }
    } else if op.is_arithmetic() && !common.is_numerical() {
        return Err(CompileError::ty("arithmetic operator requires numerical operands", loc));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dumbc_par::parse;

    fn run(src: &str) -> CompileResult<TranslationUnit> {
        let mut tu = parse(src).unwrap();
        TypePass::new().run(&mut tu)?;
        Ok(tu)
    }

    #[test]
    fn s1_arithmetic_promotion_inserts_cast() {
        let tu = run("func main(): i32 { var x: f32 = 1 return 0 }").unwrap();
        match &tu.decls[0].body.as_ref().unwrap().stmts[0] {
            Stmt::Var { initial_value: Expr::Cast { dst_ty: Type::F32, .. }, .. } => {}
            other => panic!("expected a Cast initializer, got {other:?}"),
        }
    }

    #[test]
    fn s2_rejected_implicit_narrowing() {
        let err = run("func main(): i32 { var x: i32 = 1.0 return 0 }").unwrap_err();
        assert!(matches!(err, CompileError::Type { .. }));
    }

    #[test]
    fn s3_boolean_condition_required() {
        assert!(run("func main(): i32 { if 1 { } else { } return 0 }").is_err());
        assert!(run("func main(): i32 { if true { } else { } return 0 }").is_ok());
    }

    #[test]
    fn s4_arity_mismatch() {
        let err = run("func foo(): void {} func main(): i32 { foo(1) return 0 }").unwrap_err();
        assert!(matches!(err, CompileError::Type { .. }));
    }

    #[test]
    fn forward_reference_resolves_via_prescan() {
        assert!(run("func main(): i32 { return helper() } func helper(): i32 { return 1 }").is_ok());
    }

    #[test]
    fn duplicate_function_name_is_a_name_error() {
        let err = run("func f(): void {} func f(): void {}").unwrap_err();
        assert!(matches!(err, CompileError::Name { .. }));
    }

    #[test]
    fn undefined_identifier_is_a_name_error() {
        let err = run("func main(): i32 { return y }").unwrap_err();
        assert!(matches!(err, CompileError::Name { .. }));
    }

    #[test]
    fn compound_logical_assignment_is_rejected() {
        // There is no `||=` token, but `&=` on a float common type must
        // still fail the same way a bitwise BinaryOp would.
        let err = run("func main(): i32 { var x: f32 = 1.0 x &= 2.0 return 0 }").unwrap_err();
        assert!(matches!(err, CompileError::Type { .. }));
    }

    #[test]
    fn assignment_target_must_be_an_identifier() {
        let err = run("func main(): i32 { 1 = 2 return 0 }").unwrap_err();
        assert!(matches!(err, CompileError::Type { .. }));
    }

    #[test]
    fn signed_initializer_promotes_into_wider_unsigned_var() {
        let tu = run("func main(): i32 { var x: u32 = 5 return 0 }").unwrap();
        match &tu.decls[0].body.as_ref().unwrap().stmts[0] {
            Stmt::Var { initial_value: Expr::Cast { dst_ty: Type::U32, .. }, .. } => {}
            other => panic!("expected a Cast initializer, got {other:?}"),
        }
    }

    #[test]
    fn relational_comparison_of_non_numeric_operands_is_rejected() {
        let err = run("func main(): i32 { if true < false { } return 0 }").unwrap_err();
        assert!(matches!(err, CompileError::Type { .. }));
    }

    #[test]
    fn relational_comparison_of_numeric_operands_passes() {
        assert!(run("func main(): i32 { if 1 < 2 { } return 0 }").is_ok());
    }
}
