//! LoopPass (§4.5): `break`/`continue` are only legal inside a `while`
//! body. Tracked with a plain depth counter incremented on entry to a
//! loop body and decremented on exit — no scope stack needed since the
//! check is purely structural.

use dumbc_par::{Block, Stmt, TranslationUnit};
use dumbc_util::{CompileError, CompileResult};

pub fn run(tu: &mut TranslationUnit) -> CompileResult<()> {
    for func in &tu.decls {
        if let Some(body) = &func.body {
            visit_block(body, 0)?;
        }
    }
    Ok(())
}

fn visit_block(block: &Block, depth: u32) -> CompileResult<()> {
    for stmt in &block.stmts {
        visit_stmt(stmt, depth)?;
    }
    Ok(())
}

fn visit_stmt(stmt: &Stmt, depth: u32) -> CompileResult<()> {
    match stmt {
        Stmt::Block(block) => visit_block(block, depth),
        Stmt::If { then, otherwise, .. } => {
            visit_block(then, depth)?;
            if let Some(otherwise) = otherwise {
                visit_stmt(otherwise, depth)?;
            }
            Ok(())
        }
        Stmt::While { body, .. } => visit_block(body, depth + 1),
        Stmt::Break { loc } => {
            if depth == 0 {
                return Err(CompileError::syntax("'break' outside a loop", *loc));
            }
            Ok(())
        }
        Stmt::Continue { loc } => {
            if depth == 0 {
                return Err(CompileError::syntax("'continue' outside a loop", *loc));
            }
            Ok(())
        }
        Stmt::Return { .. } | Stmt::Var { .. } | Stmt::Expression { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dumbc_par::parse;

    fn run_src(src: &str) -> CompileResult<()> {
        let mut tu = parse(src).unwrap();
        run(&mut tu)
    }

    #[test]
    fn break_inside_while_passes() {
        assert!(run_src("func f() { while true { break } }").is_ok());
    }

    #[test]
    fn break_at_block_scope_fails() {
        let err = run_src("func f() { break }").unwrap_err();
        assert!(matches!(err, CompileError::Syntax { .. }));
    }

    #[test]
    fn continue_at_block_scope_fails() {
        let err = run_src("func f() { continue }").unwrap_err();
        assert!(matches!(err, CompileError::Syntax { .. }));
    }

    #[test]
    fn break_inside_nested_if_inside_loop_passes() {
        assert!(run_src("func f() { while true { if true { break } } }").is_ok());
    }

    #[test]
    fn break_after_loop_body_exits_depth() {
        let err = run_src("func f() { while true { } break }").unwrap_err();
        assert!(matches!(err, CompileError::Syntax { .. }));
    }
}
