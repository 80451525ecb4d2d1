//! DeadCodePass (§4.6): within each block, truncate `stmts` at the first
//! terminator (inclusive), then recurse into whatever survives. Running
//! the pass twice is a no-op — nothing past the first terminator remains
//! to truncate further.

use dumbc_par::{Block, Stmt, TranslationUnit};

pub fn run(tu: &mut TranslationUnit) {
    for func in &mut tu.decls {
        if let Some(body) = &mut func.body {
            visit_block(body);
        }
    }
}

fn visit_block(block: &mut Block) {
    if let Some(cut) = block.stmts.iter().position(|s| s.is_terminator()) {
        block.stmts.truncate(cut + 1);
    }
    for stmt in &mut block.stmts {
        visit_stmt(stmt);
    }
}

fn visit_stmt(stmt: &mut Stmt) {
    match stmt {
        Stmt::Block(block) => visit_block(block),
        Stmt::If { then, otherwise, .. } => {
            visit_block(then);
            if let Some(otherwise) = otherwise {
                visit_stmt(otherwise);
            }
        }
        Stmt::While { body, .. } => visit_block(body),
        Stmt::Break { .. } | Stmt::Continue { .. } | Stmt::Return { .. } | Stmt::Var { .. } | Stmt::Expression { .. } => {}
    }
}
