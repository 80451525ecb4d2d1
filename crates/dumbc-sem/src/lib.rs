//! dumbc-sem - Semantic Analyzer
//!
//! Five AST-rewriting passes run over the syntax tree `dumbc-par`
//! produces: `TypePass` fills in expression types and materializes
//! implicit conversions as `Cast` nodes; `LoopPass`, `DeadCodePass`,
//! `AttrPass` and `MainFuncPass` validate the rest.
//!
//! Passes run in the order the reference driver this was ported from
//! actually invokes them — `TypePass → LoopPass → DeadCodePass →
//! AttrPass → MainFuncPass` — rather than the `AttrPass`-first order an
//! idealized reading of the dependency graph would suggest. That
//! ordering is preserved deliberately; see `DESIGN.md`.

mod attr_pass;
mod dead_code_pass;
mod loop_pass;
mod main_func_pass;
pub mod scope;
mod type_pass;
pub mod types;

pub use type_pass::TypePass;
pub use types::{builtin_type_conversion, builtin_type_promotion};

use dumbc_par::{Function, TranslationUnit};
use dumbc_util::{CompileResult, Symbol};
use rustc_hash::FxHashMap;

/// Maps a function name to its declaration's index in
/// `TranslationUnit::decls`, so the backend can resolve calls against
/// the very same AST nodes the type-checked tree already holds, without
/// this crate having to hand back borrowed references tangled in its own
/// lifetime.
pub struct FuncTable(FxHashMap<Symbol, usize>);

impl FuncTable {
    pub fn get<'a>(&self, tu: &'a TranslationUnit, name: Symbol) -> Option<&'a Function> {
        self.0.get(&name).map(|&idx| &tu.decls[idx])
    }

    pub fn contains(&self, name: Symbol) -> bool {
        self.0.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn build_func_table(tu: &TranslationUnit) -> FuncTable {
    let mut map = FxHashMap::default();
    for (idx, func) in tu.decls.iter().enumerate() {
        map.insert(func.proto.name, idx);
    }
    FuncTable(map)
}

/// Runs the complete fixed pipeline over `tu` in place and returns the
/// function table for the backend once every pass has accepted the tree.
pub fn analyze(tu: &mut TranslationUnit) -> CompileResult<FuncTable> {
    TypePass::new().run(tu)?;
    loop_pass::run(tu)?;
    dead_code_pass::run(tu);
    attr_pass::run(tu)?;
    main_func_pass::run(tu)?;
    Ok(build_func_table(tu))
}
