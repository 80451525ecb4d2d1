//! MainFuncPass (§4.7): the translation unit must declare a `main`
//! function returning `i32`.

use dumbc_par::{TranslationUnit, Type};
use dumbc_util::{CompileError, CompileResult};

pub fn run(tu: &TranslationUnit) -> CompileResult<()> {
    let main = tu
        .decls
        .iter()
        .find(|f| f.proto.name.as_str() == "main")
        .ok_or_else(|| CompileError::name("missing 'main' function", tu.loc))?;

    if main.proto.ret_ty != Type::I32 {
        return Err(CompileError::ty("'main' must return i32", main.loc));
    }

    Ok(())
}
