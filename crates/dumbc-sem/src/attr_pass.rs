//! AttrPass (§4.3): validates the attribute/body pairing on every
//! function. Only `external` is a defined attribute name; anything else
//! is a name error.

use dumbc_par::{Function, TranslationUnit};
use dumbc_util::{CompileError, CompileResult};

pub fn run(tu: &mut TranslationUnit) -> CompileResult<()> {
    for func in &tu.decls {
        validate(func)?;
    }
    Ok(())
}

fn validate(func: &Function) -> CompileResult<()> {
    let Some(attrs) = &func.proto.attrs else {
        return if func.body.is_some() {
            Ok(())
        } else {
            Err(CompileError::ty(
                format!("function '{}' has no body and is not declared external", func.proto.name),
                func.loc,
            ))
        };
    };

    let mut saw_external = false;
    for attr in attrs {
        if attr.name.as_str() != "external" {
            return Err(CompileError::name(format!("unknown attribute '{}'", attr.name), attr.loc));
        }
        saw_external = true;
        if attr.args.is_some() {
            return Err(CompileError::ty("'external' takes no arguments", attr.loc));
        }
    }

    if saw_external && func.body.is_some() {
        return Err(CompileError::ty(
            format!("external function '{}' must not have a body", func.proto.name),
            func.loc,
        ));
    }

    Ok(())
}
