#![allow(clippy::module_inception)]

pub mod ast;
pub mod codegen;
pub mod combinators;
pub mod errors;
pub mod grammar;
pub mod inference;

extern crate regex;

use crate::ast::ast::{Block, Stmt};
use crate::codegen::Target;
use crate::errors::errors::Error;

/// Compiles a whole source unit to the selected target.
///
/// The parse must consume the entire input; a top-level no-match or a
/// non-empty remainder is reported as leftover input rather than being
/// silently dropped.
pub fn compile(source: &str, target: Target) -> Result<String, Error> {
    let Some((program, rest)) = grammar::grammar::program().parse(source)? else {
        return Err(Error::LeftoverInput {
            rest: source.to_string(),
        });
    };

    if !rest.is_empty() {
        return Err(Error::LeftoverInput { rest });
    }

    log::debug!("parsed {} top-level statements", program.body.len());
    codegen::generate(target, &program)
}

/// The module-import list of a parsed program, consumed by the module
/// linker.
pub fn module_imports(program: &Block) -> Vec<String> {
    program
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Import { name } => Some(name.clone()),
            _ => None,
        })
        .collect()
}
