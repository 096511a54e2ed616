//! Code generation module for the compiler.
//!
//! This module contains the two syntax-directed generators that
//! transform the AST into target-language source text. It handles:
//!
//! - The dynamically-typed JavaScript target, which uses inference only
//!   to hoist local variable declarations
//! - The statically-typed Java target, which cannot proceed without
//!   fully resolved types
//! - Target selection for the driver

pub mod java;
pub mod js;


use std::collections::HashMap;
use std::str::FromStr;

use lazy_static::lazy_static;

use crate::ast::ast::Block;
use crate::errors::errors::Error;

lazy_static! {
    static ref INFIX_LOOKUP: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("and", "&&");
        map.insert("or", "||");
        map
    };
}

/// Maps a source operator to its spelling in both target languages;
/// operators without an entry pass through verbatim.
pub(crate) fn infix_operator(operator: &str) -> &str {
    INFIX_LOOKUP.get(operator).copied().unwrap_or(operator)
}

/// The two supported backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Js,
    Java,
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "js" => Ok(Target::Js),
            "java" => Ok(Target::Java),
            other => Err(format!("unknown target: {}", other)),
        }
    }
}

pub fn generate(target: Target, program: &Block) -> Result<String, Error> {
    match target {
        Target::Js => js::generate_program(program),
        Target::Java => java::generate_program(program),
    }
}
