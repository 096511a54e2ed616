//! The statically-typed Java target.
//!
//! Cannot proceed without fully resolved types: every function needs a
//! concrete return type and a concrete type for each parameter, and
//! every hoisted local gets a typed declaration. Top-level statements
//! are collected into a synthetic entry-point method; functions become
//! named static methods alongside it.

use std::collections::HashSet;

use crate::ast::ast::{Block, Expr, Function, Invocation, Stmt};
use crate::ast::types::{Type, TypeTerm};
use crate::codegen::infix_operator;
use crate::errors::errors::Error;
use crate::inference::inference::{
    function_arguments, infer_function, infer_stmt, resolve_types, Substitution,
};

pub fn generate_type(ty: Type) -> &'static str {
    match ty {
        Type::Integer => "int",
        Type::Double => "double",
        Type::String => "String",
        Type::Boolean => "boolean",
        Type::List => "List",
    }
}

fn join_arguments(args: &[Expr]) -> String {
    args.iter()
        .map(generate_expr)
        .collect::<Vec<_>>()
        .join(",")
}

fn generate_invocation(invocation: &Invocation) -> String {
    format!(
        "{}({})",
        invocation.func.name,
        join_arguments(&invocation.args)
    )
}

pub fn generate_expr(expr: &Expr) -> String {
    match expr {
        Expr::Numeric(value) => value.clone(),
        // the literal's raw text carries its source quotes
        Expr::Str(value) => format!("\"{}\"", &value[1..value.len() - 1]),
        Expr::Symbol(symbol) => symbol.name.clone(),
        Expr::List(items) => format!("Arrays.asList({})", join_arguments(items)),
        Expr::Invocation(invocation) => generate_invocation(invocation),
        Expr::Binary {
            first,
            operator,
            second,
        } => format!(
            "({} {} {})",
            generate_expr(first),
            infix_operator(operator),
            generate_expr(second)
        ),
    }
}

pub fn generate_stmt(stmt: &Stmt) -> Result<String, Error> {
    match stmt {
        Stmt::Invocation(invocation) => Ok(format!("{};", generate_invocation(invocation))),
        Stmt::Assignment { src, dst } => Ok(format!("{} = {};", dst.name, generate_expr(src))),
        Stmt::If { condition, body } => Ok(format!(
            "if({}) {{ {} }}",
            generate_expr(condition),
            generate_block(body)?
        )),
        Stmt::Return { result } => Ok(format!("return {};", generate_expr(result))),
        Stmt::Function(function) => generate_function(function),
        Stmt::Import { .. } => Ok(String::new()),
    }
}

pub fn generate_block(block: &Block) -> Result<String, Error> {
    let mut out = vec![];
    for stmt in &block.body {
        out.push(generate_stmt(stmt)?);
    }
    Ok(out.join("\n"))
}

/// One typed declaration per resolved local, excluding the names in
/// `exclude` (the enclosing function's own name and its parameters).
fn local_symbols(resolved: &Substitution, exclude: &HashSet<&str>) -> Vec<String> {
    resolved
        .iter()
        .filter(|(symbol, _)| !exclude.contains(symbol.name.as_str()))
        .map(|(symbol, ty)| format!("{} {};", generate_type(*ty), symbol.name))
        .collect()
}

pub fn generate_function(function: &Function) -> Result<String, Error> {
    let body = generate_block(&function.body)?;
    let (inferred_return, constraints) = infer_function(function);
    let resolved = resolve_types(&constraints)?;

    let return_type = match inferred_return {
        None => "void",
        Some(TypeTerm::Concrete(ty)) => generate_type(ty),
        Some(TypeTerm::Symbol(symbol)) => match resolved.get(&symbol) {
            Some(ty) => generate_type(*ty),
            None => {
                return Err(Error::UnresolvedReturnType {
                    function: function.name.clone(),
                })
            }
        },
    };

    let arguments = function_arguments(function, &resolved)?;
    let parameters = arguments
        .iter()
        .map(|(name, ty)| format!("{} {}", generate_type(*ty), name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut exclude: HashSet<&str> = function.args.iter().map(String::as_str).collect();
    exclude.insert(&function.name);
    let locals = local_symbols(&resolved, &exclude);

    Ok(format!(
        "public static {} {}({}) {{ {}\n{} }}",
        return_type,
        function.name,
        parameters,
        locals.join("\n"),
        body
    ))
}

/// Functions become static methods; every other top-level statement
/// lands inside the synthetic `matcha_main` entry point, preceded by
/// the typed declarations of the locals those statements resolve.
/// Imports are handled by the module linker, not emitted here.
pub fn generate_program(program: &Block) -> Result<String, Error> {
    let mut definitions = vec![];
    let mut main = vec![];

    for stmt in &program.body {
        match stmt {
            Stmt::Function(function) => definitions.push(generate_function(function)?),
            Stmt::Import { .. } => {}
            other => main.push(other),
        }
    }

    let mut hoisted = Substitution::new();
    for stmt in &main {
        let (_, constraints) = infer_stmt(stmt);
        hoisted.extend(resolve_types(&constraints)?);
    }
    let symbols = local_symbols(&hoisted, &HashSet::new());

    let mut body = vec![];
    for stmt in &main {
        body.push(generate_stmt(stmt)?);
    }

    Ok(format!(
        "{}\npublic static void matcha_main() {{ {}\n{} }}",
        definitions.join("\n"),
        symbols.join("\n"),
        body.join("\n")
    ))
}
