//! The dynamically-typed JavaScript target.
//!
//! Expressions translate without type information; inference is run
//! only to enumerate the local symbols of a scope so their `var`
//! declarations can be hoisted ahead of the translated body.

use std::collections::HashSet;

use crate::ast::ast::{Block, Expr, Function, Invocation, Stmt};
use crate::codegen::infix_operator;
use crate::errors::errors::Error;
use crate::inference::inference::{infer_function, infer_stmt, resolve_types, Substitution};

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
        Expr::Numeric(value) | Expr::Str(value) => value.clone(),
        Expr::Symbol(symbol) => symbol.name.clone(),
        Expr::List(items) => format!("[{}]", join_arguments(items)),
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

/// One untyped declaration per resolved local, excluding the names in
/// `exclude` (the enclosing function's own name and its parameters).
fn local_symbols(resolved: &Substitution, exclude: &HashSet<&str>) -> Vec<String> {
    resolved
        .keys()
        .filter(|symbol| !exclude.contains(symbol.name.as_str()))
        .map(|symbol| format!("var {};", symbol.name))
        .collect()
}

pub fn generate_function(function: &Function) -> Result<String, Error> {
    let body = generate_block(&function.body)?;
    let (_, constraints) = infer_function(function);
    let resolved = resolve_types(&constraints)?;

    let mut exclude: HashSet<&str> = function.args.iter().map(String::as_str).collect();
    exclude.insert(&function.name);
    let locals = local_symbols(&resolved, &exclude);

    Ok(format!(
        "var {} = function({}) {{ {}\n{} }};",
        function.name,
        function.args.join(","),
        locals.join("\n"),
        body
    ))
}

/// Top-level statements keep their source order; the locals they assign
/// are hoisted as one run of `var` declarations up front. Imports are
/// handled by the module linker, not emitted here.
pub fn generate_program(program: &Block) -> Result<String, Error> {
    let mut hoisted = Substitution::new();
    for stmt in &program.body {
        if !matches!(stmt, Stmt::Function(_) | Stmt::Import { .. }) {
            let (_, constraints) = infer_stmt(stmt);
            hoisted.extend(resolve_types(&constraints)?);
        }
    }

    let mut out = local_symbols(&hoisted, &HashSet::new());
    for stmt in &program.body {
        match stmt {
            Stmt::Import { .. } => {}
            Stmt::Function(function) => out.push(generate_function(function)?),
            other => out.push(generate_stmt(other)?),
        }
    }
    Ok(out.join("\n"))
}
