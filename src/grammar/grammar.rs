//! The matcha grammar.
//!
//! Each rule is an ordinary function returning a freshly-built parser;
//! recursive edges (`expression` through `binary_operator`, `statement`
//! through `if_statement`/`block`, and `expression` through the
//! bracketed argument/element lists) go through `lazy`, which defers and
//! caches construction.
//!
//! Operator chains parse right-associatively: `a + b + c` becomes
//! `Binary(a, '+', Binary(b, '+', c))`, because a binary operator's
//! second operand is the full expression rule. This is a defining
//! property of the grammar, not an accident.

use crate::ast::ast::{Block, Expr, Function, Invocation, Stmt, Symbol};
use crate::combinators::combinators::{
    choice, flat, indent, joined, joined_skip, lazy, lit, many1, oneof, regex, rstrip, strip,
    wrapped, Parser,
};

/// The fixed operator set, longest spellings first so `<=` wins over `<`.
pub const OPERATORS: &[&str] = &[
    "==", "!=", "<=", ">=", "+", "-", "*", "/", ">", "<", "and", "or",
];

pub fn empty_line() -> Parser<String> {
    regex("\\s*\n")
}

/// A bare identifier with trailing whitespace skipped.
pub fn symbol() -> Parser<String> {
    rstrip(regex("[a-zA-Z_]+[a-zA-Z_\\d]*"))
}

/// A bare identifier with surrounding whitespace skipped.
pub fn free_symbol() -> Parser<String> {
    strip(regex("[a-zA-Z_]+[a-zA-Z_\\d]*"))
}

/// One or more symbols joined by `.`, flattened into a single symbol.
pub fn dotted_name() -> Parser<Symbol> {
    flat(joined(lit("."), symbol())).map(|name| Symbol { name })
}

pub fn string_literal() -> Parser<String> {
    regex("\".*?\"").or(regex("'.*?'"))
}

pub fn numeric_literal() -> Parser<String> {
    regex("\\d+(\\.\\d*)?")
}

pub fn list_literal() -> Parser<Vec<Expr>> {
    wrapped(
        lit("["),
        joined_skip(lit(","), strip(lazy(expression))),
        lit("]"),
    )
}

pub fn literal() -> Parser<Expr> {
    choice(vec![
        string_literal().map(Expr::Str),
        numeric_literal().map(Expr::Numeric),
        list_literal().map(Expr::List),
    ])
}

/// A dotted name or a literal.
pub fn atom() -> Parser<Expr> {
    rstrip(choice(vec![dotted_name().map(Expr::Symbol), literal()]))
}

/// A dotted name followed by a parenthesized, comma-joined, possibly
/// empty argument list.
pub fn invocation() -> Parser<Invocation> {
    dotted_name()
        .then(wrapped(
            lit("("),
            joined_skip(lit(","), strip(lazy(expression))),
            lit(")"),
        ))
        .map(|(func, args)| Invocation { func, args })
}

pub fn binary_operator() -> Parser<Expr> {
    invocation()
        .map(Expr::Invocation)
        .or(atom())
        .then(strip(oneof(OPERATORS)))
        .then(lazy(expression))
        .map(|((first, operator), second)| Expr::Binary {
            first: Box::new(first),
            operator,
            second: Box::new(second),
        })
}

pub fn expression() -> Parser<Expr> {
    choice(vec![
        binary_operator(),
        invocation().map(Expr::Invocation),
        atom(),
    ])
}

fn end_def() -> Parser<String> {
    lit(":\n")
}

pub fn if_statement() -> Parser<Stmt> {
    lit("if ")
        .ignore_then(expression())
        .skip(end_def())
        .then(block())
        .map(|(condition, body)| Stmt::If { condition, body })
}

/// `symbol '=' atom` - the right-hand side is restricted to an atom,
/// not a full expression.
pub fn assignment() -> Parser<Stmt> {
    symbol()
        .map(|name| Symbol { name })
        .skip(rstrip(lit("=")))
        .then(atom())
        .map(|(dst, src)| Stmt::Assignment { src, dst })
}

pub fn return_statement() -> Parser<Stmt> {
    lit("return ")
        .ignore_then(expression())
        .map(|result| Stmt::Return { result })
}

pub fn statement() -> Parser<Stmt> {
    choice(vec![
        invocation().map(Stmt::Invocation),
        assignment(),
        if_statement(),
        return_statement(),
    ])
}

/// An indented run of one or more statements.
pub fn block() -> Parser<Block> {
    indent(many1(rstrip(lazy(statement)))).map(|body| Block { body })
}

/// A parenthesized, comma-joined, possibly empty list of bare parameter
/// names.
pub fn arguments() -> Parser<Vec<String>> {
    wrapped(lit("("), joined_skip(lit(","), free_symbol()), lit(")"))
}

/// A function definition. `def ` matches softly so the program rule can
/// try other alternatives; everything after it is must-match, so a
/// malformed definition reports a syntax error instead of vanishing.
pub fn function() -> Parser<Stmt> {
    lit("def ")
        .ignore_then(symbol().must("function name"))
        .then(arguments().must("argument list"))
        .skip(end_def().must("':' closing the definition header"))
        .then(block().must("indented function body"))
        .map(|((name, args), body)| Stmt::Function(Function { name, args, body }))
}

pub fn import_statement() -> Parser<Stmt> {
    lit("import ")
        .ignore_then(dotted_name())
        .map(|module| Stmt::Import { name: module.name })
}

/// The top level: blank lines, function definitions, imports and bare
/// statements, wrapped into a single block. Blank lines are consumed
/// and discarded.
pub fn program() -> Parser<Block> {
    many1(rstrip(choice(vec![
        empty_line().map(|_| None),
        function().map(Some),
        import_statement().map(Some),
        statement().map(Some),
    ])))
    .map(|body| Block {
        body: body.into_iter().flatten().collect(),
    })
}
