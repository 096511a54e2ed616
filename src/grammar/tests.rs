//! Unit tests for the grammar.
//!
//! This module contains tests for parsing the language constructs:
//! symbols, atoms, invocations, assignments, operator chains, control
//! flow, function definitions and whole programs.

use crate::ast::ast::{Expr, Stmt, Symbol};
use crate::grammar::grammar::{
    arguments, assignment, atom, binary_operator, function, if_statement, invocation, program,
    return_statement, symbol,
};

#[test]
fn test_symbol_matches() {
    let p = symbol();
    for input in ["simple", "snake_case", "lowerAndUpper", "end_with_digit1"] {
        assert_eq!(
            p.parse(input).unwrap(),
            Some((input.to_string(), String::new()))
        );
    }

    assert_eq!(
        p.parse("with_whitespace ").unwrap(),
        Some(("with_whitespace".to_string(), String::new()))
    );
    assert_eq!(
        p.parse("with space").unwrap(),
        Some(("with".to_string(), "space".to_string()))
    );
}

#[test]
fn test_symbol_fails() {
    let p = symbol();
    assert_eq!(p.parse("1start_with_digit").unwrap(), None);
    assert_eq!(p.parse("1hello").unwrap(), None);
}

#[test]
fn test_atom_matches() {
    let p = atom();
    assert_eq!(
        p.parse("symbol").unwrap(),
        Some((Expr::Symbol(Symbol::new("symbol")), String::new()))
    );
    assert_eq!(
        p.parse("\"double_quote\"").unwrap(),
        Some((Expr::Str("\"double_quote\"".to_string()), String::new()))
    );
    assert_eq!(
        p.parse("'single_quote'").unwrap(),
        Some((Expr::Str("'single_quote'".to_string()), String::new()))
    );
    assert_eq!(
        p.parse("1234").unwrap(),
        Some((Expr::Numeric("1234".to_string()), String::new()))
    );
    assert_eq!(
        p.parse("dotted.name").unwrap(),
        Some((Expr::Symbol(Symbol::new("dotted.name")), String::new()))
    );
}

#[test]
fn test_atom_fails() {
    let p = atom();
    assert_eq!(p.parse("{}weird").unwrap(), None);
    assert_eq!(p.parse("").unwrap(), None);
    assert_eq!(
        p.parse("more than one").unwrap(),
        Some((Expr::Symbol(Symbol::new("more")), "than one".to_string()))
    );
}

#[test]
fn test_list_literal() {
    let p = atom();
    assert_eq!(
        p.parse("[1, 'two', three]").unwrap(),
        Some((
            Expr::List(vec![
                Expr::Numeric("1".to_string()),
                Expr::Str("'two'".to_string()),
                Expr::Symbol(Symbol::new("three")),
            ]),
            String::new()
        ))
    );
}

#[test]
fn test_invocation() {
    let p = invocation();
    let (node, rest) = p
        .parse("module.func(symbol, 123,\"string\")")
        .unwrap()
        .unwrap();

    assert_eq!(rest, "");
    assert_eq!(node.func, Symbol::new("module.func"));
    assert_eq!(node.args[0], Expr::Symbol(Symbol::new("symbol")));
    assert_eq!(node.args[1], Expr::Numeric("123".to_string()));
    assert_eq!(node.args[2], Expr::Str("\"string\"".to_string()));
}

#[test]
fn test_invocation_empty_arguments() {
    let p = invocation();
    let (node, rest) = p.parse("tick()").unwrap().unwrap();

    assert_eq!(rest, "");
    assert_eq!(node.func, Symbol::new("tick"));
    assert!(node.args.is_empty());
}

#[test]
fn test_assignment() {
    let expected = Stmt::Assignment {
        src: Expr::Numeric("5".to_string()),
        dst: Symbol::new("x"),
    };
    for input in ["x=5", "x =5", "x= 5", "x = 5"] {
        let (node, rest) = assignment().parse(input).unwrap().unwrap();
        assert_eq!(rest, "");
        assert_eq!(node, expected);
    }
}

#[test]
fn test_arguments() {
    let p = arguments();
    for input in ["(a,b,c)", "(a, b, c)"] {
        assert_eq!(
            p.parse(input).unwrap().unwrap().0,
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }
}

fn binary(first: Expr, operator: &str, second: Expr) -> Expr {
    Expr::Binary {
        first: Box::new(first),
        operator: operator.to_string(),
        second: Box::new(second),
    }
}

fn sym(name: &str) -> Expr {
    Expr::Symbol(Symbol::new(name))
}

#[test]
fn test_binary() {
    let p = binary_operator();
    let (node, rest) = p.parse("a + b").unwrap().unwrap();

    assert_eq!(rest, "");
    assert_eq!(node, binary(sym("a"), "+", sym("b")));
}

#[test]
fn test_binary_chains_are_right_associative() {
    let p = binary_operator();

    let (node, rest) = p.parse("a + b + c").unwrap().unwrap();
    assert_eq!(rest, "");
    assert_eq!(
        node,
        binary(sym("a"), "+", binary(sym("b"), "+", sym("c")))
    );

    let (node, rest) = p.parse("a + b + c + d").unwrap().unwrap();
    assert_eq!(rest, "");
    assert_eq!(
        node,
        binary(
            sym("a"),
            "+",
            binary(sym("b"), "+", binary(sym("c"), "+", sym("d")))
        )
    );
}

#[test]
fn test_function_simple() {
    let (node, rest) = function()
        .parse("def test_func(arg1, arg2):\n    x = 5")
        .unwrap()
        .unwrap();

    assert_eq!(rest, "");
    let Stmt::Function(func) = node else {
        panic!("expected a function, got {:?}", node);
    };
    assert_eq!(func.name, "test_func");
    assert_eq!(func.args, vec!["arg1".to_string(), "arg2".to_string()]);
    assert_eq!(
        func.body.body,
        vec![Stmt::Assignment {
            src: Expr::Numeric("5".to_string()),
            dst: Symbol::new("x"),
        }]
    );
}

#[test]
fn test_function_missing_body_is_a_syntax_error() {
    let result = function().parse("def test_func(arg1, arg2):\n(!)@#!(");
    assert!(result.is_err());
}

#[test]
fn test_if_statement_simple() {
    let (node, rest) = if_statement().parse("if x > 5:\n    x = 8").unwrap().unwrap();

    assert_eq!(rest, "");
    let Stmt::If { condition, body } = node else {
        panic!("expected an if statement");
    };
    assert_eq!(
        condition,
        binary(sym("x"), ">", Expr::Numeric("5".to_string()))
    );
    assert_eq!(
        body.body,
        vec![Stmt::Assignment {
            src: Expr::Numeric("8".to_string()),
            dst: Symbol::new("x"),
        }]
    );
}

#[test]
fn test_if_statement_nested() {
    let (node, rest) = if_statement()
        .parse("if x > 5:\n    x = 8\n    if y == 3:\n        y = 0\n")
        .unwrap()
        .unwrap();

    assert_eq!(rest, "");
    let Stmt::If { condition, body } = node else {
        panic!("expected an if statement");
    };
    assert_eq!(
        condition,
        binary(sym("x"), ">", Expr::Numeric("5".to_string()))
    );
    assert_eq!(
        body.body,
        vec![
            Stmt::Assignment {
                src: Expr::Numeric("8".to_string()),
                dst: Symbol::new("x"),
            },
            Stmt::If {
                condition: binary(sym("y"), "==", Expr::Numeric("3".to_string())),
                body: crate::ast::ast::Block {
                    body: vec![Stmt::Assignment {
                        src: Expr::Numeric("0".to_string()),
                        dst: Symbol::new("y"),
                    }],
                },
            },
        ]
    );
}

#[test]
fn test_return() {
    let (node, rest) = return_statement().parse("return 5").unwrap().unwrap();

    assert_eq!(rest, "");
    assert_eq!(
        node,
        Stmt::Return {
            result: Expr::Numeric("5".to_string())
        }
    );
}

#[test]
fn test_program() {
    let source = "def hello(a,b):\n    sys.log(\"hello\")\n    bar = 5\n\n\nhello(1, 2)";
    let (block, rest) = program().parse(source).unwrap().unwrap();

    assert_eq!(rest, "");
    assert_eq!(block.body.len(), 2);
    assert!(matches!(block.body[0], Stmt::Function(_)));
    assert!(matches!(block.body[1], Stmt::Invocation(_)));
}

#[test]
fn test_program_discards_blank_lines() {
    let source = "\n\nfoo(1)\n\n\nbar(2)\n";
    let (block, rest) = program().parse(source).unwrap().unwrap();

    assert_eq!(rest, "");
    assert_eq!(block.body.len(), 2);
}
