//! AST node definitions.
//!
//! Nodes are built once by the grammar and never mutated afterwards;
//! inference and code generation are read-only traversals over the same
//! tree. The node set is closed, so every traversal can match
//! exhaustively and an unhandled node kind is a compile-time error.

/// A (possibly dotted) identifier.
///
/// A symbol is overloaded: it names a bound variable when it appears as
/// an operand or assignment destination, and a callee when it appears at
/// the head of an invocation. There is no separate function-reference
/// node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
}

impl Symbol {
    pub fn new(name: &str) -> Self {
        Symbol {
            name: name.to_string(),
        }
    }
}

/// A call of the form `callee(arg, ..)`, usable both as an expression
/// and as a bare statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub func: Symbol,
    pub args: Vec<Expr>,
}

/// A `def` definition. Parameters are bare names; their types are
/// discovered only through use inside the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub args: Vec<String>,
    pub body: Block,
}

/// An ordered sequence of statements. Order is execution order.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub body: Vec<Stmt>,
}

/// Expression node kinds.
///
/// Literal values keep their raw source text; a string literal includes
/// its quote characters.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Symbol(Symbol),
    Numeric(String),
    Str(String),
    List(Vec<Expr>),
    Invocation(Invocation),
    Binary {
        first: Box<Expr>,
        operator: String,
        second: Box<Expr>,
    },
}

/// Statement node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Invocation(Invocation),
    Assignment { src: Expr, dst: Symbol },
    If { condition: Expr, body: Block },
    Return { result: Expr },
    Function(Function),
    Import { name: String },
}
