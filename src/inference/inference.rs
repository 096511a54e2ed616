//! Constraint collection and resolution.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt::Display;

use lazy_static::lazy_static;

use crate::ast::ast::{Block, Expr, Function, Stmt};
use crate::ast::types::{SymbolType, Type, TypeTerm};
use crate::errors::errors::Error;

lazy_static! {
    static ref COMPARISON_OPERATORS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("==");
        set.insert("!=");
        set.insert("<");
        set.insert(">");
        set.insert("<=");
        set.insert(">=");
        set
    };
    static ref LOGICAL_OPERATORS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("and");
        set.insert("or");
        set.insert("not");
        set
    };
}

/// An unordered group of type terms asserted equal.
///
/// The set representation dedupes members, so a constraint whose terms
/// are all identical collapses to a singleton and resolution skips it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constraint(BTreeSet<TypeTerm>);

impl Constraint {
    pub fn pair(a: TypeTerm, b: TypeTerm) -> Self {
        Constraint([a, b].into_iter().collect())
    }

    pub fn group(terms: impl IntoIterator<Item = TypeTerm>) -> Self {
        Constraint(terms.into_iter().collect())
    }

    pub fn terms(&self) -> impl Iterator<Item = &TypeTerm> {
        self.0.iter()
    }

    pub fn contains(&self, term: &TypeTerm) -> bool {
        self.0.contains(term)
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|term| term.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

pub type ConstraintSet = BTreeSet<Constraint>;

/// The resolved mapping from placeholders to concrete types. Ordered,
/// so code generation that walks it produces deterministic output.
pub type Substitution = BTreeMap<SymbolType, Type>;

fn constrain(constraints: &mut ConstraintSet, a: TypeTerm, b: TypeTerm) {
    if a != b {
        constraints.insert(Constraint::pair(a, b));
    }
}

/// Classifies raw numeric-literal text: all digits with a `.` is a
/// Double, all digits without one an Integer, anything else falls
/// through to String.
pub fn infer_numeric(value: &str) -> TypeTerm {
    let digits: String = value.chars().filter(|c| *c != '.').collect();
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        if value.contains('.') {
            return TypeTerm::Concrete(Type::Double);
        }
        return TypeTerm::Concrete(Type::Integer);
    }
    TypeTerm::Concrete(Type::String)
}

pub fn infer_expr(expr: &Expr) -> (TypeTerm, ConstraintSet) {
    match expr {
        Expr::Numeric(value) => (infer_numeric(value), ConstraintSet::new()),
        Expr::Str(_) => (TypeTerm::Concrete(Type::String), ConstraintSet::new()),
        Expr::List(_) => (TypeTerm::Concrete(Type::List), ConstraintSet::new()),
        Expr::Symbol(symbol) => (TypeTerm::symbol(&symbol.name), ConstraintSet::new()),
        // the callee's own symbol stands in for its return type
        Expr::Invocation(invocation) => (
            TypeTerm::symbol(&invocation.func.name),
            ConstraintSet::new(),
        ),
        Expr::Binary {
            first,
            operator,
            second,
        } => infer_binary(first, operator, second),
    }
}

/// Comparison and logical operators force a Boolean result and tie the
/// operand types together (logical operators additionally constrain
/// each operand to Boolean); arithmetic operators propagate the left
/// operand's type and tie both operands.
fn infer_binary(first: &Expr, operator: &str, second: &Expr) -> (TypeTerm, ConstraintSet) {
    let (type_a, constraints_a) = infer_expr(first);
    let (type_b, constraints_b) = infer_expr(second);

    let mut constraints: ConstraintSet = constraints_a.union(&constraints_b).cloned().collect();
    constrain(&mut constraints, type_a.clone(), type_b.clone());

    if COMPARISON_OPERATORS.contains(operator) {
        return (TypeTerm::Concrete(Type::Boolean), constraints);
    }

    if LOGICAL_OPERATORS.contains(operator) {
        constrain(
            &mut constraints,
            type_a,
            TypeTerm::Concrete(Type::Boolean),
        );
        constrain(
            &mut constraints,
            type_b,
            TypeTerm::Concrete(Type::Boolean),
        );
        return (TypeTerm::Concrete(Type::Boolean), constraints);
    }

    (type_a, constraints)
}

/// Infers a single statement. The returned type is the statement's own
/// inferred type; only `Return` and `If` statements count as function
/// return-type candidates, which `infer_block` decides by statement
/// kind.
pub fn infer_stmt(stmt: &Stmt) -> (Option<TypeTerm>, ConstraintSet) {
    match stmt {
        Stmt::Invocation(invocation) => (
            Some(TypeTerm::symbol(&invocation.func.name)),
            ConstraintSet::new(),
        ),
        Stmt::Assignment { src, dst } => {
            let (source_type, mut constraints) = infer_expr(src);
            constrain(
                &mut constraints,
                TypeTerm::symbol(&dst.name),
                source_type.clone(),
            );
            (Some(source_type), constraints)
        }
        Stmt::Return { result } => {
            let (inferred, constraints) = infer_expr(result);
            (Some(inferred), constraints)
        }
        Stmt::If { condition, body } => {
            let (_, condition_constraints) = infer_expr(condition);
            let (block_type, block_constraints) = infer_block(body);
            let constraints = condition_constraints
                .union(&block_constraints)
                .cloned()
                .collect();
            (block_type, constraints)
        }
        // function scopes are inferred independently; imports carry no type
        Stmt::Function(_) | Stmt::Import { .. } => (None, ConstraintSet::new()),
    }
}

/// Folds over a block's statements in order, accumulating every
/// constraint. Only `Return` and `If` results are return-type
/// candidates; more than one distinct candidate adds a constraint tying
/// them all together so resolution can catch a conflict. The block's
/// type is the first member of the candidate set, or `None` when no
/// statement bears a return type.
pub fn infer_block(block: &Block) -> (Option<TypeTerm>, ConstraintSet) {
    let mut candidates: BTreeSet<TypeTerm> = BTreeSet::new();
    let mut constraints = ConstraintSet::new();

    for stmt in &block.body {
        let (inferred, stmt_constraints) = infer_stmt(stmt);
        constraints.extend(stmt_constraints);
        if matches!(stmt, Stmt::Return { .. } | Stmt::If { .. }) {
            if let Some(inferred) = inferred {
                candidates.insert(inferred);
            }
        }
    }

    if candidates.len() > 1 {
        constraints.insert(Constraint::group(candidates.iter().cloned()));
    }

    (candidates.into_iter().next(), constraints)
}

pub fn infer_function(function: &Function) -> (Option<TypeTerm>, ConstraintSet) {
    infer_block(&function.body)
}

/// Resolves constraints into a substitution, one constraint at a time.
///
/// Per constraint: more than one distinct concrete member is a
/// conflict; exactly one binds every placeholder member to it; none
/// leaves the constraint unused. Resolution does not iterate to a fixed
/// point - a binding discovered by one constraint is not substituted
/// back into the others.
pub fn resolve_types(constraints: &ConstraintSet) -> Result<Substitution, Error> {
    let mut resolved = Substitution::new();

    for constraint in constraints {
        let concrete: BTreeSet<Type> = constraint
            .terms()
            .filter_map(|term| match term {
                TypeTerm::Concrete(ty) => Some(*ty),
                TypeTerm::Symbol(_) => None,
            })
            .collect();

        if concrete.len() > 1 {
            return Err(Error::ConflictingConstraint {
                constraint: constraint.to_string(),
            });
        }

        let Some(ty) = concrete.into_iter().next() else {
            continue;
        };

        for term in constraint.terms() {
            if let TypeTerm::Symbol(symbol) = term {
                resolved.insert(symbol.clone(), ty);
            }
        }
    }

    Ok(resolved)
}

/// Looks up the resolved concrete type of every declared argument.
/// An argument whose placeholder never resolved is an inference error.
pub fn function_arguments(
    function: &Function,
    resolved: &Substitution,
) -> Result<Vec<(String, Type)>, Error> {
    function
        .args
        .iter()
        .map(|arg| match resolved.get(&SymbolType::new(arg)) {
            Some(ty) => Ok((arg.clone(), *ty)),
            None => Err(Error::UnresolvedArgument {
                argument: arg.clone(),
            }),
        })
        .collect()
}
