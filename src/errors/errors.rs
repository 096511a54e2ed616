use thiserror::Error;

/// Errors produced while compiling a single source unit.
///
/// Parsing distinguishes an ordinary no-match (a value, handled by
/// backtracking) from these hard failures: `Syntax` is raised only at
/// must-match rule boundaries, `LeftoverInput` when the top-level parse
/// stops before the end of the source. The remaining variants come out
/// of constraint resolution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("syntax error, expected {expected}, got: {rest:?}")]
    Syntax { expected: String, rest: String },
    #[error("could not parse remaining input: {rest:?}")]
    LeftoverInput { rest: String },
    #[error("cannot solve constraint {constraint}")]
    ConflictingConstraint { constraint: String },
    #[error("could not infer type of argument: {argument}")]
    UnresolvedArgument { argument: String },
    #[error("could not infer return type of function: {function}")]
    UnresolvedReturnType { function: String },
}

impl Error {
    pub fn error_name(&self) -> &str {
        match self {
            Error::Syntax { .. } => "SyntaxError",
            Error::LeftoverInput { .. } => "LeftoverInputError",
            Error::ConflictingConstraint { .. } => "InferenceError",
            Error::UnresolvedArgument { .. } => "InferenceError",
            Error::UnresolvedReturnType { .. } => "InferenceError",
        }
    }
}
