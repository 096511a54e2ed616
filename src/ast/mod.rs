/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Expression and statement node definitions
/// - types: Type representations used by inference and code generation
pub mod ast;
pub mod types;
