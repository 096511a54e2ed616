//! Type inference module.
//!
//! This module computes, per AST subtree, an inferred type (concrete or
//! placeholder) and a set of equality constraints, then resolves the
//! constraints into a placeholder-to-concrete-type substitution. It
//! handles:
//!
//! - Structural, bottom-up inference over expressions and statements
//! - Return-type candidate collection per block
//! - Constraint resolution and conflict detection
//! - Function argument type validation

pub mod inference;
