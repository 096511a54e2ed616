//! Parser-combinator module.
//!
//! This module contains the primitive parsing building blocks the
//! grammar is composed from. It handles:
//!
//! - Literal and regex token matching
//! - Sequencing, alternation and repetition
//! - Whitespace and separator conventions
//! - The off-side rule (indentation-delimited blocks)
//! - Recursion breaking for mutually-recursive rules

pub mod combinators;
