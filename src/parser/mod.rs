//! Parser module for building the stylesheet object model.
//!
//! This module turns a stream of tokens into rules, conditions, media lists
//! and declarations. It is a hand-written recursive descent parser that
//! never aborts on bad input:
//!
//! - Rule dispatch by at-keyword, with one production per at-rule
//! - Boolean conditions flattened into n-ary `and`/`or` nodes
//! - Media lists that collapse to `not all` when malformed
//! - Token-driven value and selector builders
//! - Error recovery by resynchronizing on `;` and `}`
//!
//! With `store_trivia` enabled every token, comments and whitespace
//! included, is also recorded into a concrete syntax tree whose frames
//! carry the entity each production built.

pub mod condition;
pub mod config;
pub mod cst;
pub mod declaration;
pub mod factory;
pub mod lookups;
pub mod media;
pub mod parser;
pub mod recovery;
pub mod rules;
pub mod selector;
pub mod value;

#[cfg(test)]
mod tests;
