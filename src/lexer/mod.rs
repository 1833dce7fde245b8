//! Lexical analysis for CSS source text.
//!
//! This module contains the tokenizer that converts stylesheet source into
//! the token stream the parser pulls from. It handles:
//!
//! - Tokenization using an ordered table of regex patterns
//! - Identifiers, at-keywords, functions, numbers, dimensions, strings, urls
//! - Trivia (whitespace, comments, `<!--` and `-->`) kept as real tokens
//! - Exact source text and offsets on every token, so the stream round-trips

pub mod cursor;
pub mod lexer;
pub mod tokens;
