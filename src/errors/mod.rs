//! Diagnostics for the stylesheet parser.
//!
//! This module defines the error types reported while building a rule tree.
//! It includes:
//!
//! - Error structures with source position information
//! - One variant per recoverable diagnostic, plus the fatal caller errors
//! - Error names and suggestion tips for rendering

pub mod errors;
