//! Utility functions for code generation, URL processing, and database errors.
//!
//! - [`code_generator`] - Short code strategies and code-shape checks
//! - [`url_normalizer`] - URL validation and normalization
//! - [`db_error`] - SQLx error classification

pub mod code_generator;
pub mod db_error;
pub mod url_normalizer;
