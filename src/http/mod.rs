//! HTTP protocol types and constants
//!
//! Provides the HTTP method table shared by the parser, validator and completer.

mod method;

pub use method::*;
