//! curlpad library interface
//!
//! A text engine for curl-style HTTP commands: lexing with positions,
//! lenient parsing into a structured request, strict linting with
//! positioned diagnostics, and cursor-context completion.
//!
//! # Module Organization
//!
//! - [`curl`] - Tokenizer, parser, validator and completion provider
//! - [`models`] - ParsedRequest and Diagnostic value objects
//! - [`http`] - HTTP method table
//! - [`context`] - Environment store and .env handling
//! - [`config`] - Configuration file
//! - [`errors`] - Error types (CurlpadError, Result)
//! - [`status`] - Exit status codes (ExitStatus)

pub mod cli;
pub mod config;
pub mod context;
pub mod curl;
pub mod errors;
pub mod http;
pub mod models;
pub mod status;
pub mod strings;

pub use curl::{curl_to_request, get_completions, tokenize_with_positions, validate_curl};
