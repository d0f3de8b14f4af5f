//! The curl command text engine
//!
//! Turns free-form `curl` command text into a structured request and gives
//! an editor the feedback it needs while the text is typed:
//!
//! - **Tokenizer**: shell-like lexing with source positions
//! - **Parser**: lenient conversion into a [`ParsedRequest`](crate::models::ParsedRequest)
//! - **Validator**: strict, positioned diagnostics with typo suggestions
//! - **Completion**: cursor-context classification and ranked suggestions
//!
//! Every operation is a pure function of its input plus the static flag and
//! method tables. Nothing is cached between calls, so callers may run them
//! from any thread and drop stale results freely.
//!
//! # Example
//!
//! ```
//! use curlpad::curl::{validate_curl, get_completions};
//!
//! let diagnostics = validate_curl("curl -XX POST https://api.test");
//! assert!(diagnostics[0].text.contains("Did you mean \"-X\"?"));
//!
//! let suggestions = get_completions("curl -X ", 0, 8, "", None);
//! assert_eq!(suggestions[0].caption, "GET");
//! ```

pub mod completion;
pub mod flags;
pub mod parser;
pub mod similarity;
pub mod tokenizer;
pub mod validator;

pub use completion::{
    classify_context, get_completions, Completer, Completion, CompletionContext, CompletionSettings,
    Suggestion, SuggestionKind,
};
pub use flags::{lookup_flag, FlagSpec};
pub use parser::curl_to_request;
pub use tokenizer::{tokenize, tokenize_with_positions, Token};
pub use validator::{validate_curl, Validator, ValidatorSettings};
