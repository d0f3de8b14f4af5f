//! Strict linting of curl command text
//!
//! Produces positioned [`Diagnostic`]s for an editor to underline. Two
//! independent passes run over the raw text and their results are
//! concatenated: a quote-balance scan, then a token scan that checks flags,
//! their values and the presence of a URL.

use tracing::debug;

use super::flags;
use super::parser::{is_curl_word, is_url};
use super::similarity::{suggest_flag, DEFAULT_SUGGESTION_THRESHOLD};
use super::tokenizer::{tokenize_with_positions, Token};
use crate::http;
use crate::models::{Diagnostic, DiagnosticKind};

pub const MISSING_URL: &str = "Missing URL. A cURL command needs a URL.";

/// Tunables for the validator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatorSettings {
    /// Minimum similarity an unknown flag needs for a "Did you mean" hint
    pub suggestion_threshold: f64,
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        Self {
            suggestion_threshold: DEFAULT_SUGGESTION_THRESHOLD,
        }
    }
}

/// Stateless linter; holds only its settings
#[derive(Debug, Clone, Default)]
pub struct Validator {
    settings: ValidatorSettings,
}

impl Validator {
    pub fn new(settings: ValidatorSettings) -> Self {
        Self { settings }
    }

    /// Lint command text, returning diagnostics in scan order
    pub fn validate(&self, text: &str) -> Vec<Diagnostic> {
        let mut diagnostics = check_quotes(text);
        let tokens = tokenize_with_positions(text);
        diagnostics.extend(self.check_tokens(&tokens));
        debug!(tokens = tokens.len(), diagnostics = diagnostics.len(), "validated curl command");
        diagnostics
    }

    fn check_tokens(&self, tokens: &[Token]) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut has_url = false;
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];
            let value = token.value.as_str();

            if is_curl_word(value) {
                i += 1;
                continue;
            }

            if value.starts_with('-') {
                i += self.check_flag(token, tokens.get(i + 1), &mut has_url, &mut diagnostics);
            } else if is_url(value) {
                has_url = true;
            }

            i += 1;
        }

        if !has_url {
            let anchor = tokens.iter().find(|t| !is_curl_word(&t.value)).or(tokens.first());
            if let Some(anchor) = anchor {
                diagnostics.push(at_token(anchor, MISSING_URL, DiagnosticKind::Error));
            }
        }

        diagnostics
    }

    /// Check one flag token; returns how many following tokens it consumed
    fn check_flag(
        &self,
        token: &Token,
        next: Option<&Token>,
        has_url: &mut bool,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> usize {
        let name = token.value.as_str();

        if !flags::is_known(name) {
            diagnostics.push(at_token(token, &self.unknown_flag_message(name), DiagnosticKind::Error));
            return 0;
        }

        // Clusters hold only value-less flags
        let Some(spec) = flags::lookup_flag(name) else {
            return 0;
        };

        if !spec.takes_value {
            return 0;
        }

        let Some(arg) = next.filter(|t| !t.value.starts_with('-')) else {
            let text = format!("Flag \"{}\" requires a value", name);
            diagnostics.push(at_token(token, &text, DiagnosticKind::Error));
            return 0;
        };

        match spec.long {
            "--request" => {
                let method = arg.value.to_uppercase();
                if !http::is_standard(&method) {
                    let text = format!(
                        "Invalid HTTP method \"{}\". Valid methods: {}",
                        arg.value,
                        http::standard_list()
                    );
                    diagnostics.push(at_token(arg, &text, DiagnosticKind::Error));
                }
            }
            "--header" => {
                if !arg.value.contains(':') {
                    let text = format!("Header \"{}\" should be in \"Name: Value\" format", arg.value);
                    diagnostics.push(at_token(arg, &text, DiagnosticKind::Warning));
                }
            }
            "--url" => *has_url = true,
            _ => {}
        }

        1
    }

    fn unknown_flag_message(&self, name: &str) -> String {
        match suggest_flag(name, self.settings.suggestion_threshold) {
            Some(suggestion) => format!("Unknown flag \"{}\". Did you mean \"{}\"?", name, suggestion),
            None => format!("Unknown flag \"{}\"", name),
        }
    }
}

/// Lint command text with default settings
pub fn validate_curl(text: &str) -> Vec<Diagnostic> {
    Validator::default().validate(text)
}

fn at_token(token: &Token, text: &str, kind: DiagnosticKind) -> Diagnostic {
    Diagnostic {
        row: token.row,
        column: token.column,
        end_row: token.end_row,
        end_column: token.end_column,
        text: text.to_string(),
        kind,
    }
}

/// Report a quote left open at end of input, anchored at its opening character.
///
/// Quote state carries across newlines.
fn check_quotes(text: &str) -> Vec<Diagnostic> {
    let mut open: Option<(char, usize, usize)> = None;
    let mut escape_next = false;
    let (mut row, mut column) = (0usize, 0usize);

    for c in text.chars() {
        if escape_next {
            escape_next = false;
        } else {
            match (c, open) {
                ('\\', Some(('\'', _, _))) => {}
                ('\\', _) => escape_next = true,
                ('\'' | '"', None) => open = Some((c, row, column)),
                (q, Some((opener, _, _))) if q == opener => open = None,
                _ => {}
            }
        }

        if c == '\n' {
            row += 1;
            column = 0;
        } else {
            column += 1;
        }
    }

    match open {
        Some((quote, row, column)) => {
            let text = if quote == '\'' {
                "Unclosed single quote"
            } else {
                "Unclosed double quote"
            };
            vec![Diagnostic {
                row,
                column,
                end_row: row,
                end_column: column + 1,
                text: text.to_string(),
                kind: DiagnosticKind::Error,
            }]
        }
        None => Vec::new(),
    }
}
