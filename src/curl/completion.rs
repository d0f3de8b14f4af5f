//! Context-aware completion for curl command text
//!
//! Only the text before the cursor on the cursor's own line is considered.
//! It is matched against an ordered list of context rules and the first
//! rule that matches decides what to suggest:
//!
//! 1. inside an unclosed `{{` → environment variables
//! 2. right after `-X`/`--request` → HTTP methods
//! 3. right after `-H`/`--header` (optionally an opening quote) → common headers
//! 4. in the middle of a flag name → matching flags
//! 5. blank line or trailing whitespace → methods and the leading flags
//!
//! Anything else gets no suggestions.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::flags;
use crate::context::VariableSource;
use crate::http;
use crate::strings::{starts_with_ignore_case, truncate_str};

// Open `{{` not yet closed by `}}`; a single typed `}` keeps the context
static VARIABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{((?:[^{}]|\}[^{}])*)\}?$").expect("Invalid variable regex"));

static METHOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)(?:-X|--request)\s?$").expect("Invalid method regex"));

static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:^|\s)(?:-H|--header)\s?['"]?$"#).expect("Invalid header regex"));

static FLAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\s)(-[A-Za-z-]*)$").expect("Invalid flag regex"));

const VARIABLE_SCORE: i32 = 500;
const METHOD_SCORE: i32 = 1000;
const HEADER_SCORE: i32 = 900;
const FLAG_SCORE: i32 = 800;
const GENERAL_METHOD_SCORE: i32 = 400;
const GENERAL_FLAG_SCORE: i32 = 300;

/// What the user is typing at the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionContext {
    Variable,
    Method,
    Header,
    Flag,
    General,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Variable,
    Method,
    Header,
    Flag,
}

/// One autocomplete entry; higher `score` ranks first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub caption: String,
    pub value: String,
    pub kind: SuggestionKind,
    pub description: String,
    pub score: i32,
}

impl Suggestion {
    fn new(caption: &str, kind: SuggestionKind, description: &str, score: i32) -> Self {
        Self {
            caption: caption.to_string(),
            value: caption.to_string(),
            kind,
            description: description.to_string(),
            score,
        }
    }
}

/// Classified context plus the suggestions for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub context: CompletionContext,
    /// Partial word the context rule captured (variable name or flag fragment)
    pub fragment: String,
    pub suggestions: Vec<Suggestion>,
}

/// Common headers offered after `-H`, in ranking order
pub const COMMON_HEADERS: &[(&str, &str)] = &[
    ("Content-Type: application/json", "JSON request body"),
    ("Content-Type: application/x-www-form-urlencoded", "URL-encoded form body"),
    ("Content-Type: multipart/form-data", "Multipart form body"),
    ("Content-Type: text/plain", "Plain text body"),
    ("Content-Type: application/xml", "XML request body"),
    ("Authorization: Bearer ", "Bearer token authentication"),
    ("Authorization: Basic ", "Basic authentication (base64 user:password)"),
    ("Accept: application/json", "Expect a JSON response"),
    ("Accept: */*", "Accept any response type"),
    ("Accept-Encoding: gzip, deflate", "Accept compressed responses"),
    ("Cache-Control: no-cache", "Bypass caches"),
    ("User-Agent: ", "Identify the client"),
    ("X-API-Key: ", "API key authentication"),
    ("X-Request-ID: ", "Correlation id for tracing"),
    ("X-Requested-With: XMLHttpRequest", "Mark the request as AJAX"),
];

type Detector = fn(&str) -> Option<String>;

/// Context rules in priority order; the first match wins
const CONTEXT_RULES: &[(CompletionContext, Detector)] = &[
    (CompletionContext::Variable, detect_variable),
    (CompletionContext::Method, detect_method),
    (CompletionContext::Header, detect_header),
    (CompletionContext::Flag, detect_flag),
    (CompletionContext::General, detect_general),
];

fn detect_variable(line: &str) -> Option<String> {
    VARIABLE_RE.captures(line).map(|cap| cap[1].to_string())
}

fn detect_method(line: &str) -> Option<String> {
    METHOD_RE.is_match(line).then(String::new)
}

fn detect_header(line: &str) -> Option<String> {
    HEADER_RE.is_match(line).then(String::new)
}

fn detect_flag(line: &str) -> Option<String> {
    FLAG_RE.captures(line).map(|cap| cap[1].to_string())
}

fn detect_general(line: &str) -> Option<String> {
    let blank = line.chars().all(char::is_whitespace);
    let trailing = line.chars().last().is_some_and(char::is_whitespace);
    (blank || trailing).then(String::new)
}

/// Classify the text before the cursor on its line
pub fn classify_context(line_before_cursor: &str) -> (CompletionContext, String) {
    CONTEXT_RULES
        .iter()
        .find_map(|(context, detect)| detect(line_before_cursor).map(|fragment| (*context, fragment)))
        .unwrap_or((CompletionContext::None, String::new()))
}

/// Text on `row` before `column` (in characters); out-of-range positions clamp
pub fn line_before_cursor(text: &str, row: usize, column: usize) -> &str {
    let line = text.split('\n').nth(row).unwrap_or("");
    match line.char_indices().nth(column) {
        Some((byte_pos, _)) => &line[..byte_pos],
        None => line,
    }
}

/// Tunables for the completer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionSettings {
    /// Characters of a variable's value shown in its description
    pub variable_preview_len: usize,
    /// How many flags the general context offers
    pub general_flag_count: usize,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            variable_preview_len: 30,
            general_flag_count: 10,
        }
    }
}

/// Stateless completion provider; holds only its settings
#[derive(Debug, Clone, Default)]
pub struct Completer {
    settings: CompletionSettings,
}

impl Completer {
    pub fn new(settings: CompletionSettings) -> Self {
        Self { settings }
    }

    /// Classify the cursor context and build its suggestions.
    ///
    /// `prefix` is the word the host editor considers typed so far; when it
    /// starts with `-` it filters flags, otherwise the fragment captured from
    /// the line does. `variables` is read only in the variable context, and a
    /// missing or unavailable store yields no variable suggestions.
    pub fn complete(
        &self,
        text: &str,
        row: usize,
        column: usize,
        prefix: &str,
        variables: Option<&dyn VariableSource>,
    ) -> Completion {
        let line = line_before_cursor(text, row, column);
        let (context, fragment) = classify_context(line);

        let suggestions = match context {
            CompletionContext::Variable => self.variable_suggestions(variables),
            CompletionContext::Method => method_suggestions(METHOD_SCORE),
            CompletionContext::Header => header_suggestions(),
            CompletionContext::Flag => {
                let filter = if prefix.starts_with('-') { prefix } else { fragment.as_str() };
                flag_suggestions(filter)
            }
            CompletionContext::General => self.general_suggestions(),
            CompletionContext::None => Vec::new(),
        };

        debug!(?context, fragment = %fragment, suggestions = suggestions.len(), "completion context");
        Completion { context, fragment, suggestions }
    }

    fn variable_suggestions(&self, variables: Option<&dyn VariableSource>) -> Vec<Suggestion> {
        let Some(vars) = variables.and_then(|source| source.enabled_variables()) else {
            debug!("variable store unavailable");
            return Vec::new();
        };

        vars.iter()
            .map(|v| {
                let caption = format!("{{{{{}}}}}", v.key);
                let preview = truncate_str(&v.value, self.settings.variable_preview_len);
                Suggestion::new(&caption, SuggestionKind::Variable, &preview, VARIABLE_SCORE)
            })
            .collect()
    }

    fn general_suggestions(&self) -> Vec<Suggestion> {
        let mut suggestions = method_suggestions(GENERAL_METHOD_SCORE);
        suggestions.extend(
            flags::FLAGS
                .iter()
                .take(self.settings.general_flag_count)
                .zip(0..)
                .map(|(flag, i)| {
                    Suggestion::new(flag.primary(), SuggestionKind::Flag, flag.description, GENERAL_FLAG_SCORE - i)
                }),
        );
        suggestions
    }
}

fn method_suggestions(top_score: i32) -> Vec<Suggestion> {
    http::STANDARD_METHODS
        .iter()
        .zip(0..)
        .map(|(method, i)| Suggestion::new(method, SuggestionKind::Method, http::describe(method), top_score - i * 10))
        .collect()
}

fn header_suggestions() -> Vec<Suggestion> {
    COMMON_HEADERS
        .iter()
        .zip(0..)
        .map(|((header, description), i)| Suggestion::new(header, SuggestionKind::Header, description, HEADER_SCORE - i))
        .collect()
}

fn flag_suggestions(filter: &str) -> Vec<Suggestion> {
    flags::spellings()
        .filter(|(spelling, _)| starts_with_ignore_case(spelling, filter))
        .zip(0..)
        .map(|((spelling, flag), i)| Suggestion::new(spelling, SuggestionKind::Flag, flag.description, FLAG_SCORE - i))
        .collect()
}

/// Suggestions at the cursor with default settings
pub fn get_completions(
    text: &str,
    row: usize,
    column: usize,
    prefix: &str,
    variables: Option<&dyn VariableSource>,
) -> Vec<Suggestion> {
    Completer::default().complete(text, row, column, prefix, variables).suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{EnvironmentStore, NamedEnvironment, Variable};

    fn store() -> EnvironmentStore {
        let mut hidden = Variable::new("secret", "x");
        hidden.enabled = false;
        EnvironmentStore {
            active: Some("dev".to_string()),
            environments: vec![NamedEnvironment {
                name: "dev".to_string(),
                variables: vec![
                    Variable::new("baseUrl", "https://api.dev.test"),
                    Variable::new("longValue", "a".repeat(40)),
                    hidden,
                ],
            }],
        }
    }

    fn captions(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.caption.as_str()).collect()
    }

    fn end_of(text: &str) -> (usize, usize) {
        let row = text.split('\n').count() - 1;
        let col = text.split('\n').last().unwrap().chars().count();
        (row, col)
    }

    #[test]
    fn test_classify_order() {
        assert_eq!(classify_context("curl {{ba").0, CompletionContext::Variable);
        assert_eq!(classify_context("curl -X").0, CompletionContext::Method);
        assert_eq!(classify_context("curl -X ").0, CompletionContext::Method);
        assert_eq!(classify_context("curl --request ").0, CompletionContext::Method);
        assert_eq!(classify_context("curl -H ").0, CompletionContext::Header);
        assert_eq!(classify_context("curl -H '").0, CompletionContext::Header);
        assert_eq!(classify_context("curl --header \"").0, CompletionContext::Header);
        assert_eq!(classify_context("curl --he").0, CompletionContext::Flag);
        assert_eq!(classify_context("-").0, CompletionContext::Flag);
        assert_eq!(classify_context("").0, CompletionContext::General);
        assert_eq!(classify_context("curl https://a.com ").0, CompletionContext::General);
        assert_eq!(classify_context("curl https://a.c").0, CompletionContext::None);
        assert_eq!(classify_context("curl {{a}}").0, CompletionContext::None);
    }

    #[test]
    fn test_variable_inside_header_value() {
        // Variable rule outranks the header rule
        let (context, fragment) = classify_context("curl -H 'Authorization: Bearer {{to");
        assert_eq!(context, CompletionContext::Variable);
        assert_eq!(fragment, "to");
    }

    #[test]
    fn test_half_closed_variable() {
        let (context, fragment) = classify_context("curl {{name}");
        assert_eq!(context, CompletionContext::Variable);
        assert_eq!(fragment, "name");
        assert_eq!(classify_context("curl {{a}} -H '{{tok").1, "tok");
        assert_eq!(classify_context("curl {{name}} ").0, CompletionContext::General);
    }

    #[test]
    fn test_method_needs_word_boundary() {
        assert_eq!(classify_context("curl x-X ").0, CompletionContext::General);
    }

    #[test]
    fn test_header_context_lists_common_headers() {
        let text = "curl https://a.com -H ";
        let (row, col) = end_of(text);
        let completion = Completer::default().complete(text, row, col, "", None);
        assert_eq!(completion.context, CompletionContext::Header);

        let expected: Vec<&str> = COMMON_HEADERS.iter().map(|(h, _)| *h).collect();
        assert_eq!(captions(&completion.suggestions), expected);
        assert!(completion.suggestions.windows(2).all(|w| w[0].score > w[1].score));
    }

    #[test]
    fn test_method_ranking() {
        let suggestions = get_completions("curl -X ", 0, 8, "", None);
        assert_eq!(suggestions[0].caption, "GET");
        assert_eq!(suggestions.len(), http::STANDARD_METHODS.len());
        assert!(suggestions.windows(2).all(|w| w[0].score > w[1].score));
        assert!(suggestions.iter().all(|s| s.kind == SuggestionKind::Method));
    }

    #[test]
    fn test_flag_prefix_filter() {
        let suggestions = get_completions("curl https://a.com --da", 0, 23, "", None);
        assert_eq!(
            captions(&suggestions),
            vec!["--data", "--data-raw", "--data-urlencode", "--data-binary", "--data-ascii"]
        );
        assert!(suggestions.windows(2).all(|w| w[0].score > w[1].score));
    }

    #[test]
    fn test_flag_prefix_from_host() {
        let suggestions = get_completions("curl -", 0, 6, "-", None);
        assert_eq!(suggestions.len(), flags::spellings().count());

        // Case-insensitive: "-x" matches both -X and -x
        let suggestions = get_completions("curl -x", 0, 7, "", None);
        assert_eq!(captions(&suggestions), vec!["-X", "-x"]);
    }

    #[test]
    fn test_general_context() {
        let suggestions = get_completions("curl https://a.com ", 0, 19, "", None);
        let methods = http::STANDARD_METHODS.len();
        assert_eq!(suggestions.len(), methods + 10);
        assert_eq!(suggestions[methods].caption, "-X");
        assert!(suggestions.iter().all(|s| s.score < FLAG_SCORE - 100));
        assert!(suggestions.windows(2).all(|w| w[0].score > w[1].score));
    }

    #[test]
    fn test_general_flag_count_setting() {
        let completer = Completer::new(CompletionSettings { general_flag_count: 3, ..Default::default() });
        let completion = completer.complete("", 0, 0, "", None);
        assert_eq!(completion.suggestions.len(), http::STANDARD_METHODS.len() + 3);
    }

    #[test]
    fn test_variable_suggestions() {
        let store = store();
        let text = "curl {{ba";
        let completion = Completer::default().complete(text, 0, 9, "ba", Some(&store));
        assert_eq!(completion.context, CompletionContext::Variable);
        assert_eq!(captions(&completion.suggestions), vec!["{{baseUrl}}", "{{longValue}}"]);
        assert!(completion.suggestions.iter().all(|s| s.score == VARIABLE_SCORE));
        assert_eq!(completion.suggestions[0].description, "https://api.dev.test");
        assert_eq!(completion.suggestions[1].description, format!("{}...", "a".repeat(30)));
    }

    #[test]
    fn test_variables_without_store() {
        assert!(get_completions("{{", 0, 2, "", None).is_empty());
        let empty = EnvironmentStore::default();
        assert!(get_completions("{{", 0, 2, "", Some(&empty)).is_empty());
    }

    #[test]
    fn test_only_current_line_counts() {
        let text = "curl -X \\\nPO";
        // Cursor at end of second line: "PO" is not a method context
        assert!(get_completions(text, 1, 2, "PO", None).is_empty());
        // Cursor at start of the second line is general
        let completion = Completer::default().complete(text, 1, 0, "", None);
        assert_eq!(completion.context, CompletionContext::General);
    }

    #[test]
    fn test_cursor_mid_line() {
        let text = "curl -H  https://a.com";
        let completion = Completer::default().complete(text, 0, 8, "", None);
        assert_eq!(completion.context, CompletionContext::Header);
    }

    #[test]
    fn test_out_of_range_cursor_clamps() {
        assert_eq!(line_before_cursor("ab\ncd", 5, 0), "");
        assert_eq!(line_before_cursor("ab\ncd", 1, 99), "cd");
        assert_eq!(line_before_cursor("héllo", 0, 2), "hé");
    }
}
