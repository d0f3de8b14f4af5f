//! Shell-like lexing of curl command text
//!
//! Two variants share the same quoting rules:
//!
//! - [`tokenize_with_positions`] records where every token starts and ends,
//!   for the validator and the editor.
//! - [`tokenize`] returns bare strings, for the parser.
//!
//! Rules: single quotes are literal; double quotes group but still honor
//! backslash escapes; a backslash escape keeps the backslash and the escaped
//! character in the value; backslash-newline outside quotes is a line
//! continuation; unquoted whitespace separates tokens. An unterminated quote
//! simply runs to the end of the input.

use serde::Serialize;

/// A whitespace-delimited unit of command text with its source span.
///
/// The span `[row,column)..[end_row,end_column)` covers the raw text,
/// including any quotes; `value` is the unquoted content. Columns count
/// characters, rows count `\n`-separated lines of the unmodified input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub value: String,
    pub row: usize,
    pub column: usize,
    pub end_row: usize,
    pub end_column: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Position {
    row: usize,
    column: usize,
}

impl Position {
    fn advance(&mut self, c: char) {
        if c == '\n' {
            self.row += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

/// Token under construction
struct Pending {
    value: String,
    start: Position,
    end: Position,
}

/// Scanner state for the positioned tokenizer
struct Lexer {
    tokens: Vec<Token>,
    pending: Option<Pending>,
    in_single_quote: bool,
    in_double_quote: bool,
    escape_next: bool,
    pos: Position,
}

impl Lexer {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            pending: None,
            in_single_quote: false,
            in_double_quote: false,
            escape_next: false,
            pos: Position::default(),
        }
    }

    fn quoted(&self) -> bool {
        self.in_single_quote || self.in_double_quote
    }

    /// Consume `c` as part of the current token, starting one if needed.
    /// `literal` is false for quote characters, which only delimit.
    fn take(&mut self, c: char, literal: bool) {
        let start = self.pos;
        self.pos.advance(c);
        let pending = self.pending.get_or_insert_with(|| Pending {
            value: String::new(),
            start,
            end: start,
        });
        if literal {
            pending.value.push(c);
        }
        pending.end = self.pos;
    }

    /// Consume a character that never belongs to a token
    fn skip(&mut self, c: char) {
        self.pos.advance(c);
    }

    fn flush(&mut self) {
        if let Some(p) = self.pending.take() {
            self.tokens.push(Token {
                value: p.value,
                row: p.start.row,
                column: p.start.column,
                end_row: p.end.row,
                end_column: p.end.column,
            });
        }
    }

    fn run(mut self, text: &str) -> Vec<Token> {
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            if self.escape_next {
                self.take(c, true);
                self.escape_next = false;
                continue;
            }

            match c {
                '\\' if !self.quoted() && chars.peek() == Some(&'\n') => {
                    self.skip(c);
                    if let Some(nl) = chars.next() {
                        self.skip(nl);
                    }
                }
                '\\' if !self.quoted() && chars.peek() == Some(&'\r') => {
                    let mut lookahead = chars.clone();
                    lookahead.next();
                    if lookahead.peek() == Some(&'\n') {
                        self.skip(c);
                        for _ in 0..2 {
                            if let Some(next) = chars.next() {
                                self.skip(next);
                            }
                        }
                    } else {
                        self.take(c, true);
                        self.escape_next = true;
                    }
                }
                '\\' if !self.in_single_quote => {
                    self.take(c, true);
                    self.escape_next = true;
                }
                '\'' if !self.in_double_quote => {
                    self.in_single_quote = !self.in_single_quote;
                    self.take(c, false);
                }
                '"' if !self.in_single_quote => {
                    self.in_double_quote = !self.in_double_quote;
                    self.take(c, false);
                }
                ' ' | '\t' | '\r' | '\n' if !self.quoted() => {
                    self.flush();
                    self.skip(c);
                }
                _ => self.take(c, true),
            }
        }

        self.flush();
        self.tokens
    }
}

/// Lex command text into tokens carrying their source spans
pub fn tokenize_with_positions(text: &str) -> Vec<Token> {
    let tokens = Lexer::new().run(text);
    tracing::trace!(count = tokens.len(), "tokenized with positions");
    tokens
}

/// Lex command text into bare token values.
///
/// Same rules as [`tokenize_with_positions`] without any position bookkeeping.
pub fn tokenize(cmd: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut started = false;
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut escape_next = false;
    let mut chars = cmd.chars().peekable();

    while let Some(c) = chars.next() {
        if escape_next {
            current.push(c);
            escape_next = false;
            continue;
        }

        let quoted = in_single_quote || in_double_quote;
        match c {
            '\\' if !quoted && chars.peek() == Some(&'\n') => {
                chars.next();
            }
            '\\' if !quoted && chars.peek() == Some(&'\r') => {
                let mut lookahead = chars.clone();
                lookahead.next();
                if lookahead.peek() == Some(&'\n') {
                    chars.next();
                    chars.next();
                } else {
                    current.push(c);
                    started = true;
                    escape_next = true;
                }
            }
            '\\' if !in_single_quote => {
                current.push(c);
                started = true;
                escape_next = true;
            }
            '\'' if !in_double_quote => {
                in_single_quote = !in_single_quote;
                started = true;
            }
            '"' if !in_single_quote => {
                in_double_quote = !in_double_quote;
                started = true;
            }
            ' ' | '\t' | '\r' | '\n' if !quoted => {
                if started {
                    tokens.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            _ => {
                current.push(c);
                started = true;
            }
        }
    }

    if started {
        tokens.push(current);
    }

    tokens
}
