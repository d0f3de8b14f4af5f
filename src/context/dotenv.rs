//! .env file loading and variable expansion
//!
//! Supports loading variables from .env files and expanding `{{variable}}`
//! syntax in command text before it is parsed.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use crate::errors::CurlpadError;

/// `{{VAR_NAME}}` or `{{VAR_NAME:-default}}`
static EXPAND_VAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_.-]*)\s*(?::-([^}]*))?\}\}").expect("Invalid expand regex")
});

/// Variables read from a .env file, in file order
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    vars: IndexMap<String, String>,
}

impl EnvVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a .env file
    pub fn load_file(path: &Path) -> Result<Self, CurlpadError> {
        let content = fs::read_to_string(path).map_err(|e| {
            CurlpadError::Environment(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse(&content)
    }

    /// Parse .env file content
    pub fn parse(content: &str) -> Result<Self, CurlpadError> {
        let mut vars = IndexMap::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);
            match parse_env_line(line) {
                Some((key, value)) => {
                    vars.insert(key, value);
                }
                None => {
                    return Err(CurlpadError::Environment(format!(
                        "Invalid .env syntax at line {}: {}",
                        line_num + 1,
                        line
                    )));
                }
            }
        }

        Ok(Self { vars })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Parse a single .env line into key-value pair
fn parse_env_line(line: &str) -> Option<(String, String)> {
    let (key, value_part) = line.split_once('=')?;
    let key = key.trim();

    if key.is_empty() {
        return None;
    }

    let value_part = value_part.trim();

    let value = if value_part.len() >= 2 && value_part.starts_with('"') && value_part.ends_with('"') {
        unescape_double_quoted(&value_part[1..value_part.len() - 1])
    } else if value_part.len() >= 2 && value_part.starts_with('\'') && value_part.ends_with('\'') {
        value_part[1..value_part.len() - 1].to_string()
    } else {
        // Unquoted: stop at an inline comment
        match value_part.find(" #") {
            Some(pos) => value_part[..pos].trim().to_string(),
            None => value_part.to_string(),
        }
    };

    Some((key.to_string(), value))
}

fn unescape_double_quoted(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

/// Expand `{{variable}}` references.
///
/// Unknown names fall back to their `:-default`; names with neither a value
/// nor a default are reported together in one error.
pub fn expand_variables(input: &str, vars: &IndexMap<String, String>) -> Result<String, CurlpadError> {
    let mut missing: Vec<String> = Vec::new();

    let expanded = EXPAND_VAR_RE.replace_all(input, |cap: &regex::Captures| {
        let full_match = &cap[0];
        let name = &cap[1];
        match (vars.get(name), cap.get(2)) {
            (Some(value), _) => value.clone(),
            (None, Some(default)) => default.as_str().to_string(),
            (None, None) => {
                if !missing.iter().any(|m| m == name) {
                    missing.push(name.to_string());
                }
                full_match.to_string()
            }
        }
    });

    if !missing.is_empty() {
        return Err(CurlpadError::Environment(format!(
            "Undefined environment variables: {}",
            missing.join(", ")
        )));
    }

    Ok(expanded.into_owned())
}
