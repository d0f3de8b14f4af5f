//! Structured request produced by the command parser
//!
//! All of these are value objects: the parser builds a fresh [`ParsedRequest`]
//! on every call and nothing here holds state between calls.

use serde::Serialize;
use url::Url;

use crate::http;

/// A request decoded from command text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRequest {
    pub method: String,
    pub url: UrlModel,
    pub headers: Vec<KeyValue>,
    pub body: BodyModel,
    pub auth: Option<AuthModel>,
}

impl Default for ParsedRequest {
    fn default() -> Self {
        Self {
            method: http::GET.to_string(),
            url: UrlModel::default(),
            headers: Vec::new(),
            body: BodyModel::None,
            auth: None,
        }
    }
}

impl ParsedRequest {
    /// Look up the first header with the given name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.key.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }
}

/// A key/value pair as shown in the request builder tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
    pub enabled: bool,
}

impl KeyValue {
    /// Entries parsed from text are always enabled
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }
}

/// The raw URL string plus the parts derived from it.
///
/// `raw` is authoritative; the other fields are recomputed from it and are
/// empty when the URL cannot be parsed (for example `{{baseUrl}}/users`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UrlModel {
    raw: String,
    protocol: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: Option<String>,
    query: Vec<KeyValue>,
}

impl UrlModel {
    /// Build a URL model, deriving scheme/host/path/query where possible.
    ///
    /// A missing scheme defaults to `http`.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let mut model = Self {
            raw,
            ..Self::default()
        };

        // Templated URLs only become meaningful after variable expansion
        if model.raw.is_empty() || model.raw.contains("{{") {
            return model;
        }

        let candidate = if model.raw.contains("://") {
            model.raw.clone()
        } else {
            format!("http://{}", model.raw)
        };

        if let Ok(url) = Url::parse(&candidate) {
            model.protocol = Some(url.scheme().to_string());
            model.host = url.host_str().map(String::from);
            model.port = url.port();
            model.path = Some(url.path().to_string());
            model.query = url
                .query_pairs()
                .map(|(k, v)| KeyValue::new(k.into_owned(), v.into_owned()))
                .collect();
        }

        model
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn query(&self) -> &[KeyValue] {
        &self.query
    }
}

/// Request body, tagged by mode. Only the field for the active mode exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum BodyModel {
    #[default]
    None,
    Raw {
        raw: String,
        language: RawLanguage,
    },
    Formdata {
        formdata: Vec<FormField>,
    },
    Urlencoded {
        urlencoded: Vec<KeyValue>,
    },
}

impl BodyModel {
    /// Name of the mode as used in the serialized form
    pub fn mode(&self) -> &'static str {
        match self {
            BodyModel::None => "none",
            BodyModel::Raw { .. } => "raw",
            BodyModel::Formdata { .. } => "formdata",
            BodyModel::Urlencoded { .. } => "urlencoded",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, BodyModel::None)
    }
}

/// Detected sub-language of a raw body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RawLanguage {
    Json,
    Xml,
    Html,
    Text,
}

impl RawLanguage {
    /// Guess the language of a raw body.
    ///
    /// Valid JSON wins; then anything wrapped in angle brackets is markup
    /// (HTML when it carries a doctype or `<html`); everything else is text.
    pub fn detect(content: &str) -> Self {
        let trimmed = content.trim();
        if !trimmed.is_empty() && serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
            return RawLanguage::Json;
        }
        if trimmed.starts_with('<') && trimmed.ends_with('>') {
            let lower = trimmed.to_ascii_lowercase();
            if lower.contains("<!doctype html") || lower.contains("<html") {
                return RawLanguage::Html;
            }
            return RawLanguage::Xml;
        }
        RawLanguage::Text
    }
}

/// Kind of a multipart form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldType {
    Text,
    File,
}

/// One multipart form field; for files `value` is the path without the `@`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub field_type: FormFieldType,
}

/// Where an API key is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Header,
    Query,
}

/// Request authentication, tagged by type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthModel {
    None,
    Bearer {
        token: String,
    },
    Basic {
        username: String,
        password: String,
    },
    Apikey {
        key: String,
        value: String,
        #[serde(rename = "in")]
        location: ApiKeyLocation,
    },
}

impl AuthModel {
    /// Basic credentials from `user:pass`; a missing colon means an empty password
    pub fn basic_from_pair(pair: &str) -> Self {
        let (username, password) = pair.split_once(':').unwrap_or((pair, ""));
        AuthModel::Basic {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}
