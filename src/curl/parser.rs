//! Lenient conversion of curl command text into a [`ParsedRequest`]
//!
//! The parser never fails. Anything it cannot classify is skipped, so a
//! half-typed or partly invalid command still yields everything that was
//! understood. Strict checking is the validator's job.
//!
//! # Example
//!
//! ```
//! use curlpad::curl::curl_to_request;
//!
//! let req = curl_to_request("curl https://api.test/users -H 'Accept: application/json' -d '{}'");
//! assert_eq!(req.method, "POST");
//! assert_eq!(req.url.raw(), "https://api.test/users");
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::flags;
use super::tokenizer::tokenize;
use crate::http;
use crate::models::{AuthModel, BodyModel, FormField, FormFieldType, KeyValue, ParsedRequest, RawLanguage, UrlModel};
use crate::strings::starts_with_ignore_case;

static LOOPBACK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(127\.\d{1,3}\.\d{1,3}\.\d{1,3}|0\.0\.0\.0|\[::1\])").expect("Invalid loopback regex")
});

/// Whether a token looks like the request URL.
///
/// Accepts explicit http(s) URLs, localhost and loopback addresses,
/// templated `{{...}}` bases, and as a fallback any non-flag token that
/// contains a dot.
pub fn is_url(token: &str) -> bool {
    if starts_with_ignore_case(token, "http://") || starts_with_ignore_case(token, "https://") {
        return true;
    }
    if starts_with_ignore_case(token, "localhost") || LOOPBACK_RE.is_match(token) {
        return true;
    }
    if token.starts_with("{{") {
        return true;
    }
    !token.starts_with('-') && token.contains('.') && !token.contains(' ')
}

/// Whether a token is the `curl` program name
pub fn is_curl_word(token: &str) -> bool {
    token.eq_ignore_ascii_case("curl")
}

/// Accumulates the request while tokens are scanned
#[derive(Default)]
struct RequestBuilder {
    request: ParsedRequest,
    url: Option<String>,
    /// Set once -X, -G or -I has chosen the method
    explicit_method: bool,
}

impl RequestBuilder {
    fn set_url(&mut self, url: &str) {
        if self.url.is_none() {
            self.url = Some(url.to_string());
        }
    }

    fn set_method(&mut self, method: &str) {
        if !self.explicit_method {
            self.request.method = method.to_uppercase();
            self.explicit_method = true;
        }
    }

    /// Body directives imply POST unless a method was given explicitly
    fn imply_post(&mut self) {
        if !self.explicit_method && self.request.method == http::GET {
            self.request.method = http::POST.to_string();
        }
    }

    fn set_auth(&mut self, auth: AuthModel) -> bool {
        if self.request.auth.is_some() {
            return false;
        }
        self.request.auth = Some(auth);
        true
    }

    fn add_header(&mut self, raw: &str) {
        let (key, value) = match raw.split_once(':') {
            Some((k, v)) => (k.trim(), v.trim()),
            None => (raw.trim(), ""),
        };

        if key.eq_ignore_ascii_case("Authorization") {
            if let Some(auth) = auth_from_header(value) {
                if !self.set_auth(auth) {
                    debug!("credentials already set, dropping Authorization header");
                }
                return;
            }
        }

        self.request.headers.push(KeyValue::new(key, value));
    }

    fn add_raw_data(&mut self, data: &str) {
        match &mut self.request.body {
            BodyModel::None => {
                self.request.body = BodyModel::Raw {
                    raw: data.to_string(),
                    language: RawLanguage::Text,
                };
            }
            BodyModel::Raw { raw, .. } => {
                raw.push('&');
                raw.push_str(data);
            }
            other => {
                debug!(mode = other.mode(), "ignoring raw data for a body already in another mode");
                return;
            }
        }
        self.imply_post();
    }

    fn add_urlencoded(&mut self, field: &str) {
        let (key, value) = field.split_once('=').unwrap_or((field, ""));
        match &mut self.request.body {
            BodyModel::None => {
                self.request.body = BodyModel::Urlencoded {
                    urlencoded: vec![KeyValue::new(key, value)],
                };
            }
            BodyModel::Urlencoded { urlencoded } => urlencoded.push(KeyValue::new(key, value)),
            other => {
                debug!(mode = other.mode(), "ignoring --data-urlencode for a body already in another mode");
                return;
            }
        }
        self.imply_post();
    }

    fn add_form_field(&mut self, field: &str) {
        let (key, value) = field.split_once('=').unwrap_or((field, ""));
        let form_field = match value.strip_prefix('@') {
            Some(path) => FormField {
                key: key.to_string(),
                value: path.to_string(),
                field_type: FormFieldType::File,
            },
            None => FormField {
                key: key.to_string(),
                value: value.to_string(),
                field_type: FormFieldType::Text,
            },
        };

        match &mut self.request.body {
            BodyModel::None => {
                self.request.body = BodyModel::Formdata {
                    formdata: vec![form_field],
                };
            }
            BodyModel::Formdata { formdata } => formdata.push(form_field),
            other => {
                debug!(mode = other.mode(), "ignoring form field for a body already in another mode");
                return;
            }
        }
        self.imply_post();
    }

    fn finish(mut self) -> ParsedRequest {
        if let BodyModel::Raw { raw, language } = &mut self.request.body {
            *language = RawLanguage::detect(raw);
        }
        if let Some(url) = self.url {
            self.request.url = UrlModel::parse(url);
        }
        self.request
    }
}

/// Decode an `Authorization` header value into structured auth.
///
/// Returns `None` for other schemes and for Basic credentials that are not
/// valid Base64 UTF-8, which then stay a plain header.
fn auth_from_header(value: &str) -> Option<AuthModel> {
    if starts_with_ignore_case(value, "bearer ") {
        return Some(AuthModel::Bearer {
            token: value[7..].trim().to_string(),
        });
    }

    if starts_with_ignore_case(value, "basic ") {
        let encoded = value[6..].trim();
        let decoded = STANDARD
            .decode(encoded)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok());
        return match decoded {
            Some(pair) => Some(AuthModel::basic_from_pair(&pair)),
            None => {
                debug!("Basic credentials are not valid base64, keeping header");
                None
            }
        };
    }

    None
}

/// Convert curl command text into a structured request.
///
/// Empty or unusable input yields the default request (GET, no URL).
/// `{{variables}}` are not looked up here; expand them first so templated
/// credentials decode into auth.
/// Singular fields (method, URL, auth) keep their first occurrence; headers
/// and body fields accumulate in order.
pub fn curl_to_request(command: &str) -> ParsedRequest {
    let tokens = tokenize(command);
    let mut builder = RequestBuilder::default();

    let mut i = 0;
    if tokens.first().is_some_and(|t| is_curl_word(t)) {
        i = 1;
    }

    while i < tokens.len() {
        let token = tokens[i].as_str();
        let value = tokens.get(i + 1).map(String::as_str);

        match (token, value) {
            ("-X" | "--request", Some(v)) => {
                builder.set_method(v);
                i += 1;
            }
            ("-u" | "--user", Some(v)) => {
                builder.set_auth(AuthModel::basic_from_pair(v));
                i += 1;
            }
            ("-H" | "--header", Some(v)) => {
                builder.add_header(v);
                i += 1;
            }
            ("-d" | "--data" | "--data-raw" | "--data-binary" | "--data-ascii", Some(v)) => {
                builder.add_raw_data(v);
                i += 1;
            }
            ("--data-urlencode", Some(v)) => {
                builder.add_urlencoded(v);
                i += 1;
            }
            ("-F" | "--form", Some(v)) => {
                builder.add_form_field(v);
                i += 1;
            }
            ("--url", Some(v)) => {
                builder.set_url(v);
                i += 1;
            }
            ("-G" | "--get", _) => builder.set_method(http::GET),
            ("-I" | "--head", _) => builder.set_method(http::HEAD),
            (flag, _) if flags::is_cluster(flag) => {
                for c in flag.chars().skip(1) {
                    match c {
                        'G' => builder.set_method(http::GET),
                        'I' => builder.set_method(http::HEAD),
                        _ => {}
                    }
                }
            }
            (flag, Some(_)) if flags::takes_value(flag) => {
                // Known transport flag: its argument is never the URL
                i += 1;
            }
            (other, _) if !other.starts_with('-') && is_url(other) => builder.set_url(other),
            _ => {}
        }

        i += 1;
    }

    let request = builder.finish();
    debug!(
        tokens = tokens.len(),
        method = %request.method,
        url = request.url.raw(),
        headers = request.headers.len(),
        body = request.body.mode(),
        "parsed curl command"
    );
    request
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(curl_to_request(""), ParsedRequest::default());
        assert_eq!(curl_to_request("curl"), ParsedRequest::default());
        assert_eq!(curl_to_request("   \n "), ParsedRequest::default());
    }

    #[test]
    fn test_simple_get() {
        let req = curl_to_request("curl https://example.com");
        assert_eq!(req.url.raw(), "https://example.com");
        assert_eq!(req.method, "GET");
        assert!(req.body.is_none());
    }

    #[test]
    fn test_without_curl_prefix() {
        let req = curl_to_request("https://api.test/x -X delete");
        assert_eq!(req.method, "DELETE");
        assert_eq!(req.url.raw(), "https://api.test/x");
    }

    #[test]
    fn test_data_forces_post() {
        let req = curl_to_request("https://api.test/x -d '{}'");
        assert_eq!(req.method, "POST");
        assert_eq!(
            req.body,
            BodyModel::Raw { raw: "{}".to_string(), language: RawLanguage::Json }
        );
    }

    #[test]
    fn test_explicit_method_not_overridden_by_data() {
        let req = curl_to_request("https://api.test/x -X GET -d '{}'");
        assert_eq!(req.method, "GET");

        let req = curl_to_request("https://api.test/x -d '{}' -X PUT");
        assert_eq!(req.method, "PUT");
    }

    #[test]
    fn test_first_method_wins() {
        let req = curl_to_request("https://a.com -X PATCH -X POST");
        assert_eq!(req.method, "PATCH");
    }

    #[test]
    fn test_get_and_head_flags() {
        assert_eq!(curl_to_request("https://a.com -I").method, "HEAD");
        assert_eq!(curl_to_request("https://a.com -G -d q=1").method, "GET");
        assert_eq!(curl_to_request("https://a.com -sIL").method, "HEAD");
    }

    #[test]
    fn test_first_url_wins() {
        let req = curl_to_request("curl https://one.test https://two.test");
        assert_eq!(req.url.raw(), "https://one.test");
    }

    #[test]
    fn test_url_detection() {
        assert!(is_url("http://a"));
        assert!(is_url("HTTPS://A.COM"));
        assert!(is_url("localhost:8080/x"));
        assert!(is_url("127.0.0.1:3000"));
        assert!(is_url("[::1]:8080/"));
        assert!(is_url("api.example.com/v1"));
        assert!(is_url("{{baseUrl}}/users"));
        assert!(!is_url("-H"));
        assert!(!is_url("POST"));
        assert!(!is_url("a. b"));
    }

    #[test]
    fn test_url_flag() {
        let req = curl_to_request("curl --url https://a.com/x -X POST");
        assert_eq!(req.url.raw(), "https://a.com/x");
    }

    #[test]
    fn test_transport_flag_value_is_not_url() {
        let req = curl_to_request("curl -o out.json https://a.com/file");
        assert_eq!(req.url.raw(), "https://a.com/file");
    }

    #[test]
    fn test_headers_accumulate_in_order() {
        let req = curl_to_request(
            "curl -H 'Content-Type: application/json' -H 'Accept: */*' --header 'X-Id:42' https://a.com",
        );
        assert_eq!(
            req.headers,
            vec![
                KeyValue::new("Content-Type", "application/json"),
                KeyValue::new("Accept", "*/*"),
                KeyValue::new("X-Id", "42"),
            ]
        );
        assert!(req.headers.iter().all(|h| h.enabled));
    }

    #[test]
    fn test_header_value_keeps_later_colons() {
        let req = curl_to_request("curl -H 'Referer: https://x.test:8080/' https://a.com");
        assert_eq!(req.header("referer"), Some("https://x.test:8080/"));
    }

    #[test]
    fn test_header_without_colon_is_kept() {
        let req = curl_to_request("curl -H 'X-Flag' https://a.com");
        assert_eq!(req.headers, vec![KeyValue::new("X-Flag", "")]);
    }

    #[test]
    fn test_bearer_auth_extracted() {
        let req = curl_to_request(r#"curl https://a.com -H "Authorization: Bearer abc123""#);
        assert_eq!(req.auth, Some(AuthModel::Bearer { token: "abc123".to_string() }));
        assert!(req.header("Authorization").is_none());
    }

    #[test]
    fn test_basic_header_decoded() {
        // dXNlcjpwYXNz = user:pass
        let req = curl_to_request("curl https://a.com -H 'authorization: basic dXNlcjpwYXNz'");
        assert_eq!(
            req.auth,
            Some(AuthModel::Basic { username: "user".into(), password: "pass".into() })
        );
        assert!(req.headers.is_empty());
    }

    #[test]
    fn test_invalid_basic_stays_header() {
        let req = curl_to_request("curl https://a.com -H 'Authorization: Basic %%%'");
        assert!(req.auth.is_none());
        assert_eq!(req.header("Authorization"), Some("Basic %%%"));
    }

    #[test]
    fn test_other_scheme_stays_header() {
        let req = curl_to_request("curl https://a.com -H 'Authorization: Digest abc'");
        assert!(req.auth.is_none());
        assert_eq!(req.headers.len(), 1);
    }

    #[test]
    fn test_user_flag() {
        let req = curl_to_request("curl -u admin:s3:cret https://a.com");
        assert_eq!(
            req.auth,
            Some(AuthModel::Basic { username: "admin".into(), password: "s3:cret".into() })
        );

        let req = curl_to_request("curl --user admin https://a.com");
        assert_eq!(
            req.auth,
            Some(AuthModel::Basic { username: "admin".into(), password: "".into() })
        );
    }

    #[test]
    fn test_first_auth_wins() {
        let req = curl_to_request("curl -u a:b -H 'Authorization: Bearer t' https://a.com");
        assert_eq!(req.auth, Some(AuthModel::Basic { username: "a".into(), password: "b".into() }));
        assert!(req.header("Authorization").is_none());

        let req = curl_to_request(
            "curl -H 'Authorization: Bearer one' -H 'Authorization: Bearer two' https://a.com",
        );
        assert_eq!(req.auth, Some(AuthModel::Bearer { token: "one".into() }));
        assert!(req.headers.is_empty());
    }

    #[test]
    fn test_unrecognized_authorization_stays_header() {
        let req = curl_to_request("curl -u a:b -H 'Authorization: Digest xyz' https://a.com");
        assert_eq!(req.header("Authorization"), Some("Digest xyz"));

        let req = curl_to_request("curl -H 'Authorization: Basic {{cred}}' https://a.com");
        assert!(req.auth.is_none());
        assert_eq!(req.header("Authorization"), Some("Basic {{cred}}"));
    }

    #[test]
    fn test_repeated_data_joined() {
        let req = curl_to_request("curl -d a=1 --data-raw b=2 https://a.com");
        assert_eq!(
            req.body,
            BodyModel::Raw { raw: "a=1&b=2".into(), language: RawLanguage::Text }
        );
    }

    #[test]
    fn test_raw_language_detection() {
        let req = curl_to_request("curl -d '<a><b/></a>' https://a.com");
        assert!(matches!(req.body, BodyModel::Raw { language: RawLanguage::Xml, .. }));

        let req = curl_to_request("curl -d '<!doctype html><p>x</p>' https://a.com");
        assert!(matches!(req.body, BodyModel::Raw { language: RawLanguage::Html, .. }));
    }

    #[test]
    fn test_urlencoded() {
        let req = curl_to_request("curl --data-urlencode 'q=a b' --data-urlencode flag https://a.com");
        assert_eq!(req.method, "POST");
        assert_eq!(
            req.body,
            BodyModel::Urlencoded {
                urlencoded: vec![KeyValue::new("q", "a b"), KeyValue::new("flag", "")],
            }
        );
    }

    #[test]
    fn test_form_fields() {
        let req = curl_to_request("curl -F name=John -F 'doc=@/tmp/a b.pdf' https://a.com/upload");
        assert_eq!(req.method, "POST");
        assert_eq!(
            req.body,
            BodyModel::Formdata {
                formdata: vec![
                    FormField { key: "name".into(), value: "John".into(), field_type: FormFieldType::Text },
                    FormField { key: "doc".into(), value: "/tmp/a b.pdf".into(), field_type: FormFieldType::File },
                ],
            }
        );
    }

    #[test]
    fn test_first_body_mode_wins() {
        let req = curl_to_request("curl -F a=1 -d raw https://a.com");
        assert_eq!(req.body.mode(), "formdata");
    }

    #[test]
    fn test_unknown_tokens_are_skipped() {
        let req = curl_to_request("curl --bogus https://a.com --also-bogus -Z");
        assert_eq!(req.url.raw(), "https://a.com");
        assert_eq!(req.method, "GET");
    }

    #[test]
    fn test_dangling_value_flag() {
        let req = curl_to_request("curl https://a.com -H");
        assert!(req.headers.is_empty());
        assert_eq!(req.url.raw(), "https://a.com");
    }

    #[test]
    fn test_multiline_command() {
        let req = curl_to_request(
            "curl -X POST https://api.test/users \\\n  -H 'Content-Type: application/json' \\\n  -d '{\"name\":\"John\"}'",
        );
        assert_eq!(req.method, "POST");
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert!(matches!(req.body, BodyModel::Raw { language: RawLanguage::Json, .. }));
        assert_eq!(req.url.host(), Some("api.test"));
    }
}
