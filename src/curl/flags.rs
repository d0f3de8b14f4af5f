//! Reference table of the curl flags the engine understands
//!
//! This is a curated subset of curl's options, the ones that matter when
//! composing HTTP test requests. The table is immutable and its order is
//! meaningful: completion ranks flags in table order, and the first entries
//! double as the suggestions offered in an empty context.

use serde::Serialize;

/// One known flag, with its short and long spellings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlagSpec {
    pub short: Option<&'static str>,
    pub long: &'static str,
    /// Whether the next token is consumed as this flag's argument
    pub takes_value: bool,
    pub description: &'static str,
}

impl FlagSpec {
    const fn new(
        short: Option<&'static str>,
        long: &'static str,
        takes_value: bool,
        description: &'static str,
    ) -> Self {
        Self { short, long, takes_value, description }
    }

    /// Short spelling when there is one, long spelling otherwise
    pub fn primary(&self) -> &'static str {
        self.short.unwrap_or(self.long)
    }

    /// Both spellings, short first
    pub fn spellings(&self) -> impl Iterator<Item = &'static str> {
        self.short.into_iter().chain(std::iter::once(self.long))
    }

    fn short_letter(&self) -> Option<char> {
        self.short.and_then(|s| s.chars().nth(1))
    }

    pub fn matches(&self, name: &str) -> bool {
        self.short == Some(name) || self.long == name
    }
}

pub const FLAGS: &[FlagSpec] = &[
    FlagSpec::new(Some("-X"), "--request", true, "Specify the HTTP method"),
    FlagSpec::new(Some("-H"), "--header", true, "Add a request header (Name: Value)"),
    FlagSpec::new(Some("-d"), "--data", true, "Send data in the request body"),
    FlagSpec::new(Some("-u"), "--user", true, "Basic auth credentials (user:password)"),
    FlagSpec::new(Some("-F"), "--form", true, "Add a multipart form field (key=value or key=@file)"),
    FlagSpec::new(None, "--data-raw", true, "Send data without interpreting @"),
    FlagSpec::new(None, "--data-urlencode", true, "Send a URL-encoded form field (key=value)"),
    FlagSpec::new(Some("-G"), "--get", false, "Force a GET request"),
    FlagSpec::new(Some("-I"), "--head", false, "Fetch headers only (HEAD request)"),
    FlagSpec::new(Some("-L"), "--location", false, "Follow redirects"),
    FlagSpec::new(None, "--data-binary", true, "Send data exactly as given"),
    FlagSpec::new(None, "--data-ascii", true, "Send data in the request body (alias of --data)"),
    FlagSpec::new(None, "--url", true, "Set the request URL"),
    FlagSpec::new(Some("-k"), "--insecure", false, "Skip TLS certificate verification"),
    FlagSpec::new(Some("-v"), "--verbose", false, "Verbose output"),
    FlagSpec::new(Some("-s"), "--silent", false, "Silent mode"),
    FlagSpec::new(Some("-S"), "--show-error", false, "Show errors even when silent"),
    FlagSpec::new(Some("-i"), "--include", false, "Include response headers in the output"),
    FlagSpec::new(Some("-f"), "--fail", false, "Fail on HTTP errors"),
    FlagSpec::new(Some("-o"), "--output", true, "Write the response body to a file"),
    FlagSpec::new(Some("-A"), "--user-agent", true, "Set the User-Agent header"),
    FlagSpec::new(Some("-e"), "--referer", true, "Set the Referer header"),
    FlagSpec::new(Some("-b"), "--cookie", true, "Send cookies (name=value or a file)"),
    FlagSpec::new(Some("-c"), "--cookie-jar", true, "Write received cookies to a file"),
    FlagSpec::new(Some("-m"), "--max-time", true, "Maximum time in seconds for the transfer"),
    FlagSpec::new(None, "--connect-timeout", true, "Maximum time in seconds to connect"),
    FlagSpec::new(None, "--max-redirs", true, "Maximum number of redirects to follow"),
    FlagSpec::new(Some("-x"), "--proxy", true, "Use the given proxy"),
    FlagSpec::new(None, "--compressed", false, "Request a compressed response"),
    FlagSpec::new(Some("-E"), "--cert", true, "Client certificate file"),
    FlagSpec::new(None, "--key", true, "Private key file for the client certificate"),
    FlagSpec::new(None, "--cacert", true, "CA certificate bundle to verify the peer"),
    FlagSpec::new(None, "--http1.1", false, "Use HTTP/1.1"),
    FlagSpec::new(None, "--http2", false, "Use HTTP/2"),
];

/// Find the table entry for an exact flag spelling (`-H` or `--header`)
pub fn lookup_flag(name: &str) -> Option<&'static FlagSpec> {
    FLAGS.iter().find(|f| f.matches(name))
}

/// Every spelling in table order, short before long
pub fn spellings() -> impl Iterator<Item = (&'static str, &'static FlagSpec)> {
    FLAGS.iter().flat_map(|f| f.spellings().map(move |s| (s, f)))
}

/// A run of value-less short flags written together, like `-sSL`.
pub fn is_cluster(token: &str) -> bool {
    let Some(rest) = token.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') || rest.chars().count() < 2 {
        return false;
    }
    rest.chars()
        .all(|c| FLAGS.iter().any(|f| !f.takes_value && f.short_letter() == Some(c)))
}

/// Exact spelling or a cluster of known value-less short flags
pub fn is_known(token: &str) -> bool {
    lookup_flag(token).is_some() || is_cluster(token)
}

/// Whether the flag consumes the following token
pub fn takes_value(name: &str) -> bool {
    lookup_flag(name).is_some_and(|f| f.takes_value)
}
