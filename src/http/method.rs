//! HTTP method constants and utilities

/// HTTP GET method
pub const GET: &str = "GET";

/// HTTP POST method
pub const POST: &str = "POST";

/// HTTP PUT method
pub const PUT: &str = "PUT";

/// HTTP PATCH method
pub const PATCH: &str = "PATCH";

/// HTTP DELETE method
pub const DELETE: &str = "DELETE";

/// HTTP HEAD method
pub const HEAD: &str = "HEAD";

/// HTTP OPTIONS method
pub const OPTIONS: &str = "OPTIONS";

/// HTTP TRACE method
pub const TRACE: &str = "TRACE";

/// HTTP CONNECT method
pub const CONNECT: &str = "CONNECT";

/// All standard HTTP methods, most commonly used first.
///
/// Completion ranks methods in this order.
pub const STANDARD_METHODS: &[&str] = &[
    GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS, TRACE, CONNECT,
];

/// Check if a string is a standard HTTP method
pub fn is_standard(method: &str) -> bool {
    STANDARD_METHODS.iter().any(|&m| m.eq_ignore_ascii_case(method))
}

/// Human-readable list of the standard methods, for diagnostics
pub fn standard_list() -> String {
    STANDARD_METHODS.join(", ")
}

/// Short description used as a completion tooltip
pub fn describe(method: &str) -> &'static str {
    match method {
        GET => "Retrieve a resource",
        POST => "Create a resource or submit data",
        PUT => "Replace a resource",
        PATCH => "Partially update a resource",
        DELETE => "Delete a resource",
        HEAD => "Retrieve headers only",
        OPTIONS => "Describe communication options",
        TRACE => "Echo the received request",
        CONNECT => "Open a tunnel to the server",
        _ => "",
    }
}
