//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network — the caller (host) is responsible for executing
//! the actual I/O. This separation keeps the core deterministic and easy to
//! test.
//!
//! All fields use owned types (`String`, `Vec`) so values can be handed to
//! whatever transport the host runs without lifetime concerns.

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by `TaskClient::build_*` methods. The caller is responsible for
/// executing this request against the network and returning the corresponding
/// `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`, then passed
/// to `TaskClient::parse_*` methods for deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Merge caller-supplied headers over the default JSON content type.
///
/// Every request carries `content-type: application/json` unless the caller
/// supplied a content-type of its own. Caller values are never overridden.
pub fn json_headers(extra: &[(String, String)]) -> Vec<(String, String)> {
    let mut headers = Vec::with_capacity(extra.len() + 1);
    let caller_sets_content_type = extra
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
    if !caller_sets_content_type {
        headers.push(("content-type".to_string(), "application/json".to_string()));
    }
    headers.extend(extra.iter().cloned());
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn json_headers_adds_default_content_type() {
        let headers = json_headers(&[]);
        assert_eq!(headers, vec![header("content-type", "application/json")]);
    }

    #[test]
    fn json_headers_keeps_caller_headers() {
        let headers = json_headers(&[header("x-request-id", "abc")]);
        assert_eq!(
            headers,
            vec![
                header("content-type", "application/json"),
                header("x-request-id", "abc"),
            ]
        );
    }

    #[test]
    fn json_headers_never_overrides_caller_content_type() {
        let headers = json_headers(&[header("Content-Type", "text/plain")]);
        assert_eq!(headers, vec![header("Content-Type", "text/plain")]);
    }
}
