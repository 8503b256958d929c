use std::collections::HashMap;

use bytes::Bytes;
use waypoint::http::request::{Method, Request};

fn request_with_headers(headers: &[(&str, &str)]) -> Request {
    let headers: HashMap<String, String> = headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    Request {
        method: Method::GET,
        target: "/".to_string(),
        version: "HTTP/1.1".to_string(),
        headers,
        body: Bytes::new(),
    }
}

#[test]
fn test_header_lookup_is_case_insensitive() {
    let req = request_with_headers(&[("host", "example.com")]);

    assert_eq!(req.header("host"), Some("example.com"));
    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("HOST"), Some("example.com"));
    assert_eq!(req.header("missing"), None);
}

#[test]
fn test_content_length_parsing() {
    let req = request_with_headers(&[("content-length", "42")]);
    assert_eq!(req.content_length(), 42);
}

#[test]
fn test_content_length_missing_defaults_to_zero() {
    let req = request_with_headers(&[]);
    assert_eq!(req.content_length(), 0);
}

#[test]
fn test_content_length_invalid_defaults_to_zero() {
    let req = request_with_headers(&[("content-length", "not-a-number")]);
    assert_eq!(req.content_length(), 0);
}

#[test]
fn test_keep_alive_default_for_http11() {
    let req = request_with_headers(&[]);
    assert!(req.keep_alive());
}

#[test]
fn test_keep_alive_explicit() {
    let req = request_with_headers(&[("connection", "keep-alive")]);
    assert!(req.keep_alive());
}

#[test]
fn test_connection_close_disables_keep_alive() {
    let req = request_with_headers(&[("connection", "close")]);
    assert!(!req.keep_alive());

    let req = request_with_headers(&[("connection", "Close")]);
    assert!(!req.keep_alive());
}

#[test]
fn test_method_token_round_trip() {
    for method in [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::HEAD,
        Method::OPTIONS,
        Method::PATCH,
    ] {
        assert_eq!(Method::parse(method.as_str()), Some(method));
    }
}

#[test]
fn test_method_tokens_are_case_sensitive() {
    assert_eq!(Method::parse("get"), None);
    assert_eq!(Method::parse("Get"), None);
}
