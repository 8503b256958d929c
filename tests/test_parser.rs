use waypoint::http::parser::{ParseError, parse_http_request};
use waypoint::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.target, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.header("Host"), Some("example.com"));
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /api HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let (parsed, consumed) = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.target, "/api");
    assert_eq!(&parsed.body[..], b"hello");
    assert_eq!(consumed, req.len());
}

#[test]
fn test_parse_preserves_query_string_in_target() {
    let req = b"GET /search?q=rust HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    // Splitting the query off the target is the dispatcher's job
    assert_eq!(parsed.target, "/search?q=rust");
}

#[test]
fn test_parse_lowercases_header_names() {
    let req = b"GET / HTTP/1.1\r\nContent-Type: application/json\r\nUser-Agent: test-client\r\n\r\n";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert!(parsed.headers.contains_key("content-type"));
    assert!(parsed.headers.contains_key("user-agent"));
    assert!(!parsed.headers.contains_key("Content-Type"));
}

#[test]
fn test_parse_incomplete_request_missing_blank_line() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n";

    assert!(matches!(
        parse_http_request(req),
        Err(ParseError::Incomplete)
    ));
}

#[test]
fn test_parse_incomplete_request_partial_body() {
    let req = b"POST /api HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";

    assert!(matches!(
        parse_http_request(req),
        Err(ParseError::Incomplete)
    ));
}

#[test]
fn test_parse_invalid_http_method() {
    let req = b"INVALID / HTTP/1.1\r\n\r\n";

    assert!(matches!(
        parse_http_request(req),
        Err(ParseError::InvalidMethod)
    ));
}

#[test]
fn test_parse_malformed_header() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\n\r\n";

    assert!(matches!(
        parse_http_request(req),
        Err(ParseError::InvalidHeader)
    ));
}

#[test]
fn test_parse_non_numeric_content_length() {
    let req = b"POST /api HTTP/1.1\r\nContent-Length: lots\r\n\r\n";

    assert!(matches!(
        parse_http_request(req),
        Err(ParseError::InvalidContentLength)
    ));
}

#[test]
fn test_parse_target_must_be_absolute() {
    let req = b"GET example.com HTTP/1.1\r\n\r\n";

    assert!(matches!(
        parse_http_request(req),
        Err(ParseError::InvalidRequest)
    ));
}

#[test]
fn test_parse_various_http_methods() {
    let methods = vec![
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("HEAD", Method::HEAD),
        ("OPTIONS", Method::OPTIONS),
        ("PATCH", Method::PATCH),
    ];

    for (method_str, expected_method) in methods {
        let req = format!("{} / HTTP/1.1\r\n\r\n", method_str);
        let (parsed, _) = parse_http_request(req.as_bytes()).unwrap();
        assert_eq!(parsed.method, expected_method);
    }
}

#[test]
fn test_parse_consumes_only_first_pipelined_request() {
    let first = b"GET /a HTTP/1.1\r\n\r\n";
    let mut raw = first.to_vec();
    raw.extend_from_slice(b"GET /b HTTP/1.1\r\n\r\n");

    let (parsed, consumed) = parse_http_request(&raw).unwrap();

    assert_eq!(parsed.target, "/a");
    assert_eq!(consumed, first.len());
}

#[test]
fn test_parse_request_with_binary_body() {
    let req = b"POST /upload HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\x01\x02\x03";
    let (parsed, _) = parse_http_request(req).unwrap();

    assert_eq!(&parsed.body[..], &[0, 1, 2, 3]);
}
