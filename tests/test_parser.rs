use outpost::http::parser::{ParseError, read_request};
use outpost::http::request::Method;

#[tokio::test]
async fn test_parse_simple_get_request() {
    let mut req: &[u8] = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = read_request(&mut req).await.unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
    assert!(parsed.body.is_empty());
}

#[tokio::test]
async fn test_parse_post_request_with_body() {
    let mut req: &[u8] = b"POST /files/a.txt HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let parsed = read_request(&mut req).await.unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.path, "/files/a.txt");
    assert_eq!(parsed.body, b"hello".to_vec());
}

#[tokio::test]
async fn test_parse_does_not_read_past_body() {
    let mut req: &[u8] = b"POST /x HTTP/1.1\r\nContent-Length: 3\r\n\r\nabcNEXT";
    let parsed = read_request(&mut req).await.unwrap();

    assert_eq!(parsed.body, b"abc".to_vec());
    assert_eq!(req, b"NEXT");
}

#[tokio::test]
async fn test_parse_without_content_length_stops_after_headers() {
    let mut req: &[u8] = b"GET / HTTP/1.1\r\n\r\nleftover";
    let parsed = read_request(&mut req).await.unwrap();

    assert!(parsed.body.is_empty());
    assert_eq!(req, b"leftover");
}

#[tokio::test]
async fn test_parse_multiple_headers() {
    let mut req: &[u8] =
        b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let parsed = read_request(&mut req).await.unwrap();

    assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
    assert_eq!(parsed.headers.get("User-Agent").unwrap(), "test-client");
    assert_eq!(parsed.headers.get("Accept").unwrap(), "*/*");
}

#[tokio::test]
async fn test_parse_duplicate_header_last_wins() {
    let mut req: &[u8] = b"GET / HTTP/1.1\r\nX-Tag: first\r\nX-Tag: second\r\n\r\n";
    let parsed = read_request(&mut req).await.unwrap();

    assert_eq!(parsed.header("X-Tag"), Some("second"));
}

#[tokio::test]
async fn test_parse_header_names_are_case_sensitive() {
    let mut req: &[u8] = b"GET / HTTP/1.1\r\nuser-agent: lower\r\n\r\n";
    let parsed = read_request(&mut req).await.unwrap();

    assert_eq!(parsed.header("user-agent"), Some("lower"));
    assert_eq!(parsed.header("User-Agent"), None);
}

#[tokio::test]
async fn test_parse_skips_header_without_separator() {
    let mut req: &[u8] = b"GET / HTTP/1.1\r\nBrokenHeader\r\nHost: ok\r\n\r\n";
    let parsed = read_request(&mut req).await.unwrap();

    assert_eq!(parsed.headers.len(), 1);
    assert_eq!(parsed.header("Host"), Some("ok"));
}

#[tokio::test]
async fn test_parse_tolerates_bare_newlines() {
    let mut req: &[u8] = b"GET /user-agent HTTP/1.1\nUser-Agent: curl/8.0\n\n";
    let parsed = read_request(&mut req).await.unwrap();

    assert_eq!(parsed.path, "/user-agent");
    assert_eq!(parsed.header("User-Agent"), Some("curl/8.0"));
}

#[tokio::test]
async fn test_parse_request_line_without_version() {
    let mut req: &[u8] = b"GET /echo/hi\r\n\r\n";
    let parsed = read_request(&mut req).await.unwrap();

    assert_eq!(parsed.path, "/echo/hi");
    assert_eq!(parsed.version, "HTTP/1.1");
}

#[tokio::test]
async fn test_parse_single_token_request_line() {
    let mut req: &[u8] = b"GET\r\n\r\n";
    let result = read_request(&mut req).await;

    assert!(matches!(result, Err(ParseError::MalformedRequestLine(_))));
}

#[tokio::test]
async fn test_parse_path_must_be_absolute() {
    let mut req: &[u8] = b"GET echo HTTP/1.1\r\n\r\n";
    let result = read_request(&mut req).await;

    assert!(matches!(result, Err(ParseError::MalformedRequestLine(_))));
}

#[tokio::test]
async fn test_parse_invalid_http_method() {
    let mut req: &[u8] = b"INVALID / HTTP/1.1\r\n\r\n";
    let result = read_request(&mut req).await;

    assert!(matches!(result, Err(ParseError::UnsupportedMethod(m)) if m == "INVALID"));
}

#[tokio::test]
async fn test_parse_lowercase_method_is_unsupported() {
    let mut req: &[u8] = b"get / HTTP/1.1\r\n\r\n";
    let result = read_request(&mut req).await;

    assert!(matches!(result, Err(ParseError::UnsupportedMethod(_))));
}

#[tokio::test]
async fn test_parse_invalid_content_length() {
    for value in ["abc", "-1", "1.5"] {
        let raw = format!("POST /x HTTP/1.1\r\nContent-Length: {}\r\n\r\n", value);
        let mut req = raw.as_bytes();
        let result = read_request(&mut req).await;

        assert!(
            matches!(result, Err(ParseError::InvalidContentLength(_))),
            "Content-Length {:?} should be rejected",
            value
        );
    }
}

#[tokio::test]
async fn test_parse_incomplete_headers_is_read_error() {
    let mut req: &[u8] = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    let result = read_request(&mut req).await;

    assert!(matches!(result, Err(ParseError::ConnectionRead(_))));
}

#[tokio::test]
async fn test_parse_truncated_body_is_read_error() {
    let mut req: &[u8] = b"POST /api HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";
    let result = read_request(&mut req).await;

    assert!(matches!(result, Err(ParseError::ConnectionRead(_))));
}

#[tokio::test]
async fn test_parse_empty_stream_is_read_error() {
    let mut req: &[u8] = b"";
    let result = read_request(&mut req).await;

    assert!(matches!(result, Err(ParseError::ConnectionRead(_))));
}

#[tokio::test]
async fn test_parse_recognised_methods() {
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
        let raw = format!("{} / HTTP/1.1\r\n\r\n", method_str);
        let mut req = raw.as_bytes();
        let parsed = read_request(&mut req).await.unwrap();
        assert_eq!(parsed.method, expected_method);
    }
}

#[tokio::test]
async fn test_parse_request_with_empty_body() {
    let mut req: &[u8] = b"POST /api HTTP/1.1\r\nContent-Length: 0\r\n\r\n";
    let parsed = read_request(&mut req).await.unwrap();

    assert_eq!(parsed.body.len(), 0);
}

#[tokio::test]
async fn test_parse_request_with_binary_body() {
    let mut req: &[u8] = b"POST /upload HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\x01\x02\x03";
    let parsed = read_request(&mut req).await.unwrap();

    assert_eq!(parsed.body, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_parse_huge_content_length_with_short_body() {
    let mut req: &[u8] = b"POST /files/x HTTP/1.1\r\nContent-Length: 1099511627776\r\n\r\nabc";
    let result = read_request(&mut req).await;

    assert!(matches!(
        result,
        Err(ParseError::ConnectionRead(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof
    ));
}

#[tokio::test]
async fn test_parse_non_utf8_request_line_is_malformed() {
    let mut req: &[u8] = b"GET /echo/\xff\xfe HTTP/1.1\r\n\r\n";
    let result = read_request(&mut req).await;

    assert!(matches!(result, Err(ParseError::MalformedRequestLine(_))));
}

#[tokio::test]
async fn test_parse_skips_non_utf8_header_line() {
    let mut req: &[u8] = b"GET /user-agent HTTP/1.1\r\nUser-Agent: bad\xff\r\nHost: ok\r\n\r\n";
    let parsed = read_request(&mut req).await.unwrap();

    assert_eq!(parsed.header("User-Agent"), None);
    assert_eq!(parsed.header("Host"), Some("ok"));
}
