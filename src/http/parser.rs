use std::collections::HashMap;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::http::request::{Method, Request};

/// Reasons a request could not be read off a connection.
///
/// Every variant is fatal for its connection: nothing is written back and the
/// socket is closed.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),
    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),
    #[error("failed to read from connection: {0}")]
    ConnectionRead(#[from] std::io::Error),
}

/// Reads exactly one request from `reader`.
///
/// Consumes the request line, the header block and `Content-Length` body
/// bytes, and nothing past them.
pub async fn read_request<R>(reader: &mut R) -> Result<Request, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let raw_line = read_line(reader).await?;
    let request_line = String::from_utf8(raw_line).map_err(|e| {
        ParseError::MalformedRequestLine(String::from_utf8_lossy(e.as_bytes()).into_owned())
    })?;
    let (method, path, version) = parse_request_line(&request_line)?;

    let mut headers = HashMap::new();
    loop {
        let raw = read_line(reader).await?;
        if raw.is_empty() {
            break;
        }
        // Header lines that are not UTF-8 are skipped like lines without ": ".
        let Ok(line) = std::str::from_utf8(&raw) else {
            continue;
        };
        if let Some((key, value)) = parse_header_line(line) {
            headers.insert(key.to_string(), value.to_string());
        }
    }

    let body = match headers.get("Content-Length") {
        Some(value) => read_body(reader, parse_content_length(value)?).await?,
        None => Vec::new(),
    };

    Ok(Request {
        method,
        path,
        version,
        headers,
        body,
    })
}

/// Splits a request line into method, path and version.
///
/// The version token is optional and defaults to `HTTP/1.1`.
pub fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
    let mut parts = line.trim().split(' ');

    let method_str = parts.next().unwrap_or_default();
    let path = parts
        .next()
        .filter(|p| p.starts_with('/'))
        .ok_or_else(|| ParseError::MalformedRequestLine(line.trim().to_string()))?;
    let version = parts.next().filter(|v| !v.is_empty()).unwrap_or("HTTP/1.1");

    let method = Method::from_str(method_str)
        .ok_or_else(|| ParseError::UnsupportedMethod(method_str.to_string()))?;

    Ok((method, path.to_string(), version.to_string()))
}

/// Splits a header line on the first `": "`.
///
/// Lines without the separator yield `None` and are skipped by the caller.
pub fn parse_header_line(line: &str) -> Option<(&str, &str)> {
    line.split_once(": ")
}

fn parse_content_length(value: &str) -> Result<usize, ParseError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| ParseError::InvalidContentLength(value.to_string()))
}

/// Reads exactly `length` body bytes. The buffer grows with the bytes that
/// actually arrive, so a huge declared length costs nothing until it is sent.
async fn read_body<R>(reader: &mut R, length: usize) -> Result<Vec<u8>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut body = Vec::new();
    (&mut *reader).take(length as u64).read_to_end(&mut body).await?;

    if body.len() < length {
        return Err(unexpected_eof());
    }
    Ok(body)
}

fn unexpected_eof() -> ParseError {
    ParseError::ConnectionRead(std::io::Error::new(
        std::io::ErrorKind::UnexpectedEof,
        "connection closed mid-request",
    ))
}

/// Reads one `\n`-terminated line and returns its bytes with surrounding
/// ASCII whitespace trimmed. EOF before the terminator is a read failure.
async fn read_line<R>(reader: &mut R) -> Result<Vec<u8>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut raw = Vec::new();
    let n = reader.read_until(b'\n', &mut raw).await?;

    if n == 0 || raw.last() != Some(&b'\n') {
        return Err(unexpected_eof());
    }

    Ok(raw.trim_ascii().to_vec())
}
