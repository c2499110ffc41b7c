use crate::http::request::{Method, Request};
use std::collections::HashMap;

const CRLF: &[u8] = b"\r\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request line is not UTF-8 or has fewer than two tokens.
    InvalidRequest,
    /// Header line is not UTF-8 or lacks the `": "` separator.
    InvalidHeader,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidRequest => f.write_str("malformed request line"),
            ParseError::InvalidHeader => f.write_str("malformed header line"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses one request out of a single read buffer.
///
/// The buffer is split on CRLF. The first line is the request line, the
/// following lines up to the first empty one are headers, and the line after
/// that is the body. A body spanning several lines is cut at its first CRLF.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let mut lines = split_lines(buf);

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequest)?;
    let request_line =
        std::str::from_utf8(request_line).map_err(|_| ParseError::InvalidRequest)?;
    let mut parts = request_line.split(' ');

    let method = parts.next().ok_or(ParseError::InvalidRequest)?;
    let path = parts.next().ok_or(ParseError::InvalidRequest)?;
    let version = parts.next().unwrap_or("HTTP/1.1");

    // Headers, last duplicate wins
    let mut headers = HashMap::new();
    let mut body = Vec::new();

    while let Some(line) = lines.next() {
        if line.is_empty() {
            if let Some(body_line) = lines.next() {
                body = body_line.to_vec();
            }
            break;
        }

        let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidHeader)?;
        let (key, value) = line.split_once(": ").ok_or(ParseError::InvalidHeader)?;

        headers.insert(key.to_ascii_lowercase(), value.to_string());
    }

    Ok(Request {
        method: Method::from_token(method),
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body,
    })
}

fn split_lines(buf: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut rest = Some(buf);
    std::iter::from_fn(move || {
        let current = rest?;
        match current.windows(CRLF.len()).position(|w| w == CRLF) {
            Some(pos) => {
                rest = Some(&current[pos + CRLF.len()..]);
                Some(&current[..pos])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}
