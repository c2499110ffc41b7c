use crate::http::encoding::Encoding;

pub const TEXT_PLAIN: &str = "text/plain";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// HTTP status codes the server emits.
///
/// - `Ok` (200): Request successful
/// - `Created` (201): File written
/// - `NotFound` (404): Unknown route or any file error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use kestrel::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the reason phrase written on the status line.
    ///
    /// # Example
    ///
    /// ```
    /// # use kestrel::http::response::StatusCode;
    /// assert_eq!(StatusCode::Created.reason_phrase(), "Created");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// A complete HTTP response ready to be serialized.
///
/// The only headers a response can carry are `Content-Encoding`,
/// `Content-Type` and the derived `Content-Length`, always written in that
/// order by the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Value for `Content-Encoding`, if any
    pub encoding: Option<Encoding>,
    /// Value for `Content-Type`, if any
    pub content_type: Option<String>,
    /// Body bytes exactly as transmitted
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use kestrel::http::response::{ResponseBuilder, StatusCode, TEXT_PLAIN};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .content_type(TEXT_PLAIN)
///     .body(b"abc".to_vec())
///     .build();
/// assert_eq!(response.content_type.as_deref(), Some("text/plain"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    encoding: Option<Encoding>,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            encoding: None,
            content_type: None,
            body: Vec::new(),
        }
    }

    /// Sets or clears the `Content-Encoding` header.
    ///
    /// This only labels the body; compressing it is up to the caller.
    pub fn encoding(mut self, encoding: Option<Encoding>) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the `Content-Type` header. An empty value means no header.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        let content_type = content_type.into();
        self.content_type = (!content_type.is_empty()).then_some(content_type);
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            encoding: self.encoding,
            content_type: self.content_type,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates an empty 200 OK response.
    pub fn ok() -> Self {
        ResponseBuilder::new(StatusCode::Ok).build()
    }

    /// Creates an empty 201 Created response.
    pub fn created() -> Self {
        ResponseBuilder::new(StatusCode::Created).build()
    }

    /// Creates an empty 404 Not Found response.
    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NotFound).build()
    }

    /// Returns the same response labelled with `encoding`.
    pub fn with_encoding(mut self, encoding: Option<Encoding>) -> Self {
        self.encoding = encoding;
        self
    }

    /// Value of the `Content-Length` header, present only for a non-empty body.
    pub fn content_length(&self) -> Option<usize> {
        (!self.body.is_empty()).then_some(self.body.len())
    }
}
