//! HTTP requests and responses as plain data.
//!
//! # Design
//! `EntityApi` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network; a `Transport` performs the round-trip in
//! between. Bodies are raw bytes because the service answers some calls with
//! payloads the client passes through untouched, and the expression endpoint
//! takes a bare string rather than JSON.

use std::fmt;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request payload and the content type it is sent with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    pub content_type: &'static str,
    pub data: Vec<u8>,
}

impl RequestBody {
    pub fn json(data: Vec<u8>) -> Self {
        Self {
            content_type: CONTENT_TYPE_JSON,
            data,
        }
    }

    pub fn text(text: &str) -> Self {
        Self {
            content_type: CONTENT_TYPE_TEXT,
            data: text.as_bytes().to_vec(),
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `EntityApi::build_*`. `url` is absolute: the client's base URL
/// with the resource path appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<RequestBody>,
}

/// An HTTP response described as plain data, as returned by a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }
}
