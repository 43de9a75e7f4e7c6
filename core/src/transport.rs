//! The HTTP round-trip behind `EntityClient`.
//!
//! # Design
//! `Transport` is the only place I/O happens. It has one method per verb and
//! reports the status code as data: a 404 is a successful round-trip that
//! the client, not the transport, turns into an error. Tests substitute a
//! recording fake; production code uses `UreqTransport`.

use std::fmt;

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};

/// Performs HTTP requests against absolute URLs.
pub trait Transport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;

    fn post(&self, url: &str, body: &RequestBody) -> Result<HttpResponse, TransportError>;

    fn put(&self, url: &str, body: &RequestBody) -> Result<HttpResponse, TransportError>;

    fn delete(&self, url: &str) -> Result<HttpResponse, TransportError>;

    /// Dispatch a built request to the matching verb.
    ///
    /// `EntityApi` always attaches a body to POST and PUT. A hand-built
    /// request without one is still sent, with an empty JSON payload, so
    /// the service rather than the client decides whether it is valid.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let empty = RequestBody::json(Vec::new());
        match request.method {
            HttpMethod::Get => self.get(&request.url),
            HttpMethod::Delete => self.delete(&request.url),
            HttpMethod::Post => self.post(&request.url, request.body.as_ref().unwrap_or(&empty)),
            HttpMethod::Put => self.put(&request.url, request.body.as_ref().unwrap_or(&empty)),
        }
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).get(url)
    }

    fn post(&self, url: &str, body: &RequestBody) -> Result<HttpResponse, TransportError> {
        (**self).post(url, body)
    }

    fn put(&self, url: &str, body: &RequestBody) -> Result<HttpResponse, TransportError> {
        (**self).put(url, body)
    }

    fn delete(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).delete(url)
    }
}

/// Blocking transport built on a shared `ureq::Agent`.
///
/// Status codes are returned as data (`http_status_as_error(false)`), and
/// every request carries the configured `Accept` and bearer headers.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    accept: String,
    authorization: Option<String>,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("accept", &self.accept)
            .field("authorized", &self.authorization.is_some())
            .finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            accept: config.accept_header(),
            authorization: config
                .access_token
                .as_ref()
                .map(|token| format!("Bearer {token}")),
        }
    }

    fn decorate<B>(&self, request: ureq::RequestBuilder<B>) -> ureq::RequestBuilder<B> {
        let request = request.header("accept", self.accept.as_str());
        match &self.authorization {
            Some(value) => request.header("authorization", value.as_str()),
            None => request,
        }
    }
}

fn read_response(
    result: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
) -> Result<HttpResponse, TransportError> {
    let mut response = result?;
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_vec()?;
    Ok(HttpResponse { status, body })
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        read_response(self.decorate(self.agent.get(url)).call())
    }

    fn post(&self, url: &str, body: &RequestBody) -> Result<HttpResponse, TransportError> {
        read_response(
            self.decorate(self.agent.post(url))
                .content_type(body.content_type)
                .send(body.data.as_slice()),
        )
    }

    fn put(&self, url: &str, body: &RequestBody) -> Result<HttpResponse, TransportError> {
        read_response(
            self.decorate(self.agent.put(url))
                .content_type(body.content_type)
                .send(body.data.as_slice()),
        )
    }

    fn delete(&self, url: &str) -> Result<HttpResponse, TransportError> {
        read_response(self.decorate(self.agent.delete(url)).call())
    }
}
