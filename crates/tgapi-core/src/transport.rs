use std::fmt;

use async_trait::async_trait;

use crate::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request relative to the transport's base address.
///
/// Every request is sent with `Accept: application/json`; a body, when present,
/// is UTF-8 JSON text sent as `application/json`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Relative path including any `?query`.
    pub path_and_query: String,
    pub body: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Port for the HTTP stack.
///
/// Implementations classify their own failures: a 401 must come back as
/// `RequestError::invalid_token`, a deadline as `RequestError::timed_out`. Any
/// other status is returned as a normal [`HttpResponse`].
///
/// Dropping the returned future must abort the request; that is how caller
/// cancellation reaches the network.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}
