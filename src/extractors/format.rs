//! Pick the response body type from the `Accept` header.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::header::ACCEPT, http::request::Parts};

/// HTML for browsers; JSON when the client asks for `application/json` and not `text/html`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseFormat {
    Html,
    Json,
}

impl ResponseFormat {
    pub fn from_accept(accept: Option<&str>) -> Self {
        match accept {
            Some(a) if a.contains("application/json") && !a.contains("text/html") => ResponseFormat::Json,
            _ => ResponseFormat::Html,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts
            .headers
            .get(ACCEPT)
            .and_then(|v: &axum::http::HeaderValue| v.to_str().ok());
        Ok(ResponseFormat::from_accept(accept))
    }
}
