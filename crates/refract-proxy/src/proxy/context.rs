//! Exchange metadata handed to the pluggable callbacks.
//!
//! The trigger sees request and response metadata only; body bytes are never
//! part of either struct, so no body can be consumed before the trigger runs.

use hyper::http::response::Parts;
use hyper::{HeaderMap, Method, Request, StatusCode, Uri};

/// Request metadata captured before the inbound body is consumed.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl RequestMeta {
    pub fn from_request<B>(req: &Request<B>) -> Self {
        Self {
            method: req.method().clone(),
            uri: req.uri().clone(),
            headers: req.headers().clone(),
        }
    }
}

/// Upstream response metadata, available once headers arrive.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl ResponseMeta {
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            status: parts.status,
            headers: parts.headers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::Response;

    #[test]
    fn test_request_meta_captures_method_uri_headers() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("http://example.com/submit")
            .header("x-token", "abc")
            .body(())
            .unwrap();

        let meta = RequestMeta::from_request(&req);
        assert_eq!(meta.method, Method::POST);
        assert_eq!(meta.uri.path(), "/submit");
        assert_eq!(meta.headers.get("x-token").unwrap(), "abc");
    }

    #[test]
    fn test_response_meta_captures_status_and_headers() {
        let res = Response::builder()
            .status(StatusCode::NOT_FOUND)
            .header("content-type", "text/html")
            .body(())
            .unwrap();

        let (parts, _) = res.into_parts();
        let meta = ResponseMeta::from_parts(&parts);
        assert_eq!(meta.status, StatusCode::NOT_FOUND);
        assert_eq!(meta.headers.get("content-type").unwrap(), "text/html");
    }
}
