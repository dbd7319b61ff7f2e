// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Generates request ids and creates one span per HTTP request
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

use axum::body::Body;
use http::{HeaderValue, Request};
use tower_http::request_id::RequestId;
use tracing::Span;
use uuid::Uuid;

/// Header carrying the request id in both directions
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates `req_<uuid>` ids for requests that arrive without one
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestId;

impl tower_http::request_id::MakeRequestId for MakeRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&format!("req_{}", Uuid::new_v4().simple()))
            .ok()
            .map(RequestId::new)
    }
}

/// Create a tracing span for an HTTP request, tagged with its request id
pub fn create_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_http::request_id::MakeRequestId as _;

    #[test]
    fn test_generated_request_ids_are_prefixed_and_unique() {
        let request = Request::new(Body::empty());
        let mut make = MakeRequestId;

        let first = make.make_request_id(&request).unwrap();
        let second = make.make_request_id(&request).unwrap();

        let first = first.header_value().to_str().unwrap().to_owned();
        assert!(first.starts_with("req_"));
        assert_ne!(first, second.header_value().to_str().unwrap());
    }
}
