//! Request ID generation and propagation, and sensitive header masking
//!
//! Request IDs are TypeIDs with a `req` prefix over a UUIDv7, so they sort by
//! creation time: `req_01h455vb4pex5vsknk084sn02q`.

use http::{HeaderName, HeaderValue, Request};
use mti::prelude::*;
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};

/// Prefix of generated request IDs
pub const REQUEST_ID_PREFIX: &str = "req";

/// Headers masked in trace output
pub const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie"];

/// Generates a fresh `req_…` identifier for requests that arrive without one
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeTypedRequestId;

impl MakeTypedRequestId {
    pub fn generate() -> String {
        REQUEST_ID_PREFIX.create_type_id::<V7>().to_string()
    }
}

impl MakeRequestId for MakeTypedRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let header_value = HeaderValue::from_str(&Self::generate()).ok()?;
        Some(RequestId::new(header_value))
    }
}

/// Set `x-request-id` on incoming requests that lack it
pub fn request_id_layer() -> SetRequestIdLayer<MakeTypedRequestId> {
    SetRequestIdLayer::x_request_id(MakeTypedRequestId)
}

/// Copy `x-request-id` from the request onto the response
pub fn request_id_propagation_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    SetSensitiveRequestHeadersLayer::new(
        SENSITIVE_HEADERS.iter().copied().map(HeaderName::from_static),
    )
}
