//! The REST endpoint contract.

use axum::http::Method;

use crate::sink::ResponseSink;

/// The slice of an HTTP request an endpoint sees.
#[derive(Debug, Clone)]
pub struct EndpointRequest {
    pub method: Method,
    /// Full request path, including the endpoint's mount prefix.
    pub path: String,
}

/// One mounted REST component.
///
/// An endpoint receives every request at or below its mount path and
/// emits exactly one response through the [`ResponseSink`]. The router
/// enforces [`accepted_method`](RestEndpoint::accepted_method) first, so
/// `handle` only ever sees requests with the method it asked for.
pub trait RestEndpoint: Send + Sync {
    /// Short name used in logs and spans.
    fn name(&self) -> &str;

    /// Path prefix this endpoint serves, e.g. `/component-health`.
    fn mount_path(&self) -> &str;

    /// The only HTTP method this endpoint accepts. Requests with any
    /// other method are rejected with `405 Method Not Allowed`.
    fn accepted_method(&self) -> Method {
        Method::GET
    }

    /// Handle one request.
    fn handle(&self, request: &EndpointRequest, sink: &dyn ResponseSink);
}
