//! trestle-gateway — the HTTP plane Trestle components mount on.
//!
//! A gateway is a set of [`RestEndpoint`]s, each owning a path prefix.
//! Endpoints never touch HTTP machinery directly: they read an
//! [`EndpointRequest`] and write exactly one response through a
//! [`ResponseSink`]. The router bridges both sides onto axum.
//!
//! # Architecture
//!
//! Dispatch is deliberately synchronous. Endpoints compute from in-process
//! state, so the router calls [`RestEndpoint::handle`] inline, captures
//! the response from the sink, and converts it onto the wire. Method
//! filtering (`405`) happens before an endpoint ever sees a request.

pub mod endpoint;
pub mod router;
pub mod sink;

pub use axum::http::{Method, StatusCode};
pub use endpoint::{EndpointRequest, RestEndpoint};
pub use router::build_router;
pub use sink::{
    CaptureSink, CapturedResponse, ResponseSink, CONTENT_TYPE_DEFAULT, CONTENT_TYPE_JSON,
};
