//! Endpoint mounting and dispatch.

use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use tracing::{debug, error, info_span};

use crate::endpoint::{EndpointRequest, RestEndpoint};
use crate::sink::CaptureSink;

/// Build the HTTP router serving the given endpoints.
///
/// Each endpoint is mounted at its `mount_path` and at every path below
/// it. Dispatch enforces the endpoint's accepted method, runs `handle`
/// inside a span named after the endpoint, and converts the captured
/// response onto the wire.
pub fn build_router(endpoints: Vec<Arc<dyn RestEndpoint>>) -> Router {
    let mut router = Router::new();
    for endpoint in endpoints {
        let mount = {
            let trimmed = endpoint.mount_path().trim_end_matches('/');
            if trimmed.is_empty() {
                "/".to_string()
            } else {
                trimmed.to_string()
            }
        };
        let subtree = if mount == "/" {
            "/{*rest}".to_string()
        } else {
            format!("{mount}/{{*rest}}")
        };
        let handler = move |request: Request| {
            let endpoint = endpoint.clone();
            async move { dispatch(endpoint, request) }
        };
        router = router
            .route(&mount, any(handler.clone()))
            .route(&subtree, any(handler));
    }
    router
}

fn dispatch(endpoint: Arc<dyn RestEndpoint>, request: Request) -> Response {
    if request.method() != endpoint.accepted_method() {
        debug!(
            endpoint = %endpoint.name(),
            method = %request.method(),
            "rejecting method"
        );
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let endpoint_request = EndpointRequest {
        method: request.method().clone(),
        path: request.uri().path().to_string(),
    };

    let sink = CaptureSink::new();
    {
        let span = info_span!("endpoint", name = %endpoint.name(), path = %endpoint_request.path);
        let _guard = span.enter();
        endpoint.handle(&endpoint_request, &sink);
    }

    match sink.take() {
        Some(response) => response.into_response(),
        None => {
            error!(endpoint = %endpoint.name(), "endpoint finished without responding");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
