//! Response delivery.

use std::sync::{Mutex, PoisonError};

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::warn;

/// Content type for JSON payloads.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type used when a response does not name its own.
pub const CONTENT_TYPE_DEFAULT: &str = "text/plain";

/// Where an endpoint writes its single response.
///
/// Delivery is fire and forget: a sink that cannot deliver logs the
/// problem and swallows it, so endpoint logic never unwinds because the
/// far side went away.
pub trait ResponseSink {
    /// Deliver a payload with an explicit content type and status.
    fn respond(&self, payload: &str, content_type: &str, status: StatusCode);

    /// Deliver an error payload as plain text.
    fn respond_error(&self, payload: &str, status: StatusCode);
}

/// A fully materialized response held by a [`CaptureSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: String,
}

impl IntoResponse for CapturedResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, self.content_type)],
            self.body,
        )
            .into_response()
    }
}

/// Sink buffering the first response an endpoint emits.
///
/// The router drains it after `handle` returns; tests inspect it
/// directly. Emitting a second response is an endpoint bug, so it is
/// logged and dropped while the first one stands.
#[derive(Debug, Default)]
pub struct CaptureSink {
    slot: Mutex<Option<CapturedResponse>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the captured response, if any.
    pub fn take(&self) -> Option<CapturedResponse> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn store(&self, response: CapturedResponse) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            warn!(status = %response.status, "response already captured, dropping a second one");
            return;
        }
        *slot = Some(response);
    }
}

impl ResponseSink for CaptureSink {
    fn respond(&self, payload: &str, content_type: &str, status: StatusCode) {
        self.store(CapturedResponse {
            status,
            content_type: content_type.to_string(),
            body: payload.to_string(),
        });
    }

    fn respond_error(&self, payload: &str, status: StatusCode) {
        self.respond(payload, CONTENT_TYPE_DEFAULT, status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_payload_content_type_and_status() {
        let sink = CaptureSink::new();
        sink.respond("{}", CONTENT_TYPE_JSON, StatusCode::OK);

        let captured = sink.take().unwrap();
        assert_eq!(captured.status, StatusCode::OK);
        assert_eq!(captured.content_type, CONTENT_TYPE_JSON);
        assert_eq!(captured.body, "{}");
    }

    #[test]
    fn respond_error_is_plain_text() {
        let sink = CaptureSink::new();
        sink.respond_error("boom", StatusCode::INTERNAL_SERVER_ERROR);

        let captured = sink.take().unwrap();
        assert_eq!(captured.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(captured.content_type, CONTENT_TYPE_DEFAULT);
        assert_eq!(captured.body, "boom");
    }

    #[test]
    fn first_response_wins() {
        let sink = CaptureSink::new();
        sink.respond("first", CONTENT_TYPE_JSON, StatusCode::OK);
        sink.respond_error("second", StatusCode::SERVICE_UNAVAILABLE);

        let captured = sink.take().unwrap();
        assert_eq!(captured.body, "first");
        assert_eq!(captured.status, StatusCode::OK);
    }

    #[test]
    fn take_drains_the_slot() {
        let sink = CaptureSink::new();
        sink.respond("", CONTENT_TYPE_JSON, StatusCode::OK);

        assert!(sink.take().is_some());
        assert!(sink.take().is_none());
    }

    #[test]
    fn captured_response_converts_onto_the_wire() {
        let response = CapturedResponse {
            status: StatusCode::SERVICE_UNAVAILABLE,
            content_type: CONTENT_TYPE_JSON.to_string(),
            body: "{\"failure\":\"x\"}".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            CONTENT_TYPE_JSON
        );
    }
}
