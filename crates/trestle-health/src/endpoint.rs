//! The health-check endpoint.
//!
//! Wires probe routing, the registry walk, and response delivery into one
//! [`RestEndpoint`]. Failure handling is deliberately two-tier: a
//! component that is not ready is an expected answer and comes back as
//! `503` with a JSON failure payload, while registry faults and
//! serialization bugs come back as `500` and get logged.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};
use trestle_gateway::{
    EndpointRequest, ResponseSink, RestEndpoint, StatusCode, CONTENT_TYPE_JSON,
};
use trestle_registry::{ComponentRegistry, ADAPTER_PATTERN};

use crate::probe::{self, ProbeKind};
use crate::report::AdapterList;
use crate::walker::{self, WalkError};

/// Default mount path for the health-check endpoint.
pub const DEFAULT_MOUNT_PATH: &str = "/component-health";

/// Everything that can go wrong while answering a probe.
#[derive(Debug, Error)]
enum ProbeError {
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error("status report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// REST endpoint answering liveness, readiness, and report probes.
pub struct HealthCheckEndpoint {
    registry: Arc<dyn ComponentRegistry>,
    mount_path: String,
}

impl HealthCheckEndpoint {
    pub fn new(registry: Arc<dyn ComponentRegistry>) -> Self {
        Self {
            registry,
            mount_path: DEFAULT_MOUNT_PATH.to_string(),
        }
    }

    /// Override the mount path, e.g. from daemon configuration.
    pub fn with_mount_path(mut self, path: impl Into<String>) -> Self {
        self.mount_path = path.into();
        self
    }

    /// Liveness proves the endpoint is serving requests, nothing more.
    /// The registry is deliberately never consulted.
    fn liveness(&self, sink: &dyn ResponseSink) -> Result<(), ProbeError> {
        sink.respond("", CONTENT_TYPE_JSON, StatusCode::OK);
        Ok(())
    }

    fn readiness(&self, sink: &dyn ResponseSink) -> Result<(), ProbeError> {
        walker::build_tree(
            self.registry.as_ref(),
            ADAPTER_PATTERN,
            &mut walker::fail_on_not_ready(),
        )?;
        sink.respond("", CONTENT_TYPE_JSON, StatusCode::OK);
        Ok(())
    }

    fn full_report(&self, sink: &dyn ResponseSink) -> Result<(), ProbeError> {
        let adapters = walker::build_tree(
            self.registry.as_ref(),
            ADAPTER_PATTERN,
            &mut walker::allow_not_ready(),
        )?;
        let payload = AdapterList::wrap(adapters).to_json()?;
        sink.respond(&payload, CONTENT_TYPE_JSON, StatusCode::OK);
        Ok(())
    }
}

impl RestEndpoint for HealthCheckEndpoint {
    fn name(&self) -> &str {
        "health-check"
    }

    fn mount_path(&self) -> &str {
        &self.mount_path
    }

    fn handle(&self, request: &EndpointRequest, sink: &dyn ResponseSink) {
        let outcome = match probe::route(&request.path) {
            ProbeKind::Liveness => self.liveness(sink),
            ProbeKind::Readiness => self.readiness(sink),
            ProbeKind::FullReport => self.full_report(sink),
        };
        match outcome {
            Ok(()) => {}
            Err(ProbeError::Walk(WalkError::NotReady(failure))) => {
                // Expected while components are still coming up.
                debug!(id = %failure.id, state = %failure.state, "readiness refused");
                let payload = json!({ "failure": failure.to_string() });
                sink.respond(
                    &payload.to_string(),
                    CONTENT_TYPE_JSON,
                    StatusCode::SERVICE_UNAVAILABLE,
                );
            }
            Err(ProbeError::Walk(WalkError::Registry(fault))) => {
                warn!(error = %fault, "health probe could not read the registry");
                sink.respond_error(&fault.to_string(), StatusCode::INTERNAL_SERVER_ERROR);
            }
            Err(ProbeError::Serialize(fault)) => {
                error!(error = %fault, "status report serialization failed");
                sink.respond_error(&fault.to_string(), StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }
}
