//! trestle-health — component health probes for Trestle.
//!
//! Answers the three questions a supervisor asks about a running
//! component tree:
//!
//! - liveness: is the process serving requests at all
//! - readiness: is every adapter, channel, and workflow started
//! - full report: the whole tree with per-component states
//!
//! # Architecture
//!
//! [`walker::build_tree`] walks the component registry and classifies
//! each component's state. What happens on a component that is not
//! started is the caller's choice, passed in as a handler: readiness
//! aborts on the first failure, the full report tolerates everything.
//! [`HealthCheckEndpoint`] picks the handler per probe, and probe
//! selection itself is an ordered pattern match on the request path in
//! [`probe`].

pub mod endpoint;
pub mod probe;
pub mod report;
pub mod state;
pub mod walker;

pub use endpoint::{HealthCheckEndpoint, DEFAULT_MOUNT_PATH};
pub use probe::ProbeKind;
pub use report::{AdapterList, AdapterReport, ChannelReport, WorkflowReport};
pub use state::ComponentState;
pub use walker::{build_tree, NotReady, WalkError};
