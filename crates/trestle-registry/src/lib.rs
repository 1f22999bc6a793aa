//! trestle-registry — the component registry Trestle probes walk.
//!
//! A registry is a read-only table of running components: adapters at the
//! root, channels below them, workflows at the leaves. Every component is
//! addressed by an opaque [`ComponentHandle`] and exposes a handful of
//! named attributes (`UniqueId`, `ComponentState`, `Children`).
//!
//! # Architecture
//!
//! The [`ComponentRegistry`] trait is the seam between probe logic and
//! whatever actually hosts the components. [`MemoryRegistry`] is the
//! in-process backend, usually populated once at startup from a
//! [`Topology`] file and mutated afterwards by whatever drives component
//! lifecycles.

pub mod error;
pub mod memory;
pub mod registry;
pub mod topology;
pub mod types;

pub use error::{RegistryError, RegistryResult};
pub use memory::MemoryRegistry;
pub use registry::ComponentRegistry;
pub use topology::Topology;
pub use types::*;
