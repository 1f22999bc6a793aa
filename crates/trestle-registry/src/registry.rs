//! The registry contract.

use crate::error::RegistryResult;
use crate::types::{AttributeValue, ComponentHandle};

/// Read-only introspection surface over a running component tree.
///
/// Implementations expose whatever control plane actually hosts the
/// components. Callers locate components by pattern and read attributes
/// one at a time; nothing on this trait mutates the registry.
///
/// # Errors
///
/// Both methods fail only on infrastructure faults (a backend that cannot
/// be reached, a component that vanished mid-read). A pattern that matches
/// nothing returns an empty vec, and an attribute the component does not
/// expose returns `Ok(None)`.
pub trait ComponentRegistry: Send + Sync {
    /// All handles whose names match `pattern`, in registration order.
    ///
    /// A pattern is either a full handle name or a prefix followed by `*`,
    /// e.g. [`ADAPTER_PATTERN`](crate::ADAPTER_PATTERN).
    fn find_by_pattern(&self, pattern: &str) -> RegistryResult<Vec<ComponentHandle>>;

    /// Read one attribute of one component.
    ///
    /// Returns `Ok(None)` when the component exists but does not expose
    /// the attribute. An unknown handle is an error.
    fn read_attribute(
        &self,
        handle: &ComponentHandle,
        name: &str,
    ) -> RegistryResult<Option<AttributeValue>>;
}
