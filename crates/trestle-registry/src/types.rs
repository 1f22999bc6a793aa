//! Component identity and attribute values.

use std::fmt;

/// Attribute holding a component's unique id.
pub const UNIQUE_ID: &str = "UniqueId";

/// Attribute holding a component's lifecycle state label.
pub const COMPONENT_STATE: &str = "ComponentState";

/// Attribute holding the handles of a component's direct children.
pub const CHILDREN: &str = "Children";

/// Pattern matching every registered adapter, the conventional root query
/// for a registry walk.
pub const ADAPTER_PATTERN: &str = "adapter:*";

/// Opaque identity of one registered component.
///
/// The wrapped name follows the `{kind}:{path}` convention used by
/// [`Topology`](crate::Topology), but callers should treat it as opaque:
/// handles exist to be passed back into
/// [`read_attribute`](crate::ComponentRegistry::read_attribute), not to be
/// parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentHandle(String);

impl ComponentHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Handle for an adapter, e.g. `adapter:prod`.
    pub fn adapter(id: &str) -> Self {
        Self(format!("adapter:{id}"))
    }

    /// Handle for a channel under an adapter, e.g. `channel:prod/ingest`.
    pub fn channel(adapter_id: &str, id: &str) -> Self {
        Self(format!("channel:{adapter_id}/{id}"))
    }

    /// Handle for a workflow under a channel, e.g.
    /// `workflow:prod/ingest/orders`.
    pub fn workflow(adapter_id: &str, channel_id: &str, id: &str) -> Self {
        Self(format!("workflow:{adapter_id}/{channel_id}/{id}"))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value of a single component attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Plain text, used for ids and state labels.
    Text(String),
    /// Handles of other registered components, used for child sets.
    Handles(Vec<ComponentHandle>),
}

impl AttributeValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_constructors_follow_naming_convention() {
        assert_eq!(ComponentHandle::adapter("prod").name(), "adapter:prod");
        assert_eq!(
            ComponentHandle::channel("prod", "ingest").name(),
            "channel:prod/ingest"
        );
        assert_eq!(
            ComponentHandle::workflow("prod", "ingest", "orders").name(),
            "workflow:prod/ingest/orders"
        );
    }

    #[test]
    fn adapter_handles_match_the_adapter_pattern() {
        let prefix = ADAPTER_PATTERN.strip_suffix('*').unwrap();
        assert!(ComponentHandle::adapter("prod").name().starts_with(prefix));
        assert!(!ComponentHandle::channel("prod", "c").name().starts_with(prefix));
    }
}
