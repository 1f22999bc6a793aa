//! Topology file parsing.
//!
//! A topology file declares the component tree a daemon hosts:
//!
//! ```toml
//! [[adapter]]
//! id = "prod"
//! state = "Started"
//!
//! [[adapter.channel]]
//! id = "ingest"
//!
//! [[adapter.channel.workflow]]
//! id = "orders-in"
//! ```
//!
//! `state` defaults to `Started` at every level and is recorded verbatim.
//! What a label means is decided by whoever reads the registry, not here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::memory::MemoryRegistry;
use crate::types::ComponentHandle;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    #[serde(default, rename = "adapter")]
    pub adapters: Vec<AdapterSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterSpec {
    pub id: String,
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default, rename = "channel")]
    pub channels: Vec<ChannelSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSpec {
    pub id: String,
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default, rename = "workflow")]
    pub workflows: Vec<WorkflowSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSpec {
    pub id: String,
    #[serde(default = "default_state")]
    pub state: String,
}

fn default_state() -> String {
    "Started".to_string()
}

impl Topology {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let topology: Topology = toml::from_str(&content)?;
        Ok(topology)
    }

    /// Materialize the declared tree into a fresh in-memory registry.
    ///
    /// Adapters and channels always carry a `Children` attribute, even
    /// when the child list is empty. Workflows are leaves and carry none.
    /// Components are registered in file order, adapters first within each
    /// subtree.
    pub fn build_registry(&self) -> MemoryRegistry {
        let registry = MemoryRegistry::new();
        for adapter in &self.adapters {
            let channel_handles: Vec<ComponentHandle> = adapter
                .channels
                .iter()
                .map(|c| ComponentHandle::channel(&adapter.id, &c.id))
                .collect();
            registry.register_component(
                ComponentHandle::adapter(&adapter.id),
                &adapter.id,
                &adapter.state,
                Some(channel_handles),
            );
            for channel in &adapter.channels {
                let workflow_handles: Vec<ComponentHandle> = channel
                    .workflows
                    .iter()
                    .map(|w| ComponentHandle::workflow(&adapter.id, &channel.id, &w.id))
                    .collect();
                registry.register_component(
                    ComponentHandle::channel(&adapter.id, &channel.id),
                    &channel.id,
                    &channel.state,
                    Some(workflow_handles),
                );
                for workflow in &channel.workflows {
                    registry.register_component(
                        ComponentHandle::workflow(&adapter.id, &channel.id, &workflow.id),
                        &workflow.id,
                        &workflow.state,
                        None,
                    );
                }
            }
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ComponentRegistry;
    use crate::types::{AttributeValue, ADAPTER_PATTERN, CHILDREN, COMPONENT_STATE};

    const SAMPLE: &str = r#"
[[adapter]]
id = "prod"

[[adapter.channel]]
id = "ingest"
state = "Initialized"

[[adapter.channel.workflow]]
id = "orders-in"

[[adapter.channel.workflow]]
id = "orders-out"
state = "Stopped"

[[adapter]]
id = "backup"
state = "Closed"
"#;

    #[test]
    fn parses_with_state_defaults() {
        let topology: Topology = toml::from_str(SAMPLE).unwrap();
        assert_eq!(topology.adapters.len(), 2);

        let prod = &topology.adapters[0];
        assert_eq!(prod.id, "prod");
        assert_eq!(prod.state, "Started");
        assert_eq!(prod.channels[0].state, "Initialized");
        assert_eq!(prod.channels[0].workflows[0].state, "Started");
        assert_eq!(prod.channels[0].workflows[1].state, "Stopped");

        assert_eq!(topology.adapters[1].state, "Closed");
        assert!(topology.adapters[1].channels.is_empty());
    }

    #[test]
    fn empty_document_is_an_empty_topology() {
        let topology: Topology = toml::from_str("").unwrap();
        assert!(topology.adapters.is_empty());
    }

    #[test]
    fn build_registry_wires_child_handles() {
        let topology: Topology = toml::from_str(SAMPLE).unwrap();
        let registry = topology.build_registry();

        let adapters = registry.find_by_pattern(ADAPTER_PATTERN).unwrap();
        assert_eq!(
            adapters,
            vec![
                ComponentHandle::adapter("prod"),
                ComponentHandle::adapter("backup"),
            ]
        );

        let children = registry
            .read_attribute(&ComponentHandle::adapter("prod"), CHILDREN)
            .unwrap();
        assert_eq!(
            children,
            Some(AttributeValue::Handles(vec![ComponentHandle::channel(
                "prod", "ingest"
            )]))
        );

        let workflows = registry
            .read_attribute(&ComponentHandle::channel("prod", "ingest"), CHILDREN)
            .unwrap();
        assert_eq!(
            workflows,
            Some(AttributeValue::Handles(vec![
                ComponentHandle::workflow("prod", "ingest", "orders-in"),
                ComponentHandle::workflow("prod", "ingest", "orders-out"),
            ]))
        );
    }

    #[test]
    fn childless_adapter_still_exposes_children() {
        let topology: Topology = toml::from_str(SAMPLE).unwrap();
        let registry = topology.build_registry();

        let children = registry
            .read_attribute(&ComponentHandle::adapter("backup"), CHILDREN)
            .unwrap();
        assert_eq!(children, Some(AttributeValue::Handles(vec![])));
    }

    #[test]
    fn workflows_are_registered_as_leaves() {
        let topology: Topology = toml::from_str(SAMPLE).unwrap();
        let registry = topology.build_registry();
        let handle = ComponentHandle::workflow("prod", "ingest", "orders-in");

        assert_eq!(registry.read_attribute(&handle, CHILDREN).unwrap(), None);
        assert_eq!(
            registry.read_attribute(&handle, COMPONENT_STATE).unwrap(),
            Some(AttributeValue::text("Started"))
        );
    }
}
