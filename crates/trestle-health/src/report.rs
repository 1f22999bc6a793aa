//! The status report tree.
//!
//! Three node types mirror the three component levels. Child lists are
//! `Option<Vec<_>>` so a node can distinguish children that were never
//! looked at (`None`, the field is omitted from JSON) from children that
//! were looked at and turned out empty (`Some(vec![])`, serialized as
//! `[]`).

use serde::Serialize;

use crate::state::ComponentState;

/// Report node for one workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowReport {
    pub id: String,
    pub state: ComponentState,
}

impl WorkflowReport {
    pub fn new(id: impl Into<String>, state: ComponentState) -> Self {
        Self {
            id: id.into(),
            state,
        }
    }
}

/// Report node for one channel and the workflows under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelReport {
    pub id: String,
    pub state: ComponentState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflows: Option<Vec<WorkflowReport>>,
}

impl ChannelReport {
    pub fn new(id: impl Into<String>, state: ComponentState) -> Self {
        Self {
            id: id.into(),
            state,
            workflows: None,
        }
    }

    /// The workflow list, created empty on first access.
    pub fn workflows_mut(&mut self) -> &mut Vec<WorkflowReport> {
        self.workflows.get_or_insert_default()
    }
}

/// Report node for one adapter and the channels under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterReport {
    pub id: String,
    pub state: ComponentState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<ChannelReport>>,
}

impl AdapterReport {
    pub fn new(id: impl Into<String>, state: ComponentState) -> Self {
        Self {
            id: id.into(),
            state,
            channels: None,
        }
    }

    /// The channel list, created empty on first access.
    pub fn channels_mut(&mut self) -> &mut Vec<ChannelReport> {
        self.channels.get_or_insert_default()
    }
}

/// Top-level wrapper keyed `adapters`, the document shape probes return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterList {
    pub adapters: Vec<AdapterReport>,
}

impl AdapterList {
    pub fn wrap(adapters: Vec<AdapterReport>) -> Self {
        Self { adapters }
    }

    /// Render the report as a JSON document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
