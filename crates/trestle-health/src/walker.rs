//! Registry traversal.
//!
//! [`build_tree`] walks adapters, channels, and workflows in registration
//! order, classifying each component's state and calling the caller's
//! handler for every component that is not started. The handler decides
//! whether the walk survives: [`fail_on_not_ready`] aborts on the first
//! hit, [`allow_not_ready`] records nothing and keeps going.

use thiserror::Error;
use trestle_registry::{
    AttributeValue, ComponentHandle, ComponentRegistry, RegistryError, CHILDREN, COMPONENT_STATE,
    UNIQUE_ID,
};

use crate::report::{AdapterReport, ChannelReport, WorkflowReport};
use crate::state::ComponentState;

/// A component that failed readiness.
///
/// The display form is the exact text readiness probes hand back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{id} is not started")]
pub struct NotReady {
    pub id: String,
    pub state: ComponentState,
}

impl NotReady {
    pub fn new(id: impl Into<String>, state: ComponentState) -> Self {
        Self {
            id: id.into(),
            state,
        }
    }
}

/// Failure modes of a registry walk.
///
/// `NotReady` is an expected operating condition surfaced through the
/// caller's handler. `Registry` is an infrastructure fault.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error(transparent)]
    NotReady(#[from] NotReady),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Callback invoked for every component that is not started. Returning
/// `Err` aborts the walk with that failure.
pub type NotReadyHandler<'a> = dyn FnMut(&str, ComponentState) -> Result<(), NotReady> + 'a;

/// Handler that tolerates components in any state.
pub fn allow_not_ready() -> impl FnMut(&str, ComponentState) -> Result<(), NotReady> {
    |_, _| Ok(())
}

/// Handler that aborts on the first component that is not started.
pub fn fail_on_not_ready() -> impl FnMut(&str, ComponentState) -> Result<(), NotReady> {
    |id, state| Err(NotReady::new(id, state))
}

/// Walk every adapter matching `root_query` and build the report tree.
///
/// Traversal order follows the registry: adapters in registration order,
/// each adapter's channels next, each channel's workflows below that. A
/// component is verified before its children are read, so an aborting
/// handler names the first failing component in traversal order.
pub fn build_tree(
    registry: &dyn ComponentRegistry,
    root_query: &str,
    on_not_ready: &mut NotReadyHandler<'_>,
) -> Result<Vec<AdapterReport>, WalkError> {
    let mut adapters = Vec::new();
    for handle in registry.find_by_pattern(root_query)? {
        adapters.push(build_adapter(registry, &handle, on_not_ready)?);
    }
    Ok(adapters)
}

fn build_adapter(
    registry: &dyn ComponentRegistry,
    handle: &ComponentHandle,
    on_not_ready: &mut NotReadyHandler<'_>,
) -> Result<AdapterReport, WalkError> {
    let (id, state) = identify(registry, handle)?;
    verify_ready(&id, state, on_not_ready)?;

    let mut report = AdapterReport::new(id, state);
    let children = child_handles(registry, handle)?;
    let channels = report.channels_mut();
    for child in &children {
        channels.push(build_channel(registry, child, on_not_ready)?);
    }
    Ok(report)
}

fn build_channel(
    registry: &dyn ComponentRegistry,
    handle: &ComponentHandle,
    on_not_ready: &mut NotReadyHandler<'_>,
) -> Result<ChannelReport, WalkError> {
    let (id, state) = identify(registry, handle)?;
    verify_ready(&id, state, on_not_ready)?;

    let mut report = ChannelReport::new(id, state);
    let children = child_handles(registry, handle)?;
    let workflows = report.workflows_mut();
    for child in &children {
        workflows.push(build_workflow(registry, child, on_not_ready)?);
    }
    Ok(report)
}

fn build_workflow(
    registry: &dyn ComponentRegistry,
    handle: &ComponentHandle,
    on_not_ready: &mut NotReadyHandler<'_>,
) -> Result<WorkflowReport, WalkError> {
    let (id, state) = identify(registry, handle)?;
    verify_ready(&id, state, on_not_ready)?;
    Ok(WorkflowReport::new(id, state))
}

/// Read one component's id and classified state.
fn identify(
    registry: &dyn ComponentRegistry,
    handle: &ComponentHandle,
) -> Result<(String, ComponentState), RegistryError> {
    let id = text_attribute(registry, handle, UNIQUE_ID)?;
    let label = text_attribute(registry, handle, COMPONENT_STATE)?;
    Ok((id, ComponentState::classify(&label)))
}

fn verify_ready(
    id: &str,
    state: ComponentState,
    on_not_ready: &mut NotReadyHandler<'_>,
) -> Result<(), NotReady> {
    if state.is_ready() {
        Ok(())
    } else {
        on_not_ready(id, state)
    }
}

/// Read a text attribute that must be present.
fn text_attribute(
    registry: &dyn ComponentRegistry,
    handle: &ComponentHandle,
    name: &str,
) -> Result<String, RegistryError> {
    match registry.read_attribute(handle, name)? {
        Some(AttributeValue::Text(value)) => Ok(value),
        Some(AttributeValue::Handles(_)) => {
            Err(read_error(handle, name, "expected text, found handles"))
        }
        None => Err(read_error(handle, name, "attribute missing")),
    }
}

/// Read a component's child handles. An absent or non-handle `Children`
/// attribute means zero children, not an error.
fn child_handles(
    registry: &dyn ComponentRegistry,
    handle: &ComponentHandle,
) -> Result<Vec<ComponentHandle>, RegistryError> {
    match registry.read_attribute(handle, CHILDREN)? {
        Some(AttributeValue::Handles(handles)) => Ok(handles),
        Some(AttributeValue::Text(_)) | None => Ok(Vec::new()),
    }
}

fn read_error(handle: &ComponentHandle, attribute: &str, reason: &str) -> RegistryError {
    RegistryError::Read {
        handle: handle.name().to_string(),
        attribute: attribute.to_string(),
        reason: reason.to_string(),
    }
}
