//! In-memory registry backend.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::registry::ComponentRegistry;
use crate::types::{AttributeValue, ComponentHandle, CHILDREN, COMPONENT_STATE, UNIQUE_ID};

/// One registered component and its attribute list.
#[derive(Debug)]
struct ComponentEntry {
    handle: ComponentHandle,
    attributes: Vec<(String, AttributeValue)>,
}

/// Registry backend holding the component table in process memory.
///
/// Registration order is preserved: [`find_by_pattern`] returns handles in
/// the order components were first registered, so walks over the table are
/// deterministic.
///
/// Every mutation is a single replacement under the write lock, so a
/// poisoned lock still guards a consistent table and is recovered rather
/// than propagated.
///
/// [`find_by_pattern`]: ComponentRegistry::find_by_pattern
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    entries: RwLock<Vec<ComponentEntry>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> RwLockReadGuard<'_, Vec<ComponentEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn table_mut(&self) -> RwLockWriteGuard<'_, Vec<ComponentEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a component with an explicit attribute list.
    ///
    /// Re-registering an existing handle replaces its attributes without
    /// changing its position in the table.
    pub fn register(&self, handle: ComponentHandle, attributes: Vec<(String, AttributeValue)>) {
        let mut entries = self.table_mut();
        match entries.iter_mut().find(|e| e.handle == handle) {
            Some(entry) => entry.attributes = attributes,
            None => {
                debug!(handle = %handle, "registering component");
                entries.push(ComponentEntry { handle, attributes });
            }
        }
    }

    /// Register a component carrying the conventional attribute set.
    ///
    /// `children: None` registers a leaf without a `Children` attribute;
    /// `Some(vec![])` registers a parent that currently has no children.
    pub fn register_component(
        &self,
        handle: ComponentHandle,
        unique_id: &str,
        state: &str,
        children: Option<Vec<ComponentHandle>>,
    ) {
        let mut attributes = vec![
            (UNIQUE_ID.to_string(), AttributeValue::text(unique_id)),
            (COMPONENT_STATE.to_string(), AttributeValue::text(state)),
        ];
        if let Some(children) = children {
            attributes.push((CHILDREN.to_string(), AttributeValue::Handles(children)));
        }
        self.register(handle, attributes);
    }

    /// Overwrite one attribute of an already registered component.
    ///
    /// Setting an attribute the component did not previously expose adds
    /// it; an unknown handle is an error.
    pub fn set_attribute(
        &self,
        handle: &ComponentHandle,
        name: &str,
        value: AttributeValue,
    ) -> RegistryResult<()> {
        let mut entries = self.table_mut();
        let entry = entries
            .iter_mut()
            .find(|e| e.handle == *handle)
            .ok_or_else(|| RegistryError::UnknownHandle(handle.name().to_string()))?;
        match entry.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => entry.attributes.push((name.to_string(), value)),
        }
        Ok(())
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }
}

impl ComponentRegistry for MemoryRegistry {
    fn find_by_pattern(&self, pattern: &str) -> RegistryResult<Vec<ComponentHandle>> {
        let entries = self.table();
        let matches = match pattern.strip_suffix('*') {
            Some(prefix) => entries
                .iter()
                .filter(|e| e.handle.name().starts_with(prefix))
                .map(|e| e.handle.clone())
                .collect(),
            None => entries
                .iter()
                .filter(|e| e.handle.name() == pattern)
                .map(|e| e.handle.clone())
                .collect(),
        };
        Ok(matches)
    }

    fn read_attribute(
        &self,
        handle: &ComponentHandle,
        name: &str,
    ) -> RegistryResult<Option<AttributeValue>> {
        let entries = self.table();
        let entry = entries
            .iter()
            .find(|e| e.handle == *handle)
            .ok_or_else(|| RegistryError::UnknownHandle(handle.name().to_string()))?;
        Ok(entry
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.clone()))
    }
}
