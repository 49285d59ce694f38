// crates/chronopin-resources/src/registry.rs
// ============================================================================
// Module: Resource Registry
// Description: Registry for built-in and external lifecycle resources.
// Purpose: Route lifecycle operations by resource type identifier.
// Dependencies: chronopin-core
// ============================================================================

//! ## Overview
//! The resource registry resolves lifecycle operations by resource type
//! identifier and validates caller configuration against the resource schema
//! before creation. Registered resources are stateless handlers; every call
//! operates only on the record state passed through it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use chronopin_core::LifecycleError;
use chronopin_core::RecordId;
use chronopin_core::RecordState;
use chronopin_core::ResourceConfig;
use chronopin_core::ResourceLifecycle;
use chronopin_core::ResourceSchema;
use chronopin_core::ResourceTypeId;
use chronopin_core::runtime::ChangePlan;
use chronopin_core::runtime::plan_change;

use crate::static_time::StaticTimeResource;

// ============================================================================
// SECTION: Resource Registry
// ============================================================================

/// Lifecycle resource registry.
///
/// # Invariants
/// - Resource type identifiers are unique within the registry.
/// - Configuration is validated against the resource schema before create.
/// - Registered resources are `Send + Sync` and stored behind trait objects.
pub struct ResourceRegistry {
    /// Resource implementations keyed by resource type identifier.
    resources: BTreeMap<ResourceTypeId, Box<dyn ResourceLifecycle + Send + Sync>>,
}

impl ResourceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            resources: BTreeMap::new(),
        }
    }

    /// Creates a registry with built-in resources registered.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when resource registration fails.
    pub fn with_builtin_resources() -> Result<Self, LifecycleError> {
        let mut registry = Self::new();
        registry.register_resource(StaticTimeResource::TYPE_ID, StaticTimeResource::new())?;
        Ok(registry)
    }

    /// Registers a new resource under the given type identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the type identifier is already registered.
    pub fn register_resource(
        &mut self,
        type_id: impl Into<ResourceTypeId>,
        resource: impl ResourceLifecycle + Send + Sync + 'static,
    ) -> Result<(), LifecycleError> {
        let type_id = type_id.into();
        if self.resources.contains_key(&type_id) {
            return Err(LifecycleError::Resource(format!(
                "resource already registered: {type_id}"
            )));
        }
        self.resources.insert(type_id, Box::new(resource));
        Ok(())
    }

    /// Returns the schema for a resource type.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the type is not registered.
    pub fn schema(&self, type_id: &ResourceTypeId) -> Result<ResourceSchema, LifecycleError> {
        Ok(self.handler(type_id)?.schema())
    }

    /// Creates empty record state bound to a resource type's schema.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the type is not registered.
    pub fn new_state(&self, type_id: &ResourceTypeId) -> Result<RecordState, LifecycleError> {
        Ok(RecordState::new(self.handler(type_id)?.schema()))
    }

    /// Validates caller configuration against a resource type's schema.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the type is not registered or the
    /// configuration is rejected.
    pub fn validate(
        &self,
        type_id: &ResourceTypeId,
        config: &ResourceConfig,
    ) -> Result<(), LifecycleError> {
        self.handler(type_id)?.schema().validate_config(config)?;
        Ok(())
    }

    /// Plans the transition from recorded state to the desired configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the type is not registered.
    pub fn plan(
        &self,
        type_id: &ResourceTypeId,
        state: &RecordState,
        desired: &ResourceConfig,
    ) -> Result<ChangePlan, LifecycleError> {
        Ok(plan_change(&self.handler(type_id)?.schema(), state, desired))
    }

    /// Creates a record, validating the configuration first.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the type is not registered, the
    /// configuration is rejected, or creation fails.
    pub fn create(
        &self,
        type_id: &ResourceTypeId,
        config: &ResourceConfig,
        state: &mut RecordState,
    ) -> Result<(), LifecycleError> {
        let handler = self.handler(type_id)?;
        handler.schema().validate_config(config)?;
        handler.create(config, state)
    }

    /// Re-derives a record's fields from its identity.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the type is not registered or the read
    /// fails.
    pub fn read(
        &self,
        type_id: &ResourceTypeId,
        state: &mut RecordState,
    ) -> Result<(), LifecycleError> {
        self.handler(type_id)?.read(state)
    }

    /// Removes a record from tracking.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the type is not registered or deletion
    /// fails.
    pub fn delete(
        &self,
        type_id: &ResourceTypeId,
        state: &mut RecordState,
    ) -> Result<(), LifecycleError> {
        self.handler(type_id)?.delete(state)
    }

    /// Adopts a pre-existing identity and populates derived fields.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the type is not registered or the
    /// import fails.
    pub fn import(
        &self,
        type_id: &ResourceTypeId,
        identity: RecordId,
        state: &mut RecordState,
    ) -> Result<(), LifecycleError> {
        self.handler(type_id)?.import(identity, state)
    }

    /// Resolves a registered resource handler.
    fn handler(
        &self,
        type_id: &ResourceTypeId,
    ) -> Result<&(dyn ResourceLifecycle + Send + Sync), LifecycleError> {
        let Some(resource) = self.resources.get(type_id) else {
            return Err(LifecycleError::Resource(format!("resource not registered: {type_id}")));
        };
        Ok(resource.as_ref())
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
