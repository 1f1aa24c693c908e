//! The resource-side contract.
//!
//! A resource is the external object a managed object may delegate
//! attribute and operation execution to. The adapter holds a non-owning
//! reference and never acts on the resource when it is dropped.
//!
//! Resources opt into extra behavior through capability probes, never
//! through configuration: a resource that returns `Some` from
//! [`ManagedResource::as_dynamic`] takes over the adapter's whole call
//! surface, and one that returns `Some` from
//! [`ManagedResource::as_registration`] receives the four registration
//! phases. Absence is the normal case and costs a single branch.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::foundation::error::{DispatchResult, LifecycleResult};
use crate::foundation::value::ObjectName;

// =============================================================================
// Dynamic Dispatch Capability
// =============================================================================

/// Uniform get/set/invoke surface of a managed object.
///
/// Implemented by the adapter itself and, optionally, natively by
/// resources: a resource that is already a dynamic dispatch target in its
/// own right answers management calls directly, bypassing metadata
/// resolution entirely.
pub trait DynamicObject: Send + Sync {
    /// Reads one attribute.
    fn get_attribute(&self, name: &str) -> DispatchResult<Value>;

    /// Writes one attribute.
    fn set_attribute(&self, name: &str, value: Value) -> DispatchResult<()>;

    /// Invokes a named operation.
    fn invoke(&self, name: &str, params: &[Value], signature: &[String]) -> DispatchResult<Value>;
}

// =============================================================================
// Registration Capability
// =============================================================================

/// Handle to the registry performing a registration.
///
/// Opaque to the adapter; passed through to resource hooks untouched.
pub type RegistryHandle = Arc<dyn Any + Send + Sync>;

/// Registration capability a resource may opt into.
///
/// The adapter forwards its four registration phases here when the
/// capability is present. Only `pre_register` must be implemented; the
/// remaining phases default to no-ops.
pub trait RegistrationHooks: Send + Sync {
    /// Runs before registration. The returned name — which may differ from
    /// the proposed one — becomes the object's identity.
    fn pre_register(
        &self,
        registry: &RegistryHandle,
        proposed: Option<&ObjectName>,
    ) -> LifecycleResult<Option<ObjectName>>;

    /// Runs after registration completed or failed.
    fn post_register(&self, _registration_done: bool) {}

    /// Runs before deregistration; a failure aborts it.
    fn pre_deregister(&self) -> LifecycleResult<()> {
        Ok(())
    }

    /// Runs after deregistration. Best-effort; must not fail.
    fn post_deregister(&self) {}
}

// =============================================================================
// Managed Resource
// =============================================================================

/// An object that can be placed behind a managed-object adapter.
///
/// Only [`as_any`](Self::as_any) is required; it is what resolved handles
/// downcast to reach the concrete type. The capability probes default to
/// `None`. `Display` feeds the adapter's own rendering.
pub trait ManagedResource: fmt::Display + Send + Sync + 'static {
    /// The resource as `Any`, for handle downcasting.
    fn as_any(&self) -> &dyn Any;

    /// The resource's own dynamic dispatch surface, when it has one.
    fn as_dynamic(&self) -> Option<&dyn DynamicObject> {
        None
    }

    /// The resource's registration hooks, when it has them.
    fn as_registration(&self) -> Option<&dyn RegistrationHooks> {
        None
    }
}

/// A shared resource trait object.
pub type BoxedResource = Arc<dyn ManagedResource>;
