//! Metadata resolution interface.
//!
//! The metadata repository is an external collaborator: it maps attribute
//! and operation names to callable handles and decides which object each
//! handle is declared on. The engine consumes this interface; it never
//! builds metadata itself.
//!
//! # Declaring-object tags
//!
//! Every resolved handle carries a [`Target`] tag. The resolver decides the
//! tag when it builds the handle; the dispatcher only switches on it to
//! pick the invocation target. A subtype of the adapter can declare its own
//! accessors (tagged [`Target::Adapter`]) while generic attributes fall
//! through to the resource (tagged [`Target::Resource`]).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::error::Fault;
use crate::foundation::notification::NotificationKind;

// =============================================================================
// Resolved Handles
// =============================================================================

/// Declaring-object tag attached to every resolved handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The handle is declared by the managed object itself.
    Adapter,
    /// The handle is declared by the attached resource.
    Resource,
}

/// A type-erased callable resolved from metadata.
///
/// The first argument is the invocation target chosen by the dispatcher —
/// the managed object or its resource — presented as `&dyn Any` for the
/// handle to downcast. Getters receive no parameters, setters exactly one,
/// operations whatever the caller supplied.
pub type HandleFn = Arc<dyn Fn(&dyn Any, &[Value]) -> Result<Value, Fault> + Send + Sync>;

/// A callable handle plus its declaring-object tag.
#[derive(Clone)]
pub struct ResolvedHandle {
    /// Which object the dispatcher must invoke against.
    pub target: Target,
    /// The callable itself.
    pub call: HandleFn,
}

impl ResolvedHandle {
    /// Wraps a callable declared on the managed object.
    pub fn on_adapter(
        call: impl Fn(&dyn Any, &[Value]) -> Result<Value, Fault> + Send + Sync + 'static,
    ) -> Self {
        Self {
            target: Target::Adapter,
            call: Arc::new(call),
        }
    }

    /// Wraps a callable declared on the resource.
    pub fn on_resource(
        call: impl Fn(&dyn Any, &[Value]) -> Result<Value, Fault> + Send + Sync + 'static,
    ) -> Self {
        Self {
            target: Target::Resource,
            call: Arc::new(call),
        }
    }
}

impl fmt::Debug for ResolvedHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedHandle")
            .field("target", &self.target)
            .finish()
    }
}

// =============================================================================
// Resolver Contract
// =============================================================================

/// Maps names and signatures to callable handles.
///
/// Consumed by the dispatcher; implemented by the surrounding metadata
/// repository.
pub trait MetadataResolver: Send + Sync {
    /// Resolves the getter handle for an attribute.
    fn resolve_getter(&self, name: &str) -> Option<ResolvedHandle>;

    /// Resolves the setter handle for an attribute.
    fn resolve_setter(&self, name: &str) -> Option<ResolvedHandle>;

    /// Resolves the handle for an operation with the given signature.
    fn resolve_operation(&self, name: &str, signature: &[String]) -> Option<ResolvedHandle>;

    /// Structured description of the object, passed through unmodified.
    fn describe(&self) -> ObjectInfo;
}

/// A shared metadata resolver trait object.
pub type BoxedResolver = Arc<dyn MetadataResolver>;

// =============================================================================
// Object Description
// =============================================================================

/// Structured description of a managed object's management surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Type tag of the described object.
    pub type_tag: String,
    /// Human-readable description.
    pub description: String,
    /// Declared attributes.
    pub attributes: Vec<AttributeInfo>,
    /// Declared operations.
    pub operations: Vec<OperationInfo>,
    /// Notification kinds declared by higher-level metadata.
    pub notifications: Vec<NotificationKind>,
}

/// Declared attribute metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeInfo {
    /// Attribute name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Declared value type name.
    pub value_type: String,
    /// Whether a getter exists.
    pub readable: bool,
    /// Whether a setter exists.
    pub writable: bool,
}

/// Declared operation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationInfo {
    /// Operation name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Parameter signature as type-name strings.
    pub signature: Vec<String>,
    /// Declared return type name.
    pub return_type: String,
}
