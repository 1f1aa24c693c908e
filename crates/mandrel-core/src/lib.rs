//! # Mandrel Core
//!
//! The core engine of the Mandrel managed-object adapter.
//!
//! This crate provides the dispatch-and-notify machinery: given metadata
//! describing a set of attributes and operations, a [`ManagedObject`]
//! exposes a uniform get/set/invoke surface over either itself or an
//! associated backing resource, and propagates attribute-change and
//! generic notifications to interested observers.
//!
//! ## Architecture Layers
//!
//! Mandrel Core is organized into three architectural layers:
//!
//! ### Foundation Layer
//!
//! Core abstractions and type system:
//! - **Values & Identity**: dynamic attribute values and object names
//!   ([`Attribute`], [`ObjectName`])
//! - **Notifications**: immutable event records and the observer contract
//!   ([`Notification`], [`NotificationListener`])
//! - **Errors**: the dispatch taxonomy and the invocation-fault mapper
//!   ([`DispatchError`], [`Fault`])
//!
//! ### Dispatch Layer
//!
//! Notification delivery and signature handling:
//! - **Broadcasters**: per-channel listener registration and fan-out
//!   ([`Broadcaster`])
//! - **Notification Hub**: the two lazily created channels
//!   ([`NotificationHub`])
//! - **Signatures**: type-name resolution for operation overloads
//!   ([`ParamType`])
//!
//! ### Integration Layer
//!
//! External collaborator interfaces:
//! - **Metadata Resolution**: names and signatures to callable handles
//!   ([`MetadataResolver`], [`ResolvedHandle`])
//! - **Resource Contract**: capability probes for dynamic dispatch and
//!   registration ([`ManagedResource`], [`DynamicObject`])
//! - **The Adapter**: the managed object itself and its registration
//!   lifecycle ([`ManagedObject`])
//!
//! ## Dispatch Flow
//!
//! All management calls flow through the [`ManagedObject`]:
//!
//! ```text
//! ┌──────────┐     ┌───────────────┐     ┌──────────────────┐
//! │ Registry │────▶│ ManagedObject │────▶│ MetadataResolver │
//! │ /Server  │     │  (dispatch)   │◀────│ (handle + tag)   │
//! └──────────┘     └───────┬───────┘     └──────────────────┘
//!                          │ invoke per tag
//!                ┌─────────┴─────────┐
//!                ▼                   ▼
//!          self (adapter)        resource
//! ```
//!
//! Attribute writes additionally fan an attribute-change notification out
//! through the object's [`NotificationHub`]; failures while notifying are
//! logged and never fail the write.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mandrel_core::{ManagedObject, MetadataResolver, ResolvedHandle};
//! use serde_json::json;
//!
//! let object = ManagedObject::new();
//! object.attach_metadata(Arc::new(WorkerMetadata));
//! object.attach_resource(Arc::new(Worker::default()));
//!
//! object.set_attribute("RateLimit", json!(50))?;
//! let limit = object.get_attribute("RateLimit")?;
//! let _ = object.invoke("reset", &[], &[])?;
//! ```

// Architectural layers
pub mod dispatch;
pub mod foundation;
pub mod integration;

// Re-export foundation types
pub use foundation::{
    ATTRIBUTE_CHANGE_TYPE, Attribute, AttributeChange, AttributeList, BoxedListener,
    DispatchError, DispatchResult, Fault, GENERIC_TYPE, LifecycleError, LifecycleResult, NO_ARGS,
    Notification, NotificationKind, NotificationListener, ObjectName, Recoverability, Source,
    map_fault, value_type_name,
};

// Re-export dispatch types
pub use dispatch::{
    Broadcaster, Channel, NotificationHub, ParamType, check_params, resolve_signature,
};

// Re-export integration types
pub use integration::{
    AttributeInfo, BoxedResolver, BoxedResource, DynamicObject, HandleFn, ManagedObject,
    ManagedResource, MetadataResolver, ObjectInfo, OperationInfo, RegistrationHooks,
    RegistryHandle, ResolvedHandle, Target,
};

/// Prelude for common imports.
pub mod prelude {
    pub use super::foundation::*;
    pub use super::integration::{
        DynamicObject, ManagedObject, ManagedResource, MetadataResolver, ObjectInfo,
        RegistrationHooks, RegistryHandle, ResolvedHandle, Target,
    };
}
