//! # Mandrel
//!
//! A metadata-driven managed-object adapter for Rust.
//!
//! ## Overview
//!
//! Mandrel exposes a uniform management surface — attribute reads and
//! writes, operation invocation, change notifications — over any object,
//! driven entirely by externally supplied metadata. The adapter decides
//! per call whether a resolved handle runs against the adapter itself or
//! against the backing resource, and it never caches: every read and every
//! invocation re-executes against the live target.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐     ┌───────────────┐     ┌──────────────────┐
//! │ Registry │────▶│ ManagedObject │────▶│ Resource         │
//! │ /Server  │     │               │     │ (domain object)  │
//! └──────────┘     └───────┬───────┘     └──────────────────┘
//!                          │
//!                          ▼
//!                 ┌─────────────────┐
//!                 │ NotificationHub │──▶ listeners (filtered / general)
//!                 └─────────────────┘
//! ```
//!
//! - **ManagedObject**: the adapter; resolves names through a
//!   `MetadataResolver` and dispatches on the declaring-object tag
//! - **Resource**: the wrapped domain object; may opt into dynamic
//!   dispatch or registration forwarding through capability probes
//! - **NotificationHub**: two independent broadcast channels, created
//!   lazily on first listener registration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mandrel::prelude::*;
//! use serde_json::json;
//!
//! let object = ManagedObject::new();
//! object.attach_metadata(Arc::new(WorkerMetadata));
//! object.attach_resource(Arc::new(Worker::default()));
//!
//! object.pre_register(&registry, Some("worker:1".into()))?;
//! object.post_register(true);
//!
//! object.set_attribute("RateLimit", json!(50))?;
//! let limit = object.get_attribute("RateLimit")?;
//! ```

pub use mandrel_core as core;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use mandrel::prelude::*;
/// ```
pub mod prelude {
    pub use mandrel_core::prelude::*;
}

// Common types at the crate root, for callers that prefer explicit paths.
pub use mandrel_core::{
    Attribute, AttributeList, BoxedListener, BoxedResolver, BoxedResource, DispatchError,
    DispatchResult, DynamicObject, Fault, LifecycleError, LifecycleResult, ManagedObject,
    ManagedResource, MetadataResolver, Notification, NotificationKind, NotificationListener,
    ObjectInfo, ObjectName, Recoverability, RegistrationHooks, RegistryHandle, ResolvedHandle,
    Target,
};
