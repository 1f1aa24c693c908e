//! Integration layer - external collaborator interfaces.
//!
//! This module contains the seams between the engine and the systems
//! around it:
//! - The metadata-resolver interface consumed by the dispatcher
//! - The resource-side contract and its capability probes
//! - The managed-object adapter and its registration lifecycle

pub mod adapter;
pub mod lifecycle;
pub mod resolver;
pub mod resource;

pub use adapter::ManagedObject;
pub use resolver::{
    AttributeInfo, BoxedResolver, HandleFn, MetadataResolver, ObjectInfo, OperationInfo,
    ResolvedHandle, Target,
};
pub use resource::{
    BoxedResource, DynamicObject, ManagedResource, RegistrationHooks, RegistryHandle,
};
