//! Foundation layer - value, notification and error types.
//!
//! This module contains the fundamental building blocks of the engine:
//! - Attribute values and identity types
//! - Notification records and the observer contract
//! - The error taxonomy and the invocation-fault mapper

pub mod error;
pub mod notification;
pub mod value;

pub use error::{
    DispatchError, DispatchResult, Fault, LifecycleError, LifecycleResult, Recoverability,
    map_fault,
};
pub use notification::{
    ATTRIBUTE_CHANGE_TYPE, AttributeChange, BoxedListener, GENERIC_TYPE, Notification,
    NotificationKind, NotificationListener, Source,
};
pub use value::{Attribute, AttributeList, NO_ARGS, ObjectName, value_type_name};
