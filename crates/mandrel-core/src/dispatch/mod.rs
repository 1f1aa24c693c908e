//! Dispatch layer - notification fan-out and signature resolution.
//!
//! This module contains the delivery machinery sitting between the
//! managed-object adapter and its observers:
//! - Per-channel listener registration and fan-out
//! - The dual-channel notification hub
//! - Signature-string resolution for operation overloads

pub mod broadcaster;
pub mod hub;
pub mod signature;

pub use broadcaster::Broadcaster;
pub use hub::{Channel, NotificationHub};
pub use signature::{ParamType, check_params, resolve_signature};
