//! Notification records and the observer contract.
//!
//! A [`Notification`] is an immutable event record fanned out to listeners
//! by the broadcast channels. Two built-in notification types exist: the
//! generic text message ([`GENERIC_TYPE`]) and the attribute value change
//! ([`ATTRIBUTE_CHANGE_TYPE`]); metadata may declare further kinds on top.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::value::{ObjectName, value_type_name};

/// Type string carried by generic text notifications.
pub const GENERIC_TYPE: &str = "mandrel.generic";

/// Type string carried by attribute-change notifications.
pub const ATTRIBUTE_CHANGE_TYPE: &str = "mandrel.attribute.change";

// =============================================================================
// Notification Records
// =============================================================================

/// Identity of the managed object that emitted a notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Assigned object name, once the object has been registered.
    pub object_name: Option<ObjectName>,
    /// Type tag of the attached resource, once one is attached.
    pub resource_type: Option<String>,
}

/// Details carried by an attribute-change notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeChange {
    /// Name of the attribute that changed.
    pub attribute: String,
    /// Declared type name of the attribute value.
    pub value_type: String,
    /// Prior value. Only present when the emitter supplied one; the engine
    /// never reconstructs it from an earlier read.
    pub old_value: Option<Value>,
    /// Value after the change.
    pub new_value: Option<Value>,
}

/// An immutable event record delivered to listeners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Notification type string, e.g. [`GENERIC_TYPE`].
    pub kind: String,
    /// Sequence number within the source.
    pub sequence: u64,
    /// Milliseconds since the Unix epoch at creation time.
    pub timestamp: u64,
    /// Identity of the emitting managed object.
    pub source: Source,
    /// Human-readable message.
    pub message: String,
    /// Present on attribute-change notifications.
    pub change: Option<AttributeChange>,
}

impl Notification {
    /// Creates a notification with the given type string and message.
    pub fn new(
        kind: impl Into<String>,
        source: Source,
        sequence: u64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            sequence,
            timestamp: timestamp_millis(),
            source,
            message: message.into(),
            change: None,
        }
    }

    /// Creates an attribute-change notification.
    ///
    /// Returns `None` when old and new values are both absent — nothing
    /// changed. The declared type name is taken from the new value, falling
    /// back to the old one.
    pub fn attribute_change(
        source: Source,
        sequence: u64,
        attribute: impl Into<String>,
        old_value: Option<Value>,
        new_value: Option<Value>,
    ) -> Option<Self> {
        let value_type = match (&new_value, &old_value) {
            (Some(value), _) => value_type_name(value),
            (None, Some(value)) => value_type_name(value),
            (None, None) => return None,
        };
        Some(Self {
            kind: ATTRIBUTE_CHANGE_TYPE.to_string(),
            sequence,
            timestamp: timestamp_millis(),
            source,
            message: "attribute value has changed".to_string(),
            change: Some(AttributeChange {
                attribute: attribute.into(),
                value_type: value_type.to_string(),
                old_value,
                new_value,
            }),
        })
    }

    /// Attribute name carried by this notification, when it is a change
    /// event.
    pub fn attribute_name(&self) -> Option<&str> {
        self.change.as_ref().map(|change| change.attribute.as_str())
    }
}

fn timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

// =============================================================================
// Notification Kinds
// =============================================================================

/// Describes one kind of notification a managed object can emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationKind {
    /// Notification type strings covered by this kind.
    pub types: Vec<String>,
    /// Short name, e.g. `"ATTRIBUTE_CHANGE"`.
    pub name: String,
    /// Human-readable description.
    pub description: String,
}

// =============================================================================
// Listener Contract
// =============================================================================

/// Observer callback contract.
///
/// A listener receives the delivered record together with the handback
/// token supplied at registration, unchanged.
pub trait NotificationListener: Send + Sync {
    /// Called once per matching delivery, in registration order.
    fn handle_notification(&self, notification: &Notification, handback: Option<&Value>);
}

/// A shared listener trait object.
///
/// Pointer identity doubles as listener identity: removal drops every
/// registration made with the same `Arc`.
pub type BoxedListener = Arc<dyn NotificationListener>;
