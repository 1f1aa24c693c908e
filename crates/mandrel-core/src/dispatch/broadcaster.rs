//! Listener registration and fan-out for a single notification channel.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::foundation::error::{DispatchError, DispatchResult};
use crate::foundation::notification::{BoxedListener, Notification};

/// One listener registration on a broadcaster.
///
/// The same listener may be registered any number of times with different
/// filters; registrations stay independent until the listener is removed,
/// which drops all of them at once.
struct Registration {
    listener: BoxedListener,
    /// Attribute-name filter; `None` matches every notification.
    filter: Option<String>,
    /// Opaque token returned to the listener with each delivery.
    handback: Option<Value>,
}

impl Registration {
    fn matches(&self, notification: &Notification) -> bool {
        match (&self.filter, notification.attribute_name()) {
            (None, _) => true,
            (Some(filter), Some(attribute)) => filter == attribute,
            // A named filter never matches a notification without an
            // attribute.
            (Some(_), None) => false,
        }
    }
}

/// Fan-out delivery for one notification channel.
///
/// Registrations live behind a mutex so that add/remove and dispatch on the
/// same broadcaster never interleave destructively; no lock spans more than
/// one call.
#[derive(Default)]
pub struct Broadcaster {
    registrations: Mutex<Vec<Registration>>,
}

impl Broadcaster {
    /// Creates an empty broadcaster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener.
    ///
    /// Repeated registrations of the same listener are all kept.
    pub fn add_listener(
        &self,
        listener: BoxedListener,
        filter: Option<String>,
        handback: Option<Value>,
    ) {
        self.registrations.lock().push(Registration {
            listener,
            filter,
            handback,
        });
    }

    /// Removes every registration held for `listener`.
    ///
    /// Identity is `Arc` pointer identity. Fails with `ListenerNotFound`
    /// when no registration matched.
    pub fn remove_listener(&self, listener: &BoxedListener) -> DispatchResult<()> {
        let mut registrations = self.registrations.lock();
        let before = registrations.len();
        registrations.retain(|registration| !Arc::ptr_eq(&registration.listener, listener));
        if registrations.len() == before {
            return Err(DispatchError::ListenerNotFound);
        }
        Ok(())
    }

    /// Delivers `notification` to every matching registration, in
    /// registration order.
    pub fn send(&self, notification: &Notification) {
        // Snapshot the matches, then deliver without the lock so a listener
        // may add or remove registrations from its callback.
        let matched: Vec<(BoxedListener, Option<Value>)> = self
            .registrations
            .lock()
            .iter()
            .filter(|registration| registration.matches(notification))
            .map(|registration| {
                (
                    Arc::clone(&registration.listener),
                    registration.handback.clone(),
                )
            })
            .collect();
        for (listener, handback) in matched {
            listener.handle_notification(notification, handback.as_ref());
        }
    }

    /// Number of live registrations.
    pub fn registration_count(&self) -> usize {
        self.registrations.lock().len()
    }
}

impl std::fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcaster")
            .field("registration_count", &self.registration_count())
            .finish()
    }
}
