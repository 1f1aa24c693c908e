//! Dual-channel notification hub.
//!
//! Every managed object owns two independent broadcast channels: one for
//! attribute-change notifications, one for everything else. Each channel's
//! [`Broadcaster`] is created lazily on first listener registration and
//! lives until the owning object is dropped; dispatching on a channel
//! whose broadcaster was never created is a no-op, equivalent to "no
//! listeners".

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use crate::dispatch::broadcaster::Broadcaster;
use crate::foundation::error::{DispatchError, DispatchResult};
use crate::foundation::notification::{
    ATTRIBUTE_CHANGE_TYPE, BoxedListener, GENERIC_TYPE, Notification, NotificationKind,
};

/// The two independent broadcast channels of a managed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Attribute-change notifications.
    AttributeChange,
    /// Generic notifications.
    General,
}

/// Owns the two per-object broadcasters.
#[derive(Debug, Default)]
pub struct NotificationHub {
    attribute: Mutex<Option<Arc<Broadcaster>>>,
    general: Mutex<Option<Arc<Broadcaster>>>,
}

impl NotificationHub {
    /// Creates a hub with no broadcasters yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, channel: Channel) -> &Mutex<Option<Arc<Broadcaster>>> {
        match channel {
            Channel::AttributeChange => &self.attribute,
            Channel::General => &self.general,
        }
    }

    /// Returns the channel's broadcaster, creating it on first use.
    fn broadcaster(&self, channel: Channel) -> Arc<Broadcaster> {
        let mut slot = self.slot(channel).lock();
        Arc::clone(slot.get_or_insert_with(|| Arc::new(Broadcaster::new())))
    }

    /// Returns the channel's broadcaster only if one was ever created.
    fn existing(&self, channel: Channel) -> Option<Arc<Broadcaster>> {
        self.slot(channel).lock().clone()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a listener on one channel.
    pub fn add_listener(
        &self,
        channel: Channel,
        listener: BoxedListener,
        filter: Option<String>,
        handback: Option<Value>,
    ) {
        debug!(channel = ?channel, filter = ?filter, "add listener");
        self.broadcaster(channel)
            .add_listener(listener, filter, handback);
    }

    /// Registers a listener through the generic entry point.
    ///
    /// The same listener, filter and handback land on the general channel
    /// and on the attribute-change channel. The generic entry point is the
    /// only way observers can reach attribute changes, so the registration
    /// is mirrored.
    pub fn add_generic_listener(
        &self,
        listener: BoxedListener,
        filter: Option<String>,
        handback: Option<Value>,
    ) {
        self.broadcaster(Channel::General).add_listener(
            Arc::clone(&listener),
            filter.clone(),
            handback.clone(),
        );
        self.broadcaster(Channel::AttributeChange)
            .add_listener(listener, filter, handback);
    }

    /// Removes every registration for `listener` on `channel`.
    ///
    /// Fails with `ListenerNotFound` when the channel's broadcaster was
    /// never created or the listener was never registered on it.
    pub fn remove_listener(&self, channel: Channel, listener: &BoxedListener) -> DispatchResult<()> {
        match self.existing(channel) {
            Some(broadcaster) => broadcaster.remove_listener(listener),
            None => Err(DispatchError::ListenerNotFound),
        }
    }

    /// Removes every registration for `listener` on both channels.
    ///
    /// Mirrors [`add_generic_listener`]: the removal succeeds when either
    /// channel held a registration and fails with `ListenerNotFound` only
    /// when neither did.
    pub fn remove_generic_listener(&self, listener: &BoxedListener) -> DispatchResult<()> {
        let general = self.remove_listener(Channel::General, listener);
        let attribute = self.remove_listener(Channel::AttributeChange, listener);
        match (general, attribute) {
            (Err(_), Err(err)) => Err(err),
            _ => Ok(()),
        }
    }

    // =========================================================================
    // Delivery
    // =========================================================================

    /// Fans `notification` out on `channel`.
    ///
    /// A channel whose broadcaster was never created has no listeners;
    /// dispatch is a no-op.
    pub fn dispatch(&self, channel: Channel, notification: &Notification) {
        if let Some(broadcaster) = self.existing(channel) {
            broadcaster.send(notification);
        }
    }

    /// The two built-in notification kinds every managed object can emit.
    pub fn builtin_kinds() -> Vec<NotificationKind> {
        vec![
            NotificationKind {
                types: vec![GENERIC_TYPE.to_string()],
                name: "GENERIC".to_string(),
                description: "Text message notification from the managed resource".to_string(),
            },
            NotificationKind {
                types: vec![ATTRIBUTE_CHANGE_TYPE.to_string()],
                name: "ATTRIBUTE_CHANGE".to_string(),
                description: "Observed attribute value has changed".to_string(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::notification::{NotificationListener, Source};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingListener {
        deliveries: AtomicUsize,
    }

    impl NotificationListener for CountingListener {
        fn handle_notification(&self, _notification: &Notification, _handback: Option<&Value>) {
            self.deliveries.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn change() -> Notification {
        Notification::attribute_change(Source::default(), 1, "Rate", None, Some(json!(1))).unwrap()
    }

    #[test]
    fn dispatch_without_listeners_is_a_no_op() {
        let hub = NotificationHub::new();
        hub.dispatch(Channel::AttributeChange, &change());
        hub.dispatch(Channel::General, &change());
    }

    #[test]
    fn generic_registration_lands_on_both_channels() {
        let hub = NotificationHub::new();
        let listener = Arc::new(CountingListener::default());
        hub.add_generic_listener(listener.clone(), None, None);

        // One attribute-change dispatch reaches the listener exactly once:
        // the mirrored registration sits on a different channel.
        hub.dispatch(Channel::AttributeChange, &change());
        assert_eq!(listener.deliveries.load(Ordering::SeqCst), 1);

        let generic = Notification::new(GENERIC_TYPE, Source::default(), 1, "hello");
        hub.dispatch(Channel::General, &generic);
        assert_eq!(listener.deliveries.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn channel_registration_stays_on_its_channel() {
        let hub = NotificationHub::new();
        let listener = Arc::new(CountingListener::default());
        hub.add_listener(Channel::AttributeChange, listener.clone(), None, None);

        let generic = Notification::new(GENERIC_TYPE, Source::default(), 1, "hello");
        hub.dispatch(Channel::General, &generic);
        assert_eq!(listener.deliveries.load(Ordering::SeqCst), 0);

        hub.dispatch(Channel::AttributeChange, &change());
        assert_eq!(listener.deliveries.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn remove_on_untouched_channel_fails() {
        let hub = NotificationHub::new();
        let listener: BoxedListener = Arc::new(CountingListener::default());
        assert!(matches!(
            hub.remove_listener(Channel::General, &listener),
            Err(DispatchError::ListenerNotFound)
        ));
    }

    #[test]
    fn generic_removal_clears_both_channels() {
        let hub = NotificationHub::new();
        let listener = Arc::new(CountingListener::default());
        let boxed: BoxedListener = listener.clone();
        hub.add_generic_listener(boxed.clone(), None, None);

        hub.remove_generic_listener(&boxed).unwrap();
        hub.dispatch(Channel::AttributeChange, &change());
        let generic = Notification::new(GENERIC_TYPE, Source::default(), 1, "hello");
        hub.dispatch(Channel::General, &generic);
        assert_eq!(listener.deliveries.load(Ordering::SeqCst), 0);

        assert!(matches!(
            hub.remove_generic_listener(&boxed),
            Err(DispatchError::ListenerNotFound)
        ));
    }

    #[test]
    fn builtin_kinds_cover_both_types() {
        let kinds = NotificationHub::builtin_kinds();
        assert_eq!(kinds.len(), 2);
        assert_eq!(kinds[0].types, vec![GENERIC_TYPE.to_string()]);
        assert_eq!(kinds[1].types, vec![ATTRIBUTE_CHANGE_TYPE.to_string()]);
    }
}
