//! The managed-object adapter.
//!
//! [`ManagedObject`] pairs externally supplied metadata with an optional
//! backing resource and exposes the uniform management surface over the
//! pair: attribute reads and writes, operation invocation, and
//! dual-channel notification fan-out. It sits between the registry/server
//! collaborator and the resource.
//!
//! # Architecture
//!
//! ```text
//! Registry ←→ ManagedObject ←→ Resource (domain-specific)
//!                   ↕
//!            MetadataResolver
//! ```
//!
//! Calls behave identically whether the resolved handle targets the
//! adapter itself or the resource: the dispatcher switches on the
//! declaring-object tag the resolver attached to the handle and never
//! inspects runtime types itself. A resource that natively implements
//! [`DynamicObject`] short-circuits dispatch entirely — the call is
//! forwarded verbatim and its result returned unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! let object = ManagedObject::new();
//! object.attach_metadata(Arc::new(WorkerMetadata));
//! object.attach_resource(Arc::new(Worker::default()));
//!
//! object.set_attribute("RateLimit", json!(50))?;
//! let limit = object.get_attribute("RateLimit")?;
//! let _ = object.invoke("reset", &[], &[])?;
//! ```

use std::any::Any;
use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, error};

use crate::dispatch::hub::{Channel, NotificationHub};
use crate::foundation::error::{DispatchError, DispatchResult, Fault, map_fault};
use crate::foundation::notification::{
    BoxedListener, GENERIC_TYPE, Notification, NotificationKind, Source,
};
use crate::foundation::value::{Attribute, AttributeList, NO_ARGS, ObjectName};
use crate::integration::resolver::{BoxedResolver, ObjectInfo, ResolvedHandle, Target};
use crate::integration::resource::{BoxedResource, DynamicObject, ManagedResource};

/// A managed-object adapter over an optional backing resource.
///
/// Created empty, then bound once to a metadata resolver and once to a
/// resource before being exposed for dispatch. Destruction releases the
/// broadcasters and the resource reference without acting on the resource
/// itself.
pub struct ManagedObject {
    /// Identity assigned during pre-register.
    name: Mutex<Option<ObjectName>>,
    /// One-time metadata binding.
    metadata: OnceLock<BoxedResolver>,
    /// One-time resource binding.
    resource: OnceLock<BoxedResource>,
    /// Type tag fixed when the resource is attached.
    resource_type: OnceLock<String>,
    /// Dual-channel broadcasters, torn down with the object.
    hub: NotificationHub,
}

impl ManagedObject {
    /// Creates an empty, unbound managed object.
    pub fn new() -> Self {
        Self {
            name: Mutex::new(None),
            metadata: OnceLock::new(),
            resource: OnceLock::new(),
            resource_type: OnceLock::new(),
            hub: NotificationHub::new(),
        }
    }

    // =========================================================================
    // Bindings
    // =========================================================================

    /// Attaches the metadata resolver.
    ///
    /// The binding is one-time; a later call keeps the first resolver.
    pub fn attach_metadata(&self, resolver: BoxedResolver) {
        if self.metadata.set(resolver).is_err() {
            debug!("metadata already attached, keeping the original binding");
        }
    }

    /// Attaches the backing resource and fixes its type tag from the
    /// concrete type.
    ///
    /// The adapter holds a non-owning reference; dropping the adapter
    /// never acts on the resource. The binding is one-time; a later call
    /// keeps the first resource.
    pub fn attach_resource<R: ManagedResource>(&self, resource: Arc<R>) {
        if self.resource_type.set(std::any::type_name::<R>().to_string()).is_ok() {
            let _ = self.resource.set(resource);
        } else {
            debug!("resource already attached, keeping the original binding");
        }
    }

    /// The attached resource.
    pub fn managed_resource(&self) -> DispatchResult<&BoxedResource> {
        self.resource.get().ok_or(DispatchError::NoResource)
    }

    pub(crate) fn resource(&self) -> Option<&BoxedResource> {
        self.resource.get()
    }

    /// Resource delegation short-circuit: the resource's own dynamic
    /// surface takes over the whole call when it has one and is not
    /// itself an adapter.
    fn delegate(&self) -> Option<&dyn DynamicObject> {
        let resource = self.resource.get()?;
        if resource.as_any().is::<ManagedObject>() {
            return None;
        }
        resource.as_dynamic()
    }

    // =========================================================================
    // Attribute Access
    // =========================================================================

    /// Reads one attribute.
    ///
    /// Whatever the resolved getter produces is returned as-is; no
    /// return-type validation is performed.
    pub fn get_attribute(&self, name: &str) -> DispatchResult<Value> {
        if name.is_empty() {
            return Err(DispatchError::AttributeNotFound {
                name: name.to_string(),
            });
        }
        if let Some(delegate) = self.delegate() {
            return delegate.get_attribute(name);
        }
        let handle = self
            .metadata
            .get()
            .and_then(|metadata| metadata.resolve_getter(name))
            .ok_or_else(|| DispatchError::AttributeNotFound {
                name: name.to_string(),
            })?;
        self.call(name, &handle, NO_ARGS)
    }

    /// Reads several attributes at once.
    ///
    /// Per-name failures are swallowed and the name omitted from the
    /// result, in order: a bulk read never fails wholesale because one
    /// getter did.
    pub fn get_attributes(&self, names: &[&str]) -> AttributeList {
        names
            .iter()
            .filter_map(|name| match self.get_attribute(name) {
                Ok(value) => Some(Attribute::new(*name, value)),
                Err(err) => {
                    debug!(attribute = %name, error = %err, "omitting attribute from bulk read");
                    None
                }
            })
            .collect()
    }

    /// Writes one attribute.
    ///
    /// On success a change notification is emitted best-effort: the prior
    /// value is never read back, and an emission failure is logged
    /// without failing the write.
    pub fn set_attribute(&self, name: &str, value: Value) -> DispatchResult<()> {
        debug!(attribute = %name, "set attribute");
        if let Some(delegate) = self.delegate() {
            return delegate.set_attribute(name, value);
        }
        if name.is_empty() {
            return Err(DispatchError::EmptyName);
        }
        let handle = self
            .metadata
            .get()
            .and_then(|metadata| metadata.resolve_setter(name))
            .ok_or_else(|| DispatchError::AttributeNotFound {
                name: name.to_string(),
            })?;
        let params = [value.clone()];
        self.call(name, &handle, &params)?;

        if let Err(err) = self.send_attribute_change(name, None, Some(value)) {
            error!(attribute = %name, error = %err, "failed to emit attribute change notification");
        }
        Ok(())
    }

    /// Writes several attributes, swallowing per-entry failures, then
    /// returns the post-write values of exactly the supplied names.
    pub fn set_attributes(&self, attributes: AttributeList) -> AttributeList {
        let names: Vec<String> = attributes
            .iter()
            .map(|attribute| attribute.name.clone())
            .collect();
        for attribute in attributes {
            if let Err(err) = self.set_attribute(&attribute.name, attribute.value) {
                debug!(attribute = %attribute.name, error = %err, "skipping attribute in bulk write");
            }
        }
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        self.get_attributes(&names)
    }

    // =========================================================================
    // Operation Invocation
    // =========================================================================

    /// Invokes a named operation.
    pub fn invoke(
        &self,
        name: &str,
        params: &[Value],
        signature: &[String],
    ) -> DispatchResult<Value> {
        if let Some(delegate) = self.delegate() {
            return delegate.invoke(name, params, signature);
        }
        if name.is_empty() {
            return Err(DispatchError::EmptyName);
        }
        debug!(operation = %name, "invoke");
        let handle = self
            .metadata
            .get()
            .and_then(|metadata| metadata.resolve_operation(name, signature))
            .ok_or_else(|| DispatchError::OperationNotFound {
                name: name.to_string(),
                signature: signature.to_vec(),
            })?;
        self.call(name, &handle, params)
    }

    /// Invokes a resolved handle against the object its tag names.
    fn call(&self, name: &str, handle: &ResolvedHandle, params: &[Value]) -> DispatchResult<Value> {
        let outcome = match handle.target {
            Target::Adapter => (handle.call)(self as &dyn Any, params),
            Target::Resource => match self.resource.get() {
                Some(resource) => (handle.call)(resource.as_any(), params),
                None => Err(Fault::Logic("no managed resource attached".to_string())),
            },
        };
        outcome.map_err(|fault| map_fault(name, fault))
    }

    // =========================================================================
    // Listener Registration
    // =========================================================================

    /// Registers a listener for attribute-change notifications.
    ///
    /// `filter` narrows delivery to one attribute name; `None` observes
    /// every attribute.
    pub fn add_attribute_change_listener(
        &self,
        listener: BoxedListener,
        filter: Option<&str>,
        handback: Option<Value>,
    ) {
        self.hub.add_listener(
            Channel::AttributeChange,
            listener,
            filter.map(str::to_string),
            handback,
        );
    }

    /// Removes every attribute-change registration for `listener`.
    pub fn remove_attribute_change_listener(&self, listener: &BoxedListener) -> DispatchResult<()> {
        self.hub.remove_listener(Channel::AttributeChange, listener)
    }

    /// Registers a listener through the generic entry point.
    ///
    /// The registration is mirrored onto the attribute-change channel;
    /// there is no other way for a generic listener to observe attribute
    /// changes.
    pub fn add_listener(
        &self,
        listener: BoxedListener,
        filter: Option<&str>,
        handback: Option<Value>,
    ) {
        self.hub
            .add_generic_listener(listener, filter.map(str::to_string), handback);
    }

    /// Removes every registration for `listener` on both channels.
    pub fn remove_listener(&self, listener: &BoxedListener) -> DispatchResult<()> {
        self.hub.remove_generic_listener(listener)
    }

    // =========================================================================
    // Notification Emission
    // =========================================================================

    /// Fans a notification out on the general channel.
    pub fn send_notification(&self, notification: Notification) {
        self.hub.dispatch(Channel::General, &notification);
    }

    /// Sends `message` as a generic text notification.
    pub fn send_message(&self, message: &str) -> DispatchResult<()> {
        if message.is_empty() {
            return Err(DispatchError::EmptyName);
        }
        self.send_notification(Notification::new(GENERIC_TYPE, self.source(), 1, message));
        Ok(())
    }

    /// Emits an attribute-change notification.
    ///
    /// Silently skipped when old and new values are both absent. The old
    /// value is whatever the caller supplies; it is never reconstructed
    /// from a prior read.
    pub fn send_attribute_change(
        &self,
        attribute: &str,
        old_value: Option<Value>,
        new_value: Option<Value>,
    ) -> DispatchResult<()> {
        if attribute.is_empty() {
            return Err(DispatchError::EmptyName);
        }
        let Some(notification) =
            Notification::attribute_change(self.source(), 1, attribute, old_value, new_value)
        else {
            return Ok(());
        };
        self.send_attribute_change_notification(notification);
        Ok(())
    }

    /// Fans a pre-built change notification out on the attribute channel.
    pub fn send_attribute_change_notification(&self, notification: Notification) {
        debug!(kind = %notification.kind, "attribute change notification");
        self.hub.dispatch(Channel::AttributeChange, &notification);
    }

    /// Notification kinds this object can emit: the two built-ins
    /// followed by whatever the metadata declares.
    pub fn notification_kinds(&self) -> Vec<NotificationKind> {
        let mut kinds = NotificationHub::builtin_kinds();
        if let Some(metadata) = self.metadata.get() {
            kinds.extend(metadata.describe().notifications);
        }
        kinds
    }

    // =========================================================================
    // Identity & Description
    // =========================================================================

    /// Structured description of the management surface, passed through
    /// from the metadata resolver unmodified.
    pub fn object_info(&self) -> Option<ObjectInfo> {
        self.metadata.get().map(|metadata| metadata.describe())
    }

    /// Assigned identity, once registered.
    pub fn object_name(&self) -> Option<ObjectName> {
        self.name.lock().clone()
    }

    pub(crate) fn set_object_name(&self, name: Option<ObjectName>) {
        *self.name.lock() = name;
    }

    /// Resource type tag fixed at attach time.
    pub fn resource_type(&self) -> Option<&str> {
        self.resource_type.get().map(String::as_str)
    }

    fn source(&self) -> Source {
        Source {
            object_name: self.object_name(),
            resource_type: self.resource_type().map(str::to_string),
        }
    }
}

impl Default for ManagedObject {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ManagedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resource.get() {
            Some(resource) => write!(f, "{resource}"),
            None => write!(
                f,
                "ManagedObject[{}]",
                self.resource_type().unwrap_or("unbound")
            ),
        }
    }
}

impl fmt::Debug for ManagedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedObject")
            .field("name", &self.object_name())
            .field("resource_type", &self.resource_type())
            .finish()
    }
}

/// The adapter satisfies the full dynamic-dispatch contract itself, so a
/// managed object can stand behind another adapter. The recursion guard in
/// the dispatcher keeps such nesting from short-circuiting.
impl DynamicObject for ManagedObject {
    fn get_attribute(&self, name: &str) -> DispatchResult<Value> {
        ManagedObject::get_attribute(self, name)
    }

    fn set_attribute(&self, name: &str, value: Value) -> DispatchResult<()> {
        ManagedObject::set_attribute(self, name, value)
    }

    fn invoke(&self, name: &str, params: &[Value], signature: &[String]) -> DispatchResult<Value> {
        ManagedObject::invoke(self, name, params, signature)
    }
}

impl ManagedResource for ManagedObject {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_dynamic(&self) -> Option<&dyn DynamicObject> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::error::Recoverability;
    use crate::foundation::notification::NotificationListener;
    use crate::integration::resolver::MetadataResolver;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // A worker with one read/write attribute, one read-only attribute and
    // two operations.
    struct Worker {
        rate_limit: Mutex<i64>,
        tasks_completed: Mutex<i64>,
        fail_reset: bool,
    }

    impl Worker {
        fn new() -> Self {
            Self {
                rate_limit: Mutex::new(10),
                tasks_completed: Mutex::new(3),
                fail_reset: false,
            }
        }
    }

    impl fmt::Display for Worker {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Worker(rate_limit={})", *self.rate_limit.lock())
        }
    }

    impl ManagedResource for Worker {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn worker<'a>(any: &'a dyn Any) -> Result<&'a Worker, Fault> {
        any.downcast_ref::<Worker>()
            .ok_or_else(|| Fault::Logic("target is not a Worker".to_string()))
    }

    struct WorkerMetadata;

    impl MetadataResolver for WorkerMetadata {
        fn resolve_getter(&self, name: &str) -> Option<ResolvedHandle> {
            match name {
                "RateLimit" => Some(ResolvedHandle::on_resource(|any, _| {
                    Ok(json!(*worker(any)?.rate_limit.lock()))
                })),
                "TasksCompleted" => Some(ResolvedHandle::on_resource(|any, _| {
                    Ok(json!(*worker(any)?.tasks_completed.lock()))
                })),
                // Declared by the adapter itself, not the resource.
                "ResourceType" => Some(ResolvedHandle::on_adapter(|any, _| {
                    let object = any
                        .downcast_ref::<ManagedObject>()
                        .ok_or_else(|| Fault::Logic("target is not an adapter".to_string()))?;
                    Ok(json!(object.resource_type().unwrap_or("unknown")))
                })),
                _ => None,
            }
        }

        fn resolve_setter(&self, name: &str) -> Option<ResolvedHandle> {
            match name {
                "RateLimit" => Some(ResolvedHandle::on_resource(|any, params| {
                    let value = params
                        .first()
                        .and_then(Value::as_i64)
                        .ok_or_else(|| Fault::Logic("RateLimit takes one integer".to_string()))?;
                    *worker(any)?.rate_limit.lock() = value;
                    Ok(Value::Null)
                })),
                _ => None,
            }
        }

        fn resolve_operation(&self, name: &str, signature: &[String]) -> Option<ResolvedHandle> {
            match (name, signature) {
                ("reset", []) => Some(ResolvedHandle::on_resource(|any, _| {
                    let worker = worker(any)?;
                    if worker.fail_reset {
                        return Err(Fault::Target(Box::new(Fault::Other(
                            "reset refused by worker".to_string(),
                        ))));
                    }
                    *worker.tasks_completed.lock() = 0;
                    Ok(Value::Null)
                })),
                _ => None,
            }
        }

        fn describe(&self) -> ObjectInfo {
            ObjectInfo {
                type_tag: "worker".to_string(),
                description: "test worker".to_string(),
                notifications: vec![NotificationKind {
                    types: vec!["worker.drained".to_string()],
                    name: "DRAINED".to_string(),
                    description: "queue drained".to_string(),
                }],
                ..ObjectInfo::default()
            }
        }
    }

    fn managed_worker() -> (ManagedObject, Arc<Worker>) {
        let object = ManagedObject::new();
        let resource = Arc::new(Worker::new());
        object.attach_metadata(Arc::new(WorkerMetadata));
        object.attach_resource(Arc::clone(&resource));
        (object, resource)
    }

    #[derive(Default)]
    struct RecordingListener {
        deliveries: AtomicUsize,
        last: Mutex<Option<Notification>>,
    }

    impl NotificationListener for RecordingListener {
        fn handle_notification(&self, notification: &Notification, _handback: Option<&Value>) {
            self.deliveries.fetch_add(1, Ordering::SeqCst);
            *self.last.lock() = Some(notification.clone());
        }
    }

    #[test]
    fn getter_value_is_returned_as_is() {
        let (object, _) = managed_worker();
        assert_eq!(object.get_attribute("RateLimit").unwrap(), json!(10));
    }

    #[test]
    fn unresolvable_attribute_fails_with_not_found() {
        let (object, _) = managed_worker();
        assert!(matches!(
            object.get_attribute("Missing"),
            Err(DispatchError::AttributeNotFound { .. })
        ));
        assert!(matches!(
            object.get_attribute(""),
            Err(DispatchError::AttributeNotFound { .. })
        ));
    }

    #[test]
    fn bulk_read_omits_failures_and_preserves_order() {
        let (object, _) = managed_worker();
        let values = object.get_attributes(&["RateLimit", "Missing", "TasksCompleted"]);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], Attribute::new("RateLimit", json!(10)));
        assert_eq!(values[1], Attribute::new("TasksCompleted", json!(3)));
    }

    #[test]
    fn write_then_read_round_trips() {
        let (object, _) = managed_worker();
        object.set_attribute("RateLimit", json!(50)).unwrap();
        assert_eq!(object.get_attribute("RateLimit").unwrap(), json!(50));
    }

    #[test]
    fn write_without_setter_fails_with_not_found() {
        let (object, _) = managed_worker();
        assert!(matches!(
            object.set_attribute("TasksCompleted", json!(0)),
            Err(DispatchError::AttributeNotFound { .. })
        ));
        assert!(matches!(
            object.set_attribute("", json!(0)),
            Err(DispatchError::EmptyName)
        ));
    }

    #[test]
    fn write_notifies_generic_listener_exactly_once() {
        let (object, _) = managed_worker();
        let listener = Arc::new(RecordingListener::default());
        object.add_listener(listener.clone(), None, None);

        object.set_attribute("RateLimit", json!(25)).unwrap();

        assert_eq!(listener.deliveries.load(Ordering::SeqCst), 1);
        let last = listener.last.lock().clone().unwrap();
        let change = last.change.unwrap();
        assert_eq!(change.attribute, "RateLimit");
        assert_eq!(change.old_value, None);
        assert_eq!(change.new_value, Some(json!(25)));
    }

    #[test]
    fn removed_listener_receives_nothing_further() {
        let (object, _) = managed_worker();
        let listener = Arc::new(RecordingListener::default());
        let boxed: BoxedListener = listener.clone();
        object.add_listener(boxed.clone(), None, None);
        object.remove_listener(&boxed).unwrap();

        object.set_attribute("RateLimit", json!(25)).unwrap();
        assert_eq!(listener.deliveries.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn removing_a_never_registered_listener_fails() {
        let (object, _) = managed_worker();
        let stranger: BoxedListener = Arc::new(RecordingListener::default());
        assert!(matches!(
            object.remove_listener(&stranger),
            Err(DispatchError::ListenerNotFound)
        ));
    }

    #[test]
    fn filtered_listener_only_sees_its_attribute() {
        let (object, _) = managed_worker();
        let listener = Arc::new(RecordingListener::default());
        object.add_attribute_change_listener(listener.clone(), Some("Depth"), None);

        object.set_attribute("RateLimit", json!(25)).unwrap();
        assert_eq!(listener.deliveries.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn invoke_runs_the_resource_operation() {
        let (object, resource) = managed_worker();
        assert_eq!(object.invoke("reset", &[], &[]).unwrap(), Value::Null);
        assert_eq!(*resource.tasks_completed.lock(), 0);
    }

    #[test]
    fn invoke_failure_carries_the_original_cause() {
        let object = ManagedObject::new();
        object.attach_metadata(Arc::new(WorkerMetadata));
        object.attach_resource(Arc::new(Worker {
            fail_reset: true,
            ..Worker::new()
        }));

        match object.invoke("reset", &[], &[]) {
            Err(DispatchError::Invocation {
                name,
                recoverable,
                fault,
            }) => {
                assert_eq!(name, "reset");
                // One level of target wrapping unwrapped; the inner fault
                // class carries no recoverability claim.
                assert_eq!(recoverable, Recoverability::Unspecified);
                assert!(fault.to_string().contains("reset refused"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn invoke_validates_the_name_and_signature() {
        let (object, _) = managed_worker();
        assert!(matches!(
            object.invoke("", &[], &[]),
            Err(DispatchError::EmptyName)
        ));
        assert!(matches!(
            object.invoke("reset", &[], &["i64".to_string()]),
            Err(DispatchError::OperationNotFound { .. })
        ));
    }

    #[test]
    fn adapter_declared_handles_run_against_the_adapter() {
        let (object, _) = managed_worker();
        let value = object.get_attribute("ResourceType").unwrap();
        let tag = value.as_str().unwrap();
        assert!(tag.ends_with("Worker"), "unexpected tag: {tag}");
    }

    #[test]
    fn resource_target_without_resource_is_an_invocation_failure() {
        let object = ManagedObject::new();
        object.attach_metadata(Arc::new(WorkerMetadata));
        assert!(matches!(
            object.get_attribute("RateLimit"),
            Err(DispatchError::Invocation { .. })
        ));
    }

    #[test]
    fn bulk_write_returns_post_write_values_of_supplied_names() {
        let (object, _) = managed_worker();
        let written = object.set_attributes(vec![
            Attribute::new("RateLimit", json!(42)),
            Attribute::new("Missing", json!(1)),
        ]);
        // "Missing" failed to write and has no getter either, so only the
        // surviving name comes back.
        assert_eq!(written, vec![Attribute::new("RateLimit", json!(42))]);
    }

    #[test]
    fn send_message_validates_and_reaches_general_listeners() {
        let (object, _) = managed_worker();
        let listener = Arc::new(RecordingListener::default());
        object.add_listener(listener.clone(), None, None);

        assert!(matches!(
            object.send_message(""),
            Err(DispatchError::EmptyName)
        ));
        object.send_message("draining").unwrap();

        assert_eq!(listener.deliveries.load(Ordering::SeqCst), 1);
        let last = listener.last.lock().clone().unwrap();
        assert_eq!(last.kind, GENERIC_TYPE);
        assert_eq!(last.message, "draining");
    }

    #[test]
    fn change_with_both_values_absent_is_not_emitted() {
        let (object, _) = managed_worker();
        let listener = Arc::new(RecordingListener::default());
        object.add_listener(listener.clone(), None, None);

        object.send_attribute_change("RateLimit", None, None).unwrap();
        assert_eq!(listener.deliveries.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn notification_kinds_prepend_the_builtins() {
        let (object, _) = managed_worker();
        let kinds = object.notification_kinds();
        assert_eq!(kinds.len(), 3);
        assert_eq!(kinds[0].name, "GENERIC");
        assert_eq!(kinds[1].name, "ATTRIBUTE_CHANGE");
        assert_eq!(kinds[2].name, "DRAINED");
    }

    #[test]
    fn object_info_is_passed_through() {
        let (object, _) = managed_worker();
        let info = object.object_info().unwrap();
        assert_eq!(info.type_tag, "worker");

        let unbound = ManagedObject::new();
        assert!(unbound.object_info().is_none());
        assert!(matches!(
            unbound.managed_resource(),
            Err(DispatchError::NoResource)
        ));
    }

    #[test]
    fn display_prefers_the_resource() {
        let (object, _) = managed_worker();
        assert_eq!(object.to_string(), "Worker(rate_limit=10)");
        assert_eq!(ManagedObject::new().to_string(), "ManagedObject[unbound]");
    }

    // =========================================================================
    // Dynamic-resource delegation
    // =========================================================================

    /// A resource that is a dynamic dispatch target in its own right.
    struct NativeDynamic;

    impl fmt::Display for NativeDynamic {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("NativeDynamic")
        }
    }

    impl DynamicObject for NativeDynamic {
        fn get_attribute(&self, name: &str) -> DispatchResult<Value> {
            Ok(json!(format!("native:{name}")))
        }

        fn set_attribute(&self, _name: &str, _value: Value) -> DispatchResult<()> {
            Err(DispatchError::EmptyName)
        }

        fn invoke(
            &self,
            name: &str,
            _params: &[Value],
            _signature: &[String],
        ) -> DispatchResult<Value> {
            Ok(json!(format!("invoked:{name}")))
        }
    }

    impl ManagedResource for NativeDynamic {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_dynamic(&self) -> Option<&dyn DynamicObject> {
            Some(self)
        }
    }

    /// A resolver that must never be consulted.
    struct UnreachableMetadata;

    impl MetadataResolver for UnreachableMetadata {
        fn resolve_getter(&self, _name: &str) -> Option<ResolvedHandle> {
            panic!("metadata resolution must be bypassed")
        }

        fn resolve_setter(&self, _name: &str) -> Option<ResolvedHandle> {
            panic!("metadata resolution must be bypassed")
        }

        fn resolve_operation(&self, _name: &str, _signature: &[String]) -> Option<ResolvedHandle> {
            panic!("metadata resolution must be bypassed")
        }

        fn describe(&self) -> ObjectInfo {
            ObjectInfo::default()
        }
    }

    #[test]
    fn native_dynamic_resource_takes_over_the_call_surface() {
        let object = ManagedObject::new();
        object.attach_metadata(Arc::new(UnreachableMetadata));
        object.attach_resource(Arc::new(NativeDynamic));

        assert_eq!(object.get_attribute("x").unwrap(), json!("native:x"));
        assert_eq!(
            object.invoke("reset", &[], &[]).unwrap(),
            json!("invoked:reset")
        );
        // The resource's own error comes back unchanged.
        assert!(matches!(
            object.set_attribute("x", json!(1)),
            Err(DispatchError::EmptyName)
        ));
    }

    #[test]
    fn nested_adapter_is_not_short_circuited() {
        let (inner, _) = managed_worker();

        let outer = ManagedObject::new();
        outer.attach_resource(Arc::new(inner));

        // The recursion guard forces the outer object through its own
        // metadata; with none attached the attribute cannot resolve.
        assert!(matches!(
            outer.get_attribute("RateLimit"),
            Err(DispatchError::AttributeNotFound { .. })
        ));
    }
}
