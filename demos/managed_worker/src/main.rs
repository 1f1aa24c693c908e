//! Managed Worker Demo
//!
//! A small task-queue worker placed behind a [`ManagedObject`] adapter.
//! The demo wires the three collaborating pieces together:
//!
//! - `Worker` — the plain domain object; it knows nothing about management
//! - `WorkerMetadata` — an in-memory metadata resolver mapping attribute
//!   and operation names onto the worker
//! - `LogListener` — an observer receiving attribute-change and generic
//!   notifications
//!
//! The walk-through then drives the full lifecycle: register, read and
//! write attributes, invoke operations, observe notifications, deregister.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package managed-worker
//! ```

use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use mandrel::core::{AttributeInfo, OperationInfo, ParamType, check_params};
use mandrel::prelude::*;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// The Domain Object
// ============================================================================

/// A toy task-queue worker.
struct Worker {
    queue: Mutex<Vec<String>>,
    completed: Mutex<u64>,
    rate_limit: Mutex<u64>,
}

impl Worker {
    fn new() -> Self {
        Self {
            queue: Mutex::new(Vec::new()),
            completed: Mutex::new(0),
            rate_limit: Mutex::new(10),
        }
    }

    fn enqueue(&self, task: String) -> usize {
        let mut queue = self.queue.lock();
        queue.push(task);
        queue.len()
    }

    fn drain(&self) -> u64 {
        let drained = self.queue.lock().drain(..).count() as u64;
        *self.completed.lock() += drained;
        drained
    }
}

impl fmt::Display for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Worker(queued={}, completed={})",
            self.queue.lock().len(),
            self.completed.lock()
        )
    }
}

impl ManagedResource for Worker {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Metadata
// ============================================================================

fn worker<'a>(any: &'a dyn Any) -> std::result::Result<&'a Worker, Fault> {
    any.downcast_ref::<Worker>()
        .ok_or_else(|| Fault::Logic("target is not a Worker".to_string()))
}

/// In-memory metadata for [`Worker`].
struct WorkerMetadata;

impl MetadataResolver for WorkerMetadata {
    fn resolve_getter(&self, name: &str) -> Option<ResolvedHandle> {
        match name {
            "QueueDepth" => Some(ResolvedHandle::on_resource(|any, _| {
                Ok(json!(worker(any)?.queue.lock().len()))
            })),
            "Completed" => Some(ResolvedHandle::on_resource(|any, _| {
                Ok(json!(*worker(any)?.completed.lock()))
            })),
            "RateLimit" => Some(ResolvedHandle::on_resource(|any, _| {
                Ok(json!(*worker(any)?.rate_limit.lock()))
            })),
            // The adapter, not the worker, declares its own type tag.
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
                    .and_then(Value::as_u64)
                    .ok_or_else(|| Fault::Logic("RateLimit takes one integer".to_string()))?;
                *worker(any)?.rate_limit.lock() = value;
                Ok(Value::Null)
            })),
            _ => None,
        }
    }

    fn resolve_operation(&self, name: &str, signature: &[String]) -> Option<ResolvedHandle> {
        match name {
            "enqueue" => {
                let types = [ParamType::from_str(signature.first()?.as_str()).ok()?];
                if types != [ParamType::Str] {
                    return None;
                }
                Some(ResolvedHandle::on_resource(move |any, params| {
                    if !check_params(&types, params) {
                        return Err(Fault::Logic("enqueue takes one string".to_string()));
                    }
                    let task = params[0].as_str().unwrap_or_default().to_string();
                    Ok(json!(worker(any)?.enqueue(task)))
                }))
            }
            "drain" if signature.is_empty() => Some(ResolvedHandle::on_resource(|any, _| {
                Ok(json!(worker(any)?.drain()))
            })),
            _ => None,
        }
    }

    fn describe(&self) -> ObjectInfo {
        ObjectInfo {
            type_tag: "worker".to_string(),
            description: "A managed task-queue worker".to_string(),
            attributes: vec![
                AttributeInfo {
                    name: "QueueDepth".to_string(),
                    description: "Tasks currently queued".to_string(),
                    value_type: "number".to_string(),
                    readable: true,
                    writable: false,
                },
                AttributeInfo {
                    name: "Completed".to_string(),
                    description: "Tasks completed so far".to_string(),
                    value_type: "number".to_string(),
                    readable: true,
                    writable: false,
                },
                AttributeInfo {
                    name: "RateLimit".to_string(),
                    description: "Maximum tasks per tick".to_string(),
                    value_type: "number".to_string(),
                    readable: true,
                    writable: true,
                },
            ],
            operations: vec![
                OperationInfo {
                    name: "enqueue".to_string(),
                    description: "Queues one task".to_string(),
                    signature: vec!["string".to_string()],
                    return_type: "number".to_string(),
                },
                OperationInfo {
                    name: "drain".to_string(),
                    description: "Completes every queued task".to_string(),
                    signature: Vec::new(),
                    return_type: "number".to_string(),
                },
            ],
            notifications: Vec::new(),
        }
    }
}

// ============================================================================
// Observer
// ============================================================================

/// Logs every delivered notification.
struct LogListener;

impl NotificationListener for LogListener {
    fn handle_notification(&self, notification: &Notification, handback: Option<&Value>) {
        match &notification.change {
            Some(change) => info!(
                attribute = %change.attribute,
                new_value = ?change.new_value,
                handback = ?handback,
                "attribute changed"
            ),
            None => info!(
                kind = %notification.kind,
                message = %notification.message,
                "notification"
            ),
        }
    }
}

// ============================================================================
// Walk-through
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let object = ManagedObject::new();
    object.attach_metadata(Arc::new(WorkerMetadata));
    object.attach_resource(Arc::new(Worker::new()));

    // Register with a registry handle; the worker carries no registration
    // capability, so the proposed name sticks.
    let registry: RegistryHandle = Arc::new(());
    let assigned = object.pre_register(&registry, Some(ObjectName::new("worker:demo")))?;
    object.post_register(true);
    info!(name = ?assigned, "registered");

    // Observe attribute changes through the generic listener entry point.
    let listener: BoxedListener = Arc::new(LogListener);
    object.add_listener(listener.clone(), None, Some(json!("demo-handback")));

    // Drive the worker through the management surface.
    object.invoke("enqueue", &[json!("build")], &["string".to_string()])?;
    object.invoke("enqueue", &[json!("test")], &["string".to_string()])?;
    object.set_attribute("RateLimit", json!(50))?;

    for attribute in object.get_attributes(&["QueueDepth", "RateLimit", "ResourceType"]) {
        info!(name = %attribute.name, value = %attribute.value, "attribute");
    }

    let drained = object.invoke("drain", &[], &[])?;
    info!(%drained, "queue drained");
    object.send_message("worker drained its queue")?;

    // Bulk writes swallow per-entry failures; the read-back below only
    // returns the names that survived.
    let written = object.set_attributes(vec![
        Attribute::new("RateLimit", json!(75)),
        Attribute::new("NoSuchAttribute", json!(1)),
    ]);
    info!(?written, "bulk write result");

    info!(info = ?object.object_info(), "management surface");

    object.remove_listener(&listener)?;
    object.pre_deregister()?;
    object.post_deregister();
    info!(object = %object, "deregistered");

    Ok(())
}
