//! Unified error types for the mandrel core engine.
//!
//! Two layers of failure exist. A [`Fault`] is what a resolved handle
//! reports when executing the underlying getter, setter or operation goes
//! wrong — the shape the invocation machinery saw it in. A
//! [`DispatchError`] is what callers of the management surface receive;
//! [`map_fault`] translates the former into the latter.

use thiserror::Error;

// =============================================================================
// Invocation Faults
// =============================================================================

/// Failure raised while executing a resolved handle.
#[derive(Debug, Clone, Error)]
pub enum Fault {
    /// The invoked method itself raised; wraps the fault it raised.
    #[error("target raised: {0}")]
    Target(Box<Fault>),

    /// Programming-logic failure: a bad downcast, an argument-shape
    /// mismatch, a violated precondition in the target.
    #[error("{0}")]
    Logic(String),

    /// Fatal failure of the resource-exhaustion class the target cannot
    /// recover from.
    #[error("{0}")]
    Fatal(String),

    /// Any other failure reported by the target.
    #[error("{0}")]
    Other(String),
}

impl Fault {
    /// Unwraps one level of target wrapping, keeping the outer fault when
    /// there is nothing inside to unwrap.
    pub fn unwrap_target(self) -> Fault {
        match self {
            Fault::Target(inner) => *inner,
            other => other,
        }
    }
}

/// Whether a failed invocation left the target usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recoverability {
    /// A regular call failure; the next call may succeed.
    Recoverable,
    /// The target hit a fatal condition. The adapter itself stays usable.
    Unrecoverable,
    /// The fault class carries no recoverability claim.
    Unspecified,
}

// =============================================================================
// Dispatch Errors
// =============================================================================

/// Errors surfaced by the management call surface.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// A name or message argument was empty.
    #[error("name or message argument must not be empty")]
    EmptyName,

    /// No getter or setter is known for the attribute.
    #[error("attribute '{name}' not found")]
    AttributeNotFound {
        /// The unresolvable attribute name.
        name: String,
    },

    /// No operation matches the name and signature.
    #[error("operation '{name}' with signature {signature:?} not found")]
    OperationNotFound {
        /// The unresolvable operation name.
        name: String,
        /// The parameter signature the caller supplied.
        signature: Vec<String>,
    },

    /// Executing the resolved getter, setter or operation failed.
    #[error("invocation of '{name}' failed: {fault}")]
    Invocation {
        /// The attribute or operation being invoked.
        name: String,
        /// Whether the target is expected to remain usable.
        recoverable: Recoverability,
        /// The underlying fault, kept for diagnostics.
        #[source]
        fault: Fault,
    },

    /// The listener is not registered on the targeted channel.
    #[error("listener is not registered")]
    ListenerNotFound,

    /// No managed resource is attached.
    #[error("no managed resource attached")]
    NoResource,
}

/// Errors raised by resource registration hooks.
#[derive(Debug, Clone, Error)]
pub enum LifecycleError {
    /// The resource's pre-register hook rejected the registration.
    #[error("pre-register hook failed: {reason}")]
    PreRegister {
        /// Reason reported by the hook.
        reason: String,
    },

    /// The resource's pre-deregister hook rejected the deregistration.
    #[error("pre-deregister hook failed: {reason}")]
    PreDeregister {
        /// Reason reported by the hook.
        reason: String,
    },
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Translates a fault captured from an invocation attempt into the
/// caller-facing taxonomy.
///
/// One level of target wrapping is unwrapped first. Logic faults map to a
/// recoverable invocation failure, fatal faults to an unrecoverable one,
/// anything else carries no recoverability claim. The attribute/operation
/// name and the underlying fault always ride along for diagnostics.
pub fn map_fault(name: &str, fault: Fault) -> DispatchError {
    let fault = fault.unwrap_target();
    let recoverable = match &fault {
        Fault::Logic(_) => Recoverability::Recoverable,
        Fault::Fatal(_) => Recoverability::Unrecoverable,
        _ => Recoverability::Unspecified,
    };
    DispatchError::Invocation {
        name: name.to_string(),
        recoverable,
        fault,
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for management calls.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Result type for registration lifecycle phases.
pub type LifecycleResult<T> = Result<T, LifecycleError>;
