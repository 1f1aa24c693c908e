//! Registration lifecycle forwarding.
//!
//! The surrounding registry drives four strictly ordered phases per
//! registration: pre-register, post-register, pre-deregister,
//! post-deregister. Each phase passes through to the resource's
//! [`RegistrationHooks`] capability when the resource opts in; otherwise
//! the phases only record identity. No transition table is enforced here —
//! the registry is responsible for calling the phases in order exactly
//! once each.

use tracing::debug;

use crate::foundation::error::LifecycleResult;
use crate::foundation::value::ObjectName;
use crate::integration::adapter::ManagedObject;
use crate::integration::resource::{RegistrationHooks, RegistryHandle};

impl ManagedObject {
    /// First phase: records `proposed` as this object's identity.
    ///
    /// When the resource implements the registration capability, its own
    /// pre-register hook runs next and the name it returns — which may
    /// differ from the proposed one — becomes the identity instead. A hook
    /// failure propagates to the registry; the proposed name stays
    /// recorded in that case.
    pub fn pre_register(
        &self,
        registry: &RegistryHandle,
        proposed: Option<ObjectName>,
    ) -> LifecycleResult<Option<ObjectName>> {
        debug!(proposed = ?proposed, "pre-register");
        self.set_object_name(proposed.clone());
        let mut assigned = proposed;
        if let Some(hooks) = self.registration_hooks() {
            assigned = hooks.pre_register(registry, assigned.as_ref())?;
            self.set_object_name(assigned.clone());
        }
        Ok(assigned)
    }

    /// Second phase: forwarded to the resource when the capability exists.
    pub fn post_register(&self, registration_done: bool) {
        if let Some(hooks) = self.registration_hooks() {
            hooks.post_register(registration_done);
        }
    }

    /// Third phase: forwarded when present; a hook failure propagates to
    /// the registry uncaught.
    pub fn pre_deregister(&self) -> LifecycleResult<()> {
        match self.registration_hooks() {
            Some(hooks) => hooks.pre_deregister(),
            None => Ok(()),
        }
    }

    /// Final phase: forwarded when present. Best-effort; never fails.
    pub fn post_deregister(&self) {
        if let Some(hooks) = self.registration_hooks() {
            hooks.post_deregister();
        }
    }

    fn registration_hooks(&self) -> Option<&dyn RegistrationHooks> {
        self.resource()
            .and_then(|resource| resource.as_registration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::error::LifecycleError;
    use crate::integration::resource::ManagedResource;
    use parking_lot::Mutex;
    use std::any::Any;
    use std::fmt;
    use std::sync::Arc;

    fn registry() -> RegistryHandle {
        Arc::new(())
    }

    struct PlainResource;

    impl fmt::Display for PlainResource {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("PlainResource")
        }
    }

    impl ManagedResource for PlainResource {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[derive(Default)]
    struct HookedResource {
        phases: Mutex<Vec<&'static str>>,
        rename_to: Option<&'static str>,
        fail_pre_deregister: bool,
    }

    impl fmt::Display for HookedResource {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("HookedResource")
        }
    }

    impl RegistrationHooks for HookedResource {
        fn pre_register(
            &self,
            _registry: &RegistryHandle,
            proposed: Option<&ObjectName>,
        ) -> LifecycleResult<Option<ObjectName>> {
            self.phases.lock().push("pre-register");
            match self.rename_to {
                Some(name) => Ok(Some(ObjectName::new(name))),
                None => Ok(proposed.cloned()),
            }
        }

        fn post_register(&self, _registration_done: bool) {
            self.phases.lock().push("post-register");
        }

        fn pre_deregister(&self) -> LifecycleResult<()> {
            self.phases.lock().push("pre-deregister");
            if self.fail_pre_deregister {
                return Err(LifecycleError::PreDeregister {
                    reason: "still draining".to_string(),
                });
            }
            Ok(())
        }

        fn post_deregister(&self) {
            self.phases.lock().push("post-deregister");
        }
    }

    impl ManagedResource for HookedResource {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_registration(&self) -> Option<&dyn RegistrationHooks> {
            Some(self)
        }
    }

    #[test]
    fn without_the_capability_the_proposed_name_sticks() {
        let object = ManagedObject::new();
        object.attach_resource(Arc::new(PlainResource));

        let assigned = object
            .pre_register(&registry(), Some(ObjectName::new("svc:1")))
            .unwrap();
        assert_eq!(assigned, Some(ObjectName::new("svc:1")));
        assert_eq!(object.object_name(), Some(ObjectName::new("svc:1")));

        // The remaining phases are no-ops that never fail.
        object.post_register(true);
        object.pre_deregister().unwrap();
        object.post_deregister();
    }

    #[test]
    fn unbound_object_still_records_its_identity() {
        let object = ManagedObject::new();
        let assigned = object
            .pre_register(&registry(), Some(ObjectName::new("svc:2")))
            .unwrap();
        assert_eq!(assigned, Some(ObjectName::new("svc:2")));
        object.pre_deregister().unwrap();
    }

    #[test]
    fn the_hook_may_substitute_the_identity() {
        let object = ManagedObject::new();
        let resource = Arc::new(HookedResource {
            rename_to: Some("svc:renamed"),
            ..HookedResource::default()
        });
        object.attach_resource(Arc::clone(&resource));

        let assigned = object
            .pre_register(&registry(), Some(ObjectName::new("svc:1")))
            .unwrap();
        assert_eq!(assigned, Some(ObjectName::new("svc:renamed")));
        assert_eq!(object.object_name(), Some(ObjectName::new("svc:renamed")));
    }

    #[test]
    fn all_four_phases_are_forwarded_in_order() {
        let object = ManagedObject::new();
        let resource = Arc::new(HookedResource::default());
        object.attach_resource(Arc::clone(&resource));

        object
            .pre_register(&registry(), Some(ObjectName::new("svc:1")))
            .unwrap();
        object.post_register(true);
        object.pre_deregister().unwrap();
        object.post_deregister();

        assert_eq!(
            *resource.phases.lock(),
            vec![
                "pre-register",
                "post-register",
                "pre-deregister",
                "post-deregister"
            ]
        );
    }

    #[test]
    fn pre_deregister_failures_propagate() {
        let object = ManagedObject::new();
        let resource = Arc::new(HookedResource {
            fail_pre_deregister: true,
            ..HookedResource::default()
        });
        object.attach_resource(Arc::clone(&resource));

        assert!(matches!(
            object.pre_deregister(),
            Err(LifecycleError::PreDeregister { .. })
        ));
        // Best-effort final phase still runs.
        object.post_deregister();
    }
}
