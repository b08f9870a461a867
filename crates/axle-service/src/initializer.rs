//! Post-construction initializers.

use crate::{Service, ServiceContainer};

/// A hook run on every freshly constructed service instance.
///
/// Initializers are container-wide, not per-service: each one probes the
/// instance's capability set (see the `as_*` methods on [`Service`]) and
/// silently skips instances that lack the capability it wires. They run in
/// registration order, after construction and before the instance is
/// published or returned.
pub trait Initializer: Send + Sync {
    /// Inspects and possibly wires one freshly built instance.
    fn initialize(&self, instance: &mut dyn Service, container: &ServiceContainer);
}

impl<F> Initializer for F
where
    F: Fn(&mut dyn Service, &ServiceContainer) + Send + Sync,
{
    fn initialize(&self, instance: &mut dyn Service, container: &ServiceContainer) {
        self(instance, container)
    }
}
