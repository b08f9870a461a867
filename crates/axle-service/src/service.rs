//! The `Service` trait — container storage plus capability probes.
//!
//! The container stores heterogeneous instances as `Arc<dyn Service>`. The
//! `as_*` methods are capability probes: a service supporting a capability
//! overrides the probe to return itself, everything else inherits the `None`
//! default. Initializers decide whether they apply to a fresh instance by
//! probing: an explicit interface assertion, never reflection.

use crate::ServiceContainer;
use axle_event::{EventBusAware, ListenerAggregate};
use axle_types::{RequestRef, ResponseRef};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a container-held service.
pub type ServiceRef = Arc<dyn Service>;

impl fmt::Debug for dyn Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service").finish_non_exhaustive()
    }
}

/// A value the container can hold, probe, and hand out.
///
/// # Implementing
///
/// The three `Any` plumbing methods are always the same three lines;
/// capability probes are overridden only by services that carry the
/// capability:
///
/// ```
/// use axle_service::Service;
/// use std::any::Any;
/// use std::sync::Arc;
///
/// #[derive(Debug)]
/// struct Clock;
///
/// impl Service for Clock {
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///     fn as_any_mut(&mut self) -> &mut dyn Any {
///         self
///     }
///     fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
///         self
///     }
/// }
/// ```
pub trait Service: Any + Send + Sync {
    /// Borrowed concrete-type downcast hook.
    fn as_any(&self) -> &dyn Any;

    /// Mutable concrete-type downcast hook (used before publication).
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Owned downcast hook backing
    /// [`ServiceContainer::resolve_as`](crate::ServiceContainer::resolve_as).
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    /// Probe: does this instance accept an event bus after construction?
    fn as_bus_aware_mut(&mut self) -> Option<&mut dyn EventBusAware> {
        None
    }

    /// Probe: does this instance accept the container after construction?
    fn as_container_aware_mut(&mut self) -> Option<&mut dyn ContainerAware> {
        None
    }

    /// Probe: can this instance attach a listener group to a bus?
    fn as_listener_aggregate(&self) -> Option<&dyn ListenerAggregate> {
        None
    }

    /// Probe: is this instance a request collaborator?
    fn as_request(self: Arc<Self>) -> Option<RequestRef> {
        None
    }

    /// Probe: is this instance a response collaborator?
    fn as_response(self: Arc<Self>) -> Option<ResponseRef> {
        None
    }
}

/// Capability for services that accept the container after construction.
pub trait ContainerAware {
    /// Installs a handle to the resolving container.
    fn set_container(&mut self, container: ServiceContainer);
}

// The event layer's own types are held by the container in the default
// wiring (a non-shared bus, one shared registry per process), so their
// storage impls live here with the trait.

impl Service for axle_event::EventBus {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl Service for axle_event::SharedRegistry {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axle_event::EventBus;

    #[derive(Debug, Default)]
    struct Bare;

    impl Service for Bare {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
            self
        }
    }

    #[derive(Default)]
    struct BusHolder {
        events: Option<EventBus>,
    }

    impl EventBusAware for BusHolder {
        fn set_event_bus(&mut self, bus: EventBus) {
            self.events = Some(bus);
        }

        fn event_bus(&self) -> Option<&EventBus> {
            self.events.as_ref()
        }
    }

    impl Service for BusHolder {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
            self
        }

        fn as_bus_aware_mut(&mut self) -> Option<&mut dyn EventBusAware> {
            Some(self)
        }
    }

    #[test]
    fn probes_default_to_none() {
        let mut bare = Bare;
        assert!(bare.as_bus_aware_mut().is_none());
        assert!(bare.as_container_aware_mut().is_none());
        assert!(bare.as_listener_aggregate().is_none());
        assert!(Arc::new(Bare).as_request().is_none());
        assert!(Arc::new(Bare).as_response().is_none());
    }

    #[test]
    fn overridden_probe_returns_capability() {
        let mut holder = BusHolder::default();
        let aware = holder.as_bus_aware_mut().unwrap();
        aware.set_event_bus(EventBus::new());
        assert!(holder.events.is_some());
    }

    #[test]
    fn into_any_downcasts_to_concrete() {
        let service: ServiceRef = Arc::new(Bare);
        let any = service.into_any();
        assert!(any.downcast::<Bare>().is_ok());
    }

    #[test]
    fn event_bus_is_storable() {
        let service: ServiceRef = Arc::new(EventBus::new());
        assert!(service.into_any().downcast::<EventBus>().is_ok());
    }
}
