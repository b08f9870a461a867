//! Default service wiring.
//!
//! One call to [`default_container_config`] yields the registrations every
//! application starts from: the process-wide shared registry, a non-shared
//! event bus seeded with it, console request/response collaborators, the
//! routing listener, and the two capability-probing initializers. Hosts
//! override any entry by registering the same name again.

use crate::console::{ConsoleRequest, ConsoleResponse};
use crate::router::NullRouter;
use crate::RouteListener;
use axle_event::{EventBus, SharedRegistry};
use axle_service::{ContainerConfig, Initializer, Service, ServiceContainer};
use std::sync::Arc;

/// Well-known service names used by the application.
pub mod names {
    /// The process-wide shared listener registry (shared).
    pub const SHARED_REGISTRY: &str = "SharedRegistry";
    /// The event bus (non-shared: every resolve builds a fresh bus wired to
    /// the one shared registry).
    pub const EVENT_BUS: &str = "EventBus";
    /// The request collaborator.
    pub const REQUEST: &str = "Request";
    /// The response collaborator.
    pub const RESPONSE: &str = "Response";
    /// The routing listener aggregate.
    pub const ROUTE_LISTENER: &str = "RouteListener";
}

/// Wires a bus (or its shared registry) into any bus-aware instance.
///
/// - Instance already carries a bus: install the process-wide shared
///   registry into that bus.
/// - Instance accepts a bus but has none: resolve a fresh one for it.
/// - Instance without the capability: skipped.
pub struct EventBusAwareInitializer;

impl Initializer for EventBusAwareInitializer {
    fn initialize(&self, instance: &mut dyn Service, container: &ServiceContainer) {
        let Some(aware) = instance.as_bus_aware_mut() else {
            return;
        };
        if let Some(bus) = aware.event_bus() {
            if let Ok(shared) = container.resolve_as::<SharedRegistry>(names::SHARED_REGISTRY) {
                bus.set_shared(shared);
            }
        } else if let Ok(bus) = container.resolve_as::<EventBus>(names::EVENT_BUS) {
            aware.set_event_bus((*bus).clone());
        }
    }
}

/// Hands a container handle to any container-aware instance.
pub struct ContainerAwareInitializer;

impl Initializer for ContainerAwareInitializer {
    fn initialize(&self, instance: &mut dyn Service, container: &ServiceContainer) {
        if let Some(aware) = instance.as_container_aware_mut() {
            aware.set_container(container.clone());
        }
    }
}

/// The default registration set for an application container.
#[must_use]
pub fn default_container_config() -> ContainerConfig {
    ContainerConfig::new()
        .invokable(names::SHARED_REGISTRY, SharedRegistry::new)
        .factory(names::EVENT_BUS, |container: &ServiceContainer| {
            let shared = container.resolve_as::<SharedRegistry>(names::SHARED_REGISTRY)?;
            let bus = EventBus::new();
            bus.set_shared(shared);
            Ok(bus)
        })
        .shared(names::EVENT_BUS, false)
        .invokable(names::REQUEST, ConsoleRequest::new)
        .invokable(names::RESPONSE, ConsoleResponse::new)
        .factory(names::ROUTE_LISTENER, |_: &ServiceContainer| {
            Ok(RouteListener::new(Arc::new(NullRouter)))
        })
        .initializer(EventBusAwareInitializer)
        .initializer(ContainerAwareInitializer)
}
