//! Lazy dependency container for axle.
//!
//! This crate provides the service layer of the workspace:
//!
//! ```text
//! axle-types    : ErrorCode, Request, Response
//! axle-event    : Event, Listener, EventBus, SharedRegistry
//! axle-service  : ServiceContainer, Service, Initializer   ◄── HERE
//! axle-app      : Application, Stage, RouteListener
//! ```
//!
//! # Overview
//!
//! A [`ServiceContainer`] maps names to [`Definition`]s (invokables with
//! no-argument constructors, factories that may resolve other services,
//! and aliases) and constructs instances on first use.
//! Services are shared by default (one cached instance); a non-shared
//! service is built fresh per resolve. Every fresh instance passes through
//! the container-wide [`Initializer`] chain, in registration order, before
//! anyone sees it.
//!
//! # Capability probes
//!
//! Instances are stored as [`Service`] trait objects. An initializer never
//! knows concrete types; it asks each instance for a capability
//! (`as_bus_aware_mut`, `as_container_aware_mut`, ...) and skips instances
//! that answer `None`. Wiring is therefore uniform: any service that wants
//! an event bus gets one, whoever built it.
//!
//! # Example
//!
//! ```
//! use axle_service::{ContainerConfig, Service, ServiceContainer};
//! use std::any::Any;
//! use std::sync::Arc;
//!
//! #[derive(Debug, Default)]
//! struct Greeter {
//!     greeting: String,
//! }
//!
//! impl Service for Greeter {
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//!     fn as_any_mut(&mut self) -> &mut dyn Any {
//!         self
//!     }
//!     fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
//!         self
//!     }
//! }
//!
//! let container = ServiceContainer::with_config(
//!     ContainerConfig::new().invokable("Greeter", || Greeter {
//!         greeting: "hello".into(),
//!     }),
//! );
//!
//! let greeter = container.resolve_as::<Greeter>("Greeter").unwrap();
//! assert_eq!(greeter.greeting, "hello");
//! ```

mod container;
mod definition;
mod error;
mod initializer;
mod service;

pub use container::ServiceContainer;
pub use definition::{ContainerConfig, Definition, FactoryFn, InvokableFn};
pub use error::ServiceError;
pub use initializer::Initializer;
pub use service::{ContainerAware, Service, ServiceRef};
