//! Ordered, short-circuiting event dispatch for axle.
//!
//! This crate provides the event layer of the workspace:
//!
//! ```text
//! axle-types    : ErrorCode, Request, Response
//! axle-event    : Event, Listener, EventBus, SharedRegistry   ◄── HERE
//! axle-service  : ServiceContainer, Service, Initializer
//! axle-app      : Application, Stage, RouteListener
//! ```
//!
//! # Overview
//!
//! An [`EventBus`] stores [`Listener`] registrations per event name and
//! invokes them in priority order when that name is triggered. A trigger
//! threads one mutable [`Event`] through the chain (the only channel
//! between listeners) and can stop early in two ways:
//!
//! - a listener stops propagation on the event;
//! - the caller's short-circuit predicate matches a listener's [`Reaction`]
//!   (see [`EventBus::trigger_until`]).
//!
//! A [`SharedRegistry`] holds registrations keyed by identifier strings;
//! any bus declaring a matching identifier merges those listeners into its
//! own chain. [`ListenerAggregate`]s attach and detach fixed listener
//! groups as a unit.
//!
//! # Ordering
//!
//! Higher priority fires first, regardless of attach order. Equal
//! priorities fire in attach order (a stable insertion, not a
//! comparison-based reshuffle), with a bus's own listeners ahead of shared
//! ones and shared identifiers in declaration order.
//!
//! # Failure policy
//!
//! Stage delivery is best-effort: a listener returning
//! [`ListenerError::Failed`] has the failure recorded as its result and its
//! siblings still run. Only [`ListenerError::Abort`] is re-raised out of
//! [`EventBus::trigger`], abandoning the remaining chain.
//!
//! # Example
//!
//! ```
//! use axle_event::{Event, EventBus, Listener, ListenerError, Reaction};
//! use serde_json::json;
//!
//! let bus = EventBus::new();
//! bus.attach(
//!     "route",
//!     |event: &mut Event| -> Result<Reaction, ListenerError> {
//!         event.set_param("controller", json!("index"));
//!         Ok(Reaction::Continue)
//!     },
//!     0,
//! );
//!
//! let mut event = Event::new("route");
//! let result = bus.trigger("route", &mut event).unwrap();
//! assert_eq!(result.len(), 1);
//! assert_eq!(event.param("controller"), Some(&json!("index")));
//! ```

mod aggregate;
mod aware;
mod bus;
mod error;
mod event;
mod listener;
mod reaction;
mod result;
mod shared;

pub use aggregate::ListenerAggregate;
pub use aware::EventBusAware;
pub use bus::{EventBus, ListenerToken};
pub use error::{EventError, ListenerError};
pub use event::{Event, Params};
pub use listener::{Listener, DEFAULT_PRIORITY};
pub use reaction::Reaction;
pub use result::{ListenerResult, TriggerResult};
pub use shared::SharedRegistry;

/// Test utilities for the event layer.
#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    pub use crate::listener::testing::{MockListener, TextResponse};
}
