//! Staged application lifecycle for axle.
//!
//! This crate is the top of the workspace:
//!
//! ```text
//! axle-types    : ErrorCode, Request, Response
//! axle-event    : Event, Listener, EventBus, SharedRegistry
//! axle-service  : ServiceContainer, Service, Initializer
//! axle-app      : Application, Stage, RouteListener   ◄── HERE
//! ```
//!
//! # Overview
//!
//! An [`Application`] is a small state machine over one event bus and one
//! event per run. The service container builds and wires everything: the
//! bus (non-shared, seeded with the process-wide shared registry), the
//! request/response collaborators, the routing listener, and whatever
//! listener aggregates the configuration names. `run()` then drives the
//! fixed trigger sequence:
//!
//! ```text
//! bootstrap ──► route ──► dispatch ──► render ──► finish
//!                 │           │                      ▲
//!                 │ response  │ response             │
//!                 ├───────────┴──────────────────────┤   (short-circuit)
//!                 │ error                            │
//!                 └────────────► render ─────────────┘   (fault branch)
//! ```
//!
//! Routing and dispatch failures are data on the event, never raised
//! failures: the controller itself only fails on infrastructure errors
//! (service resolution, a listener re-raising) or lifecycle misuse.
//!
//! # Example
//!
//! ```
//! use axle_app::{AppConfig, Application, RouteListener, RouteMatch, Router, RunOutcome, Stage};
//! use axle_service::ContainerConfig;
//! use axle_types::Request;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! struct StatusRouter;
//!
//! impl Router for StatusRouter {
//!     fn route(&self, _request: &dyn Request) -> Option<RouteMatch> {
//!         Some(RouteMatch::new().param("action", json!("status")))
//!     }
//! }
//!
//! let overrides = ContainerConfig::new().factory("RouteListener", |_| {
//!     Ok(RouteListener::new(Arc::new(StatusRouter)))
//! });
//! let mut app = Application::init_with(AppConfig::default(), overrides).unwrap();
//!
//! let outcome = app.run().unwrap();
//! assert_eq!(outcome, RunOutcome::Completed);
//! assert_eq!(app.event().param("action"), Some(&json!("status")));
//! ```

mod app;
mod config;
mod console;
mod error;
mod route_listener;
mod router;
mod services;
mod stage;

pub use app::{AppState, Application, RunOutcome, APPLICATION_IDENTIFIER};
pub use config::{AppConfig, CONFIG_SERVICE};
pub use console::{ConsoleRequest, ConsoleResponse};
pub use error::AppError;
pub use route_listener::{RouteListener, ERROR_NO_MATCH};
pub use router::{NullRouter, RouteMatch, Router};
pub use services::{
    default_container_config, names, ContainerAwareInitializer, EventBusAwareInitializer,
};
pub use stage::Stage;
