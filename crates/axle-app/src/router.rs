//! Routing collaborator interface.
//!
//! The core never matches URLs or command lines itself: it hands the request
//! to a [`Router`] and consumes the outcome. A successful match feeds the
//! event's params; no match becomes a domain error on the event.

use axle_event::Params;
use axle_types::Request;
use serde_json::Value;

/// External routing capability.
pub trait Router: Send + Sync {
    /// Attempts to match the request. `None` means no route matched.
    fn route(&self, request: &dyn Request) -> Option<RouteMatch>;
}

/// A successful route match: the parameters it produced, consumed as event
/// params by the routing listener.
#[derive(Debug, Clone, Default)]
pub struct RouteMatch {
    params: Params,
}

impl RouteMatch {
    /// A match with no parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A match carrying the given parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    /// Adds one parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// The matched parameters.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }
}

/// A router with no routes: every request is a no-match.
///
/// The default wiring installs this so an application without a configured
/// router faults cleanly through the error branch instead of panicking.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRouter;

impl Router for NullRouter {
    fn route(&self, _request: &dyn Request) -> Option<RouteMatch> {
        None
    }
}
