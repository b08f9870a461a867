//! Routing listener — the default listener attached to the `route` stage.

use crate::{Router, Stage};
use axle_event::{
    Event, EventBus, ListenerAggregate, ListenerError, ListenerToken, Reaction, DEFAULT_PRIORITY,
};
use axle_service::Service;
use parking_lot::Mutex;
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;

/// Error code flagged on the event when the router reports no match.
pub const ERROR_NO_MATCH: &str = "router-no-match";

/// Listener aggregate that drives the [`Router`] collaborator.
///
/// On a `route` trigger it matches the bound request: a match merges its
/// parameters into the event and is returned as the listener's result; no
/// match sets [`ERROR_NO_MATCH`] on the event, which the application's
/// short-circuit predicate picks up to branch past dispatch.
pub struct RouteListener {
    router: Arc<dyn Router>,
    tokens: Mutex<Vec<ListenerToken>>,
}

impl RouteListener {
    /// Creates a routing listener over the given router.
    #[must_use]
    pub fn new(router: Arc<dyn Router>) -> Self {
        Self {
            router,
            tokens: Mutex::new(Vec::new()),
        }
    }
}

impl ListenerAggregate for RouteListener {
    fn attach(&self, bus: &EventBus) {
        let router = Arc::clone(&self.router);
        let on_route = move |event: &mut Event| -> Result<Reaction, ListenerError> {
            let Some(request) = event.request().cloned() else {
                tracing::warn!("route triggered with no request bound");
                event.set_error(ERROR_NO_MATCH);
                return Ok(Reaction::Continue);
            };
            match router.route(request.as_ref()) {
                Some(matched) => {
                    for (key, value) in matched.params() {
                        event.set_param(key.clone(), value.clone());
                    }
                    Ok(Reaction::Value(Value::Object(matched.params().clone())))
                }
                None => {
                    tracing::debug!("no route matched");
                    event.set_error(ERROR_NO_MATCH);
                    Ok(Reaction::Continue)
                }
            }
        };
        let token = bus.attach(Stage::Route.as_str(), on_route, DEFAULT_PRIORITY);
        self.tokens.lock().push(token);
    }

    fn detach(&self, bus: &EventBus) {
        for token in self.tokens.lock().drain(..) {
            bus.detach(&token);
        }
    }
}

impl Service for RouteListener {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn as_listener_aggregate(&self) -> Option<&dyn ListenerAggregate> {
        Some(self)
    }
}
