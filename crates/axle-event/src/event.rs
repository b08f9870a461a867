//! Event context — the single mutable record a run threads through its stages.
//!
//! One `Event` is built at bootstrap and reused for every stage trigger of the
//! same run, so anything a listener stores on it stays visible to every later
//! stage until explicitly cleared. The well-known fields (`request`,
//! `response`, `error`, propagation state) are strongly typed; everything
//! listeners invent for themselves goes in the ordered [`params`](Event::params)
//! map.

use axle_types::{RequestRef, ResponseRef};
use serde_json::Value;

/// Insertion-ordered parameter map carried by an [`Event`].
pub type Params = serde_json::Map<String, Value>;

/// Mutable context passed to every listener of a trigger.
///
/// # Cross-listener communication
///
/// Mutating this shared state is the *only* channel between listeners; the
/// bus itself performs no I/O and forwards nothing else.
#[derive(Debug, Clone, Default)]
pub struct Event {
    name: String,
    target: Option<String>,
    params: Params,
    request: Option<RequestRef>,
    response: Option<ResponseRef>,
    error: Option<String>,
    propagation_stopped: bool,
}

impl Event {
    /// Creates an event for the given stage name with empty state.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the owning controller's identifier.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Sets the request handle.
    #[must_use]
    pub fn with_request(mut self, request: RequestRef) -> Self {
        self.request = Some(request);
        self
    }

    /// Sets the response handle.
    #[must_use]
    pub fn with_response(mut self, response: ResponseRef) -> Self {
        self.response = Some(response);
        self
    }

    /// Current stage name. The bus stamps this on every trigger.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the stage name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Identifier of the owning controller, if bound.
    ///
    /// An identifier rather than a reference: listeners must not retain the
    /// controller beyond the run, and the shared registry already addresses
    /// owners by identifier strings.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Binds the owning controller's identifier.
    pub fn set_target(&mut self, target: impl Into<String>) {
        self.target = Some(target.into());
    }

    /// The open extension map, in insertion order.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Mutable access to the extension map.
    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }

    /// Looks up a single parameter.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Inserts or replaces a single parameter.
    pub fn set_param(&mut self, key: impl Into<String>, value: Value) {
        self.params.insert(key.into(), value);
    }

    /// The request handle, if bound.
    #[must_use]
    pub fn request(&self) -> Option<&RequestRef> {
        self.request.as_ref()
    }

    /// Binds the request handle.
    pub fn set_request(&mut self, request: RequestRef) {
        self.request = Some(request);
    }

    /// The in-flight response.
    ///
    /// `None` is the sentinel for "no response produced", distinct from a
    /// response with empty content.
    #[must_use]
    pub fn response(&self) -> Option<&ResponseRef> {
        self.response.as_ref()
    }

    /// Adopts a response.
    pub fn set_response(&mut self, response: ResponseRef) {
        self.response = Some(response);
    }

    /// Clears the response back to the sentinel state.
    pub fn clear_response(&mut self) {
        self.response = None;
    }

    /// The domain error code, if a listener flagged one.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Flags a domain error. The lifecycle controller branches on this; the
    /// bus itself does not.
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    /// Clears the domain error.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Whether a listener stopped propagation for the current trigger.
    #[must_use]
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Stops (or with `false`, re-allows) delivery to the remaining listeners
    /// of the current trigger. The bus resets this flag when a new trigger
    /// starts, so stopping propagation never leaks into later stages.
    pub fn stop_propagation(&mut self, flag: bool) {
        self.propagation_stopped = flag;
    }
}
