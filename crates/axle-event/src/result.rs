//! Trigger result — the ordered outcome of one event delivery.

use crate::{ListenerError, Reaction};
use axle_types::ResponseRef;

/// Per-listener outcome recorded by a trigger.
pub type ListenerResult = Result<Reaction, ListenerError>;

/// Ordered collection of per-listener results from a single trigger.
///
/// `stopped()` reports whether the bus halted before exhausting the listener
/// chain, either because a listener stopped propagation or because the
/// caller's short-circuit predicate matched.
#[derive(Debug, Default)]
pub struct TriggerResult {
    results: Vec<ListenerResult>,
    stopped: bool,
}

impl TriggerResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, result: ListenerResult) {
        self.results.push(result);
    }

    pub(crate) fn mark_stopped(&mut self) {
        self.stopped = true;
    }

    /// Per-listener results, in invocation order.
    #[must_use]
    pub fn results(&self) -> &[ListenerResult] {
        &self.results
    }

    /// Whether the trigger halted before running every listener.
    #[must_use]
    pub fn stopped(&self) -> bool {
        self.stopped
    }

    /// The most recent result, if any listener ran.
    #[must_use]
    pub fn last(&self) -> Option<&ListenerResult> {
        self.results.last()
    }

    /// The most recent *successful* reaction. `None` when no listener ran or
    /// the final listener failed.
    #[must_use]
    pub fn last_reaction(&self) -> Option<&Reaction> {
        match self.results.last() {
            Some(Ok(reaction)) => Some(reaction),
            _ => None,
        }
    }

    /// The response carried by the most recent reaction, if it was
    /// response-shaped.
    #[must_use]
    pub fn last_response(&self) -> Option<&ResponseRef> {
        self.last_reaction().and_then(Reaction::as_response)
    }

    /// Number of listeners that ran.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns `true` if no listener ran.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
