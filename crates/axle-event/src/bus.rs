//! Event bus — ordered, short-circuiting listener dispatch.
//!
//! The bus is a cheap-`Clone` handle over interior-locked state, so one bus
//! can be held by its owning controller, installed into bus-aware services,
//! and read concurrently once registration settles. Listener registrations
//! are snapshotted at the start of each trigger: attaching or detaching from
//! inside a listener is allowed and takes effect from the next trigger.

use crate::shared::SharedRegistry;
use crate::{Event, EventError, Listener, ListenerAggregate, Reaction, TriggerResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A single priority-ordered registration.
#[derive(Clone)]
pub(crate) struct Registration {
    pub(crate) id: u64,
    pub(crate) priority: i32,
    pub(crate) listener: Arc<dyn Listener>,
}

/// Inserts `reg` keeping the list ordered by priority descending, with
/// equal priorities in registration order (stable FIFO).
pub(crate) fn insert_ordered(list: &mut Vec<Registration>, reg: Registration) {
    let pos = list
        .iter()
        .position(|r| r.priority < reg.priority)
        .unwrap_or(list.len());
    list.insert(pos, reg);
}

/// Detach token returned by [`EventBus::attach`] and
/// [`SharedRegistry::attach`](crate::SharedRegistry::attach).
///
/// Detaching with a token removes exactly the registration that produced it;
/// a second detach with the same token is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerToken {
    pub(crate) event: String,
    pub(crate) id: u64,
    /// Set for shared-registry registrations, `None` for bus-local ones.
    pub(crate) identifier: Option<String>,
}

impl ListenerToken {
    /// Event name this token's listener was attached under.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Shared-registry identifier, if this token came from one.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}

#[derive(Default)]
struct BusInner {
    listeners: RwLock<HashMap<String, Vec<Registration>>>,
    identifiers: RwLock<Vec<String>>,
    shared: RwLock<Option<Arc<SharedRegistry>>>,
    counter: AtomicU64,
}

/// Priority-ordered, short-circuiting event dispatcher.
///
/// Listeners registered on the bus itself merge with [`SharedRegistry`]
/// listeners registered under any of the bus's declared identifiers. Within
/// one trigger the union is ordered by priority descending; equal priorities
/// preserve attach order, with the bus's own listeners ahead of shared ones
/// and shared identifiers in declaration order.
///
/// # Concurrency
///
/// All methods take `&self`; registration state lives behind `RwLock`s.
/// Triggers are synchronous: each listener call completes before the next
/// begins, and the bus performs no I/O of its own.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("identifiers", &*self.inner.identifiers.read())
            .field("listeners", &self.len())
            .finish()
    }
}

impl EventBus {
    /// Creates a bus with no listeners, identifiers, or shared registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the declared identifier set.
    ///
    /// Identifiers select which shared-registry listeners fire for this
    /// bus's triggers; an owner typically declares its type name plus any
    /// configured alias.
    pub fn set_identifiers(&self, identifiers: Vec<String>) {
        *self.inner.identifiers.write() = identifiers;
    }

    /// The declared identifier set.
    #[must_use]
    pub fn identifiers(&self) -> Vec<String> {
        self.inner.identifiers.read().clone()
    }

    /// Installs the shared registry consulted on every trigger.
    pub fn set_shared(&self, shared: Arc<SharedRegistry>) {
        *self.inner.shared.write() = Some(shared);
    }

    /// The installed shared registry, if any.
    #[must_use]
    pub fn shared(&self) -> Option<Arc<SharedRegistry>> {
        self.inner.shared.read().clone()
    }

    /// Registers a listener for `event` at the given priority and returns
    /// its detach token.
    pub fn attach<L>(&self, event: &str, listener: L, priority: i32) -> ListenerToken
    where
        L: Listener + 'static,
    {
        let id = self.inner.counter.fetch_add(1, Ordering::Relaxed);
        let reg = Registration {
            id,
            priority,
            listener: Arc::new(listener),
        };
        let mut listeners = self.inner.listeners.write();
        insert_ordered(listeners.entry(event.to_string()).or_default(), reg);
        ListenerToken {
            event: event.to_string(),
            id,
            identifier: None,
        }
    }

    /// Removes exactly the registration behind `token`.
    ///
    /// Returns `true` if something was removed; a second call with the same
    /// token is a no-op returning `false`. Tokens minted by a shared
    /// registry are forwarded to the installed one.
    pub fn detach(&self, token: &ListenerToken) -> bool {
        if token.identifier.is_some() {
            return match self.shared() {
                Some(shared) => shared.detach(token),
                None => false,
            };
        }
        let mut listeners = self.inner.listeners.write();
        let Some(regs) = listeners.get_mut(&token.event) else {
            return false;
        };
        let before = regs.len();
        regs.retain(|r| r.id != token.id);
        let removed = regs.len() < before;
        if regs.is_empty() {
            listeners.remove(&token.event);
        }
        removed
    }

    /// Delegates to the aggregate's own attach logic. The aggregate itself
    /// is the detach token; pass it back to [`detach_aggregate`](Self::detach_aggregate).
    pub fn attach_aggregate(&self, aggregate: &dyn ListenerAggregate) {
        aggregate.attach(self);
    }

    /// Removes exactly the registrations a prior [`attach_aggregate`](Self::attach_aggregate)
    /// added for this aggregate.
    pub fn detach_aggregate(&self, aggregate: &dyn ListenerAggregate) {
        aggregate.detach(self);
    }

    /// Drops every bus-local listener for `event`.
    pub fn clear_listeners(&self, event: &str) {
        self.inner.listeners.write().remove(event);
    }

    /// Total number of bus-local registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.listeners.read().values().map(Vec::len).sum()
    }

    /// Returns `true` if no bus-local listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Triggers `event` for every matching listener, in order, with no
    /// short-circuit predicate.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Aborted`] if a listener fails fatally; no
    /// further listeners run for that trigger.
    pub fn trigger(&self, name: &str, event: &mut Event) -> Result<TriggerResult, EventError> {
        self.dispatch(name, event, None)
    }

    /// Triggers `event`, stopping early once `until` returns `true` for a
    /// listener's reaction.
    ///
    /// The predicate sees the event alongside the reaction so callers can
    /// also halt on event state (e.g. an error flagged by a listener). It is
    /// consulted after each successful listener call, after the propagation
    /// flag; recorded failures never short-circuit.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Aborted`] if a listener fails fatally.
    pub fn trigger_until<P>(
        &self,
        name: &str,
        event: &mut Event,
        until: P,
    ) -> Result<TriggerResult, EventError>
    where
        P: Fn(&Event, &Reaction) -> bool,
    {
        self.dispatch(name, event, Some(&until))
    }

    fn dispatch(
        &self,
        name: &str,
        event: &mut Event,
        until: Option<&dyn Fn(&Event, &Reaction) -> bool>,
    ) -> Result<TriggerResult, EventError> {
        event.set_name(name);
        event.stop_propagation(false);

        let chain = self.registrations_for(name);
        tracing::trace!(event = name, listeners = chain.len(), "trigger");

        let mut result = TriggerResult::new();
        for reg in chain {
            match reg.listener.invoke(event) {
                Ok(reaction) => {
                    let halted = event.propagation_stopped();
                    let matched = !halted && until.is_some_and(|p| p(event, &reaction));
                    result.record(Ok(reaction));
                    if halted || matched {
                        result.mark_stopped();
                        break;
                    }
                }
                Err(err) if err.is_fatal() => {
                    return Err(EventError::Aborted {
                        event: name.to_string(),
                        reason: err.to_string(),
                    });
                }
                Err(err) => {
                    tracing::warn!(event = name, error = %err, "listener failed, continuing");
                    result.record(Err(err));
                }
            }
        }
        Ok(result)
    }

    /// Snapshot of the merged, ordered listener chain for one trigger.
    fn registrations_for(&self, name: &str) -> Vec<Registration> {
        let mut merged: Vec<Registration> = self
            .inner
            .listeners
            .read()
            .get(name)
            .cloned()
            .unwrap_or_default();

        if let Some(shared) = self.inner.shared.read().as_ref() {
            let identifiers = self.inner.identifiers.read();
            merged.extend(shared.registrations_for(&identifiers, name));
        }

        // Stable: equal priorities keep own-before-shared concat order.
        merged.sort_by(|a, b| b.priority.cmp(&a.priority));
        merged
    }
}
