//! Shared listener registry — cross-bus registrations keyed by identifier.
//!
//! A listener attached here under identifier `"Application"` fires for any
//! bus that declares `"Application"` among its identifiers, merged with that
//! bus's own listeners before ordering. The registry is constructed once per
//! process and injected into each bus as an `Arc`, never reached through
//! ambient global state.

use crate::bus::{insert_ordered, ListenerToken, Registration};
use crate::Listener;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifier-keyed listener store shared between buses.
///
/// # Concurrency
///
/// Methods take `&self`; state lives behind an `RwLock` so registration can
/// be shared across owners while triggers read concurrently.
#[derive(Default)]
pub struct SharedRegistry {
    /// identifier → event name → ordered registrations.
    listeners: RwLock<HashMap<String, HashMap<String, Vec<Registration>>>>,
    counter: AtomicU64,
}

impl fmt::Debug for SharedRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRegistry")
            .field("identifiers", &self.listeners.read().len())
            .finish()
    }
}

impl SharedRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for `event` on every bus declaring `identifier`.
    ///
    /// Returns a detach token scoped to this registry.
    pub fn attach<L>(
        &self,
        identifier: &str,
        event: &str,
        listener: L,
        priority: i32,
    ) -> ListenerToken
    where
        L: Listener + 'static,
    {
        let id = self.counter.fetch_add(1, Ordering::Relaxed);
        let reg = Registration {
            id,
            priority,
            listener: Arc::new(listener),
        };
        let mut listeners = self.listeners.write();
        let events = listeners.entry(identifier.to_string()).or_default();
        insert_ordered(events.entry(event.to_string()).or_default(), reg);
        ListenerToken {
            event: event.to_string(),
            id,
            identifier: Some(identifier.to_string()),
        }
    }

    /// Removes exactly the registration behind `token`. Idempotent.
    pub fn detach(&self, token: &ListenerToken) -> bool {
        let Some(identifier) = token.identifier.as_deref() else {
            return false;
        };
        let mut listeners = self.listeners.write();
        let Some(events) = listeners.get_mut(identifier) else {
            return false;
        };
        let Some(regs) = events.get_mut(&token.event) else {
            return false;
        };
        let before = regs.len();
        regs.retain(|r| r.id != token.id);
        let removed = regs.len() < before;
        if regs.is_empty() {
            events.remove(&token.event);
        }
        if events.is_empty() {
            listeners.remove(identifier);
        }
        removed
    }

    /// Drops every registration under `identifier`.
    pub fn clear_listeners(&self, identifier: &str) {
        self.listeners.write().remove(identifier);
    }

    /// Total number of registrations across all identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registrations for `event` under every identifier in `identifiers`,
    /// in identifier order, each group already priority-ordered.
    pub(crate) fn registrations_for(
        &self,
        identifiers: &[String],
        event: &str,
    ) -> Vec<Registration> {
        let listeners = self.listeners.read();
        identifiers
            .iter()
            .filter_map(|identifier| listeners.get(identifier))
            .filter_map(|events| events.get(event))
            .flat_map(|regs| regs.iter().cloned())
            .collect()
    }
}
