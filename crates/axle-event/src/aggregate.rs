//! Listener aggregates — fixed groups of listeners attached and detached as
//! a unit.
//!
//! An aggregate owns its attach logic: it registers whatever set of
//! (event, priority, listener) tuples it stands for and records the tokens,
//! so a later detach removes exactly that group and nothing else. The
//! aggregate value itself is the detach token: callers hold onto it and
//! hand it back to [`EventBus::detach_aggregate`](crate::EventBus::detach_aggregate).

use crate::EventBus;

/// A group of listeners that attach and detach together.
///
/// Implementors record the tokens their `attach` minted (typically in an
/// interior `Mutex<Vec<ListenerToken>>`, since aggregates are shared as
/// services) and drain them in `detach`. Detaching twice must be a no-op.
pub trait ListenerAggregate: Send + Sync {
    /// Registers this aggregate's listeners on the bus.
    fn attach(&self, bus: &EventBus);

    /// Removes exactly the listeners a prior `attach` registered.
    fn detach(&self, bus: &EventBus);
}
