//! Bus-awareness capability.

use crate::EventBus;

/// Capability for services that accept an event bus after construction.
///
/// Container initializers probe for this capability on every freshly built
/// instance: an instance that already carries a bus gets the shared registry
/// wired into it, one that does not gets a bus installed. Instances without
/// the capability are skipped silently.
pub trait EventBusAware {
    /// Installs the bus this instance should trigger through.
    fn set_event_bus(&mut self, bus: EventBus);

    /// The installed bus, if one is present.
    fn event_bus(&self) -> Option<&EventBus>;
}
