//! Listener reaction — what a listener hands back to the bus.

use axle_types::ResponseRef;
use serde_json::Value;

/// Result value produced by a single listener invocation.
///
/// Response-shaped results get their own variant so a short-circuit
/// predicate can detect "a listener produced the final response" without
/// inspecting arbitrary values.
#[derive(Debug, Clone)]
pub enum Reaction {
    /// Nothing to report; the trigger proceeds.
    Continue,

    /// A free-form result value, recorded but not interpreted by the bus.
    Value(Value),

    /// A response. The lifecycle controller's short-circuit predicate stops
    /// the remaining pipeline on this.
    Response(ResponseRef),
}

impl Reaction {
    /// Returns `true` if this is a `Continue` variant.
    #[must_use]
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    /// Returns `true` if this is a `Value` variant.
    #[must_use]
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Returns `true` if this is a `Response` variant.
    #[must_use]
    pub fn is_response(&self) -> bool {
        matches!(self, Self::Response(_))
    }

    /// The carried value, if any.
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The carried response, if any.
    #[must_use]
    pub fn as_response(&self) -> Option<&ResponseRef> {
        match self {
            Self::Response(response) => Some(response),
            _ => None,
        }
    }
}
