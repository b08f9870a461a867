//! Error types for the event layer.

use axle_types::ErrorCode;
use thiserror::Error;

/// Failure reported by a single listener.
///
/// The two variants encode the two delivery policies: a `Failed` listener is
/// recorded as that listener's result and its siblings still run (best-effort
/// stage delivery); an `Abort` is re-raised out of the trigger and no further
/// listeners run for that event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListenerError {
    /// Recoverable failure, swallowed per-listener by the bus.
    #[error("listener failed: {0}")]
    Failed(String),

    /// Fatal failure, propagated to the caller of `trigger`.
    #[error("listener aborted: {0}")]
    Abort(String),
}

impl ListenerError {
    /// Recoverable failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Fatal failure, re-raised out of the whole trigger.
    pub fn abort(message: impl Into<String>) -> Self {
        Self::Abort(message.into())
    }

    /// Returns `true` if this failure aborts the whole trigger.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Abort(_))
    }
}

impl ErrorCode for ListenerError {
    fn code(&self) -> &'static str {
        match self {
            Self::Failed(_) => "EVENT_LISTENER_FAILED",
            Self::Abort(_) => "EVENT_LISTENER_ABORT",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Errors surfaced by [`EventBus::trigger`](crate::EventBus::trigger).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// A listener re-raised; the trigger was abandoned mid-chain.
    #[error("trigger '{event}' aborted: {reason}")]
    Aborted {
        /// Event name being triggered.
        event: String,
        /// The aborting listener's message.
        reason: String,
    },
}

impl ErrorCode for EventError {
    fn code(&self) -> &'static str {
        match self {
            Self::Aborted { .. } => "EVENT_TRIGGER_ABORTED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
