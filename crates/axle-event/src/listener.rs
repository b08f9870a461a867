//! Listener trait and testing utilities.

use crate::{Event, ListenerError, Reaction};

/// Priority assigned when [`EventBus::attach`](crate::EventBus::attach) is
/// given no explicit one. Higher priorities fire earlier; equal priorities
/// fire in attach order.
pub const DEFAULT_PRIORITY: i32 = 0;

/// A handler invoked with the current event context when its event name is
/// triggered.
///
/// # Thread Safety
///
/// Listeners must be `Send + Sync`: registrations may be read concurrently
/// once attached, even though each trigger invokes synchronously.
///
/// # Returns
///
/// - `Ok(Reaction)` — recorded as this listener's result; `Response` feeds
///   short-circuit predicates.
/// - `Err(ListenerError::Failed)` — recorded, siblings still run.
/// - `Err(ListenerError::Abort)` — re-raised; the trigger stops.
pub trait Listener: Send + Sync {
    /// Handles one trigger of the event this listener is attached to.
    fn invoke(&self, event: &mut Event) -> Result<Reaction, ListenerError>;
}

impl<F> Listener for F
where
    F: Fn(&mut Event) -> Result<Reaction, ListenerError> + Send + Sync,
{
    fn invoke(&self, event: &mut Event) -> Result<Reaction, ListenerError> {
        self(event)
    }
}

/// Test utilities for the event layer.
#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    use super::*;
    use axle_types::{Response, ResponseRef};
    use parking_lot::Mutex;
    use std::any::Any;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// A scripted listener for tests.
    ///
    /// Returns a fixed outcome on every `invoke()` call and tracks how many
    /// times it ran via `call_count`.
    pub struct MockListener {
        /// The outcome to produce on every invoke() call.
        pub outcome_fn: Box<dyn Fn(&mut Event) -> Result<Reaction, ListenerError> + Send + Sync>,
        /// Number of times invoke() has been called.
        pub call_count: Arc<AtomicUsize>,
    }

    impl MockListener {
        fn scripted(
            outcome_fn: impl Fn(&mut Event) -> Result<Reaction, ListenerError> + Send + Sync + 'static,
        ) -> Self {
            Self {
                outcome_fn: Box::new(outcome_fn),
                call_count: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Returns `Reaction::Continue` on every call.
        pub fn pass_through() -> Self {
            Self::scripted(|_| Ok(Reaction::Continue))
        }

        /// Mutates the event, then continues.
        pub fn modifier(modify: impl Fn(&mut Event) + Send + Sync + 'static) -> Self {
            Self::scripted(move |event| {
                modify(event);
                Ok(Reaction::Continue)
            })
        }

        /// Returns the given value on every call.
        pub fn valued(value: serde_json::Value) -> Self {
            Self::scripted(move |_| Ok(Reaction::Value(value.clone())))
        }

        /// Returns the given response on every call.
        pub fn responder(response: ResponseRef) -> Self {
            Self::scripted(move |_| Ok(Reaction::Response(Arc::clone(&response))))
        }

        /// Fails recoverably on every call.
        pub fn failing(message: &str) -> Self {
            let message = message.to_string();
            Self::scripted(move |_| Err(ListenerError::failed(message.clone())))
        }

        /// Fails fatally on every call.
        pub fn aborting(message: &str) -> Self {
            let message = message.to_string();
            Self::scripted(move |_| Err(ListenerError::abort(message.clone())))
        }

        /// Number of times this listener has been invoked.
        pub fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    impl Listener for MockListener {
        fn invoke(&self, event: &mut Event) -> Result<Reaction, ListenerError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            (self.outcome_fn)(event)
        }
    }

    /// Minimal in-memory response for tests.
    #[derive(Debug, Default)]
    pub struct TextResponse {
        body: Mutex<String>,
    }

    impl TextResponse {
        /// Creates a response with the given body.
        #[must_use]
        pub fn new(body: &str) -> Self {
            Self {
                body: Mutex::new(body.to_string()),
            }
        }

        /// Creates a response ready to travel through an event.
        #[must_use]
        pub fn shared(body: &str) -> ResponseRef {
            Arc::new(Self::new(body))
        }
    }

    impl Response for TextResponse {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn content(&self) -> String {
            self.body.lock().clone()
        }

        fn set_content(&self, content: String) {
            *self.body.lock() = content;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{MockListener, TextResponse};
    use super::*;
    use serde_json::json;

    #[test]
    fn closure_is_a_listener() {
        let listener = |event: &mut Event| -> Result<Reaction, ListenerError> {
            event.set_param("seen", json!(true));
            Ok(Reaction::Continue)
        };
        let mut event = Event::new("bootstrap");
        let reaction = listener.invoke(&mut event).unwrap();
        assert!(reaction.is_continue());
        assert_eq!(event.param("seen"), Some(&json!(true)));
    }

    #[test]
    fn mock_pass_through_counts() {
        let mock = MockListener::pass_through();
        let mut event = Event::new("route");
        mock.invoke(&mut event).unwrap();
        mock.invoke(&mut event).unwrap();
        assert_eq!(mock.calls(), 2);
    }

    #[test]
    fn mock_valued() {
        let mock = MockListener::valued(json!("match"));
        let mut event = Event::new("route");
        let reaction = mock.invoke(&mut event).unwrap();
        assert_eq!(reaction.as_value(), Some(&json!("match")));
    }

    #[test]
    fn mock_responder_is_response_shaped() {
        let mock = MockListener::responder(TextResponse::shared("done"));
        let mut event = Event::new("dispatch");
        assert!(mock.invoke(&mut event).unwrap().is_response());
    }

    #[test]
    fn mock_failures() {
        let mut event = Event::new("route");
        assert!(!MockListener::failing("x")
            .invoke(&mut event)
            .unwrap_err()
            .is_fatal());
        assert!(MockListener::aborting("x")
            .invoke(&mut event)
            .unwrap_err()
            .is_fatal());
    }

    #[test]
    fn default_priority_is_zero() {
        assert_eq!(DEFAULT_PRIORITY, 0);
    }
}
