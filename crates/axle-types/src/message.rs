//! Opaque transport collaborators.
//!
//! The lifecycle core reads a [`Request`] and produces a [`Response`], but it
//! never looks inside either: selecting and constructing the concrete variant
//! (console, networked, test double) is a host decision. What the core does
//! need is for a response to be *distinguishable* from any other listener
//! result, which is why `Response` is its own trait rather than a bare value.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An inbound request, read-only from the core's perspective.
///
/// Adapters downcast through [`as_any`](Request::as_any) to reach their own
/// concrete type; the core never does.
pub trait Request: fmt::Debug + Send + Sync {
    /// Concrete-type escape hatch for adapter-level downcasts.
    fn as_any(&self) -> &dyn Any;
}

/// An outbound response.
///
/// Responses travel through the event as `Arc<dyn Response>`, so mutation
/// after construction goes through interior mutability:
/// [`set_content`](Response::set_content) is expected to work through `&self`.
pub trait Response: fmt::Debug + Send + Sync {
    /// Concrete-type escape hatch for adapter-level downcasts.
    fn as_any(&self) -> &dyn Any;

    /// Returns the current body of the response.
    fn content(&self) -> String;

    /// Replaces the body of the response.
    fn set_content(&self, content: String);
}

/// Shorthand for the shared request handle carried by an event.
pub type RequestRef = Arc<dyn Request>;

/// Shorthand for the shared response handle carried by an event.
pub type ResponseRef = Arc<dyn Response>;
