//! Console request/response adapters — the default transport variant.
//!
//! These are thin edge types: the lifecycle core only ever sees them through
//! the `Request`/`Response` traits. A host targeting another transport
//! overrides the `Request`/`Response` factories in the container.

use axle_service::Service;
use axle_types::{Request, RequestRef, Response, ResponseRef};
use parking_lot::Mutex;
use std::any::Any;
use std::sync::Arc;

/// Request built from command-line arguments.
#[derive(Debug, Default)]
pub struct ConsoleRequest {
    args: Vec<String>,
}

impl ConsoleRequest {
    /// Captures the current process arguments (program name excluded).
    #[must_use]
    pub fn new() -> Self {
        Self::from_args(std::env::args().skip(1).collect())
    }

    /// Builds a request from explicit arguments.
    #[must_use]
    pub fn from_args(args: Vec<String>) -> Self {
        Self { args }
    }

    /// The captured arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Request for ConsoleRequest {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Service for ConsoleRequest {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn as_request(self: Arc<Self>) -> Option<RequestRef> {
        Some(self)
    }
}

/// Response accumulating console output.
#[derive(Debug, Default)]
pub struct ConsoleResponse {
    content: Mutex<String>,
}

impl ConsoleResponse {
    /// Creates an empty response.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Response for ConsoleResponse {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn content(&self) -> String {
        self.content.lock().clone()
    }

    fn set_content(&self, content: String) {
        *self.content.lock() = content;
    }
}

impl Service for ConsoleResponse {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn as_response(self: Arc<Self>) -> Option<ResponseRef> {
        Some(self)
    }
}
