//! Foundation types for axle.
//!
//! This crate is the bottom of the workspace dependency order:
//!
//! ```text
//! axle-types    : ErrorCode, Request, Response   ◄── HERE
//! axle-event    : Event, Listener, EventBus, SharedRegistry
//! axle-service  : ServiceContainer, Service, Initializer
//! axle-app      : Application, Stage, RouteListener
//! ```
//!
//! # Contents
//!
//! - [`ErrorCode`] — machine-readable error codes and recoverability info,
//!   implemented by every error type in the workspace.
//! - [`Request`] / [`Response`] — the opaque transport collaborators the
//!   lifecycle core consumes. The core never constructs these; a host entry
//!   point (or the default console adapters in `axle-app`) supplies them.
//!
//! # Example
//!
//! ```
//! use axle_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum StoreError {
//!     Missing(String),
//!     Busy,
//! }
//!
//! impl ErrorCode for StoreError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Missing(_) => "STORE_MISSING",
//!             Self::Busy => "STORE_BUSY",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Busy)
//!     }
//! }
//!
//! assert_eq!(StoreError::Busy.code(), "STORE_BUSY");
//! ```

mod error;
mod message;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use message::{Request, RequestRef, Response, ResponseRef};
