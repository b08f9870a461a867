//! Application-level error type.

use axle_event::EventError;
use axle_service::ServiceError;
use axle_types::ErrorCode;
use thiserror::Error;

/// Unified error for the application layer.
///
/// Routing and dispatch failures are *not* here; they ride on the event as
/// data and branch the state machine. Only infrastructure failures (service
/// resolution, a listener re-raising, lifecycle misuse) surface as `AppError`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Service resolution failed.
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    /// A listener aborted a stage trigger.
    #[error("event error: {0}")]
    Event(#[from] EventError),

    /// `bootstrap()` was called on an already-bootstrapped application.
    #[error("application is already bootstrapped")]
    AlreadyBootstrapped,

    /// `run()` was called on a consumed application. Build a fresh
    /// application to run again; there is no implicit reset.
    #[error("application already ran; build a fresh application to run again")]
    AlreadyFinished,

    /// A stage name failed to parse.
    #[error("unknown stage: {0}")]
    UnknownStage(String),
}

impl ErrorCode for AppError {
    fn code(&self) -> &'static str {
        match self {
            Self::Service(e) => e.code(),
            Self::Event(e) => e.code(),
            Self::AlreadyBootstrapped => "APP_ALREADY_BOOTSTRAPPED",
            Self::AlreadyFinished => "APP_ALREADY_FINISHED",
            Self::UnknownStage(_) => "APP_UNKNOWN_STAGE",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Service(e) => e.is_recoverable(),
            Self::Event(e) => e.is_recoverable(),
            Self::AlreadyBootstrapped | Self::AlreadyFinished | Self::UnknownStage(_) => false,
        }
    }
}
