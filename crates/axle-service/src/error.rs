//! Error types for the service container.

use axle_types::ErrorCode;
use thiserror::Error;

/// Errors surfaced by [`ServiceContainer::resolve`](crate::ServiceContainer::resolve).
///
/// These are infrastructure failures: unlike the domain errors the event
/// layer carries as data, a resolution failure aborts the current run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The name is neither defined nor reachable through an alias.
    #[error("unknown service: {0}")]
    Unknown(String),

    /// Alias resolution revisited a name already in progress.
    #[error("circular alias chain through: {0}")]
    CircularAlias(String),

    /// A factory failed to construct its service.
    #[error("building service '{name}' failed: {message}")]
    Build {
        /// Service name being built.
        name: String,
        /// Factory failure message.
        message: String,
    },

    /// The resolved service is not of the type the caller asked for.
    #[error("service '{0}' is not of the requested type")]
    WrongType(String),
}

impl ServiceError {
    /// Factory failure for `name`.
    pub fn build(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Build {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl ErrorCode for ServiceError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unknown(_) => "SERVICE_UNKNOWN",
            Self::CircularAlias(_) => "SERVICE_CIRCULAR_ALIAS",
            Self::Build { .. } => "SERVICE_BUILD_FAILED",
            Self::WrongType(_) => "SERVICE_WRONG_TYPE",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Every variant points at broken wiring, not a transient condition.
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axle_types::assert_error_codes;

    #[test]
    fn display_strings() {
        assert_eq!(
            ServiceError::Unknown("Router".into()).to_string(),
            "unknown service: Router"
        );
        assert_eq!(
            ServiceError::CircularAlias("A".into()).to_string(),
            "circular alias chain through: A"
        );
        assert_eq!(
            ServiceError::build("EventBus", "no shared registry").to_string(),
            "building service 'EventBus' failed: no shared registry"
        );
        assert_eq!(
            ServiceError::WrongType("Request".into()).to_string(),
            "service 'Request' is not of the requested type"
        );
    }

    #[test]
    fn codes_follow_convention() {
        assert_error_codes(
            &[
                ServiceError::Unknown("x".into()),
                ServiceError::CircularAlias("x".into()),
                ServiceError::build("x", "y"),
                ServiceError::WrongType("x".into()),
            ],
            "SERVICE_",
        );
    }
}
