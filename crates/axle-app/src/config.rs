//! Declarative application configuration.

use axle_service::Service;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;

/// Service name the configuration is seeded under at init.
pub const CONFIG_SERVICE: &str = "ApplicationConfig";

/// Bootstrap configuration surface.
///
/// Deserializable from whatever format the host loads (TOML, JSON, ...).
/// Entries are opaque names resolved through the service container; only
/// services probing as listener aggregates are attached.
///
/// # Example
///
/// ```
/// use axle_app::AppConfig;
///
/// let config: AppConfig = serde_json::from_str(
///     r#"{ "listeners": ["AuditListener"], "identifier": "console-app" }"#,
/// )
/// .unwrap();
/// assert_eq!(config.listeners, ["AuditListener"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Names of listener aggregates to attach at bootstrap, in order,
    /// after the routing listener.
    pub listeners: Vec<String>,

    /// Extra identifier the application's bus declares alongside
    /// `"Application"`, so shared-registry listeners can target this
    /// application specifically.
    pub identifier: Option<String>,
}

impl Service for AppConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
