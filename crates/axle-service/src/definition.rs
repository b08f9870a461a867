//! Service definitions and programmatic container configuration.

use crate::{Initializer, Service, ServiceContainer, ServiceError};
use std::fmt;
use std::sync::Arc;

/// No-argument constructor for an invokable service.
pub type InvokableFn = Arc<dyn Fn() -> Box<dyn Service> + Send + Sync>;

/// Constructor taking the container, for services with dependencies.
pub type FactoryFn =
    Arc<dyn Fn(&ServiceContainer) -> Result<Box<dyn Service>, ServiceError> + Send + Sync>;

/// How the container produces a named service.
#[derive(Clone)]
pub enum Definition {
    /// Constructible with no arguments.
    Invokable(InvokableFn),

    /// Constructed by a capability that may resolve other services.
    Factory(FactoryFn),

    /// Redirect to another name. Resolution follows at most as many hops as
    /// there are distinct registered names before failing.
    Alias(String),
}

impl Definition {
    /// An invokable definition from a plain constructor.
    pub fn invokable<S, F>(build: F) -> Self
    where
        S: Service,
        F: Fn() -> S + Send + Sync + 'static,
    {
        Self::Invokable(Arc::new(move || Box::new(build())))
    }

    /// A factory definition from a fallible constructor.
    pub fn factory<S, F>(build: F) -> Self
    where
        S: Service,
        F: Fn(&ServiceContainer) -> Result<S, ServiceError> + Send + Sync + 'static,
    {
        Self::Factory(Arc::new(move |container| {
            build(container).map(|s| Box::new(s) as Box<dyn Service>)
        }))
    }

    /// An alias redirecting to `target`.
    pub fn alias(target: impl Into<String>) -> Self {
        Self::Alias(target.into())
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invokable(_) => f.write_str("Definition::Invokable"),
            Self::Factory(_) => f.write_str("Definition::Factory"),
            Self::Alias(target) => write!(f, "Definition::Alias({target})"),
        }
    }
}

/// Programmatic registration set, merged into a container at construction.
///
/// Mirrors a bootstrap config object: invokables, factories, aliases,
/// sharing overrides (services are shared unless marked otherwise), and
/// container-wide initializers, all applied in the order given.
#[derive(Default)]
pub struct ContainerConfig {
    pub(crate) definitions: Vec<(String, Definition)>,
    pub(crate) shared: Vec<(String, bool)>,
    pub(crate) initializers: Vec<Arc<dyn Initializer>>,
}

impl ContainerConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an invokable service.
    #[must_use]
    pub fn invokable<S, F>(mut self, name: &str, build: F) -> Self
    where
        S: Service,
        F: Fn() -> S + Send + Sync + 'static,
    {
        self.definitions
            .push((name.to_string(), Definition::invokable(build)));
        self
    }

    /// Adds a factory-built service.
    #[must_use]
    pub fn factory<S, F>(mut self, name: &str, build: F) -> Self
    where
        S: Service,
        F: Fn(&ServiceContainer) -> Result<S, ServiceError> + Send + Sync + 'static,
    {
        self.definitions
            .push((name.to_string(), Definition::factory(build)));
        self
    }

    /// Adds an alias.
    #[must_use]
    pub fn alias(mut self, name: &str, target: &str) -> Self {
        self.definitions
            .push((name.to_string(), Definition::alias(target)));
        self
    }

    /// Overrides the sharing rule for a name (default is shared).
    #[must_use]
    pub fn shared(mut self, name: &str, shared: bool) -> Self {
        self.shared.push((name.to_string(), shared));
        self
    }

    /// Appends a container-wide initializer.
    #[must_use]
    pub fn initializer<I>(mut self, initializer: I) -> Self
    where
        I: Initializer + 'static,
    {
        self.initializers.push(Arc::new(initializer));
        self
    }

    /// Merges another configuration after this one.
    #[must_use]
    pub fn merge(mut self, other: ContainerConfig) -> Self {
        self.definitions.extend(other.definitions);
        self.shared.extend(other.shared);
        self.initializers.extend(other.initializers);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    #[derive(Debug)]
    struct Unit;

    impl Service for Unit {
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

    #[test]
    fn definition_debug_names_variant() {
        assert_eq!(
            format!("{:?}", Definition::invokable(|| Unit)),
            "Definition::Invokable"
        );
        assert_eq!(
            format!("{:?}", Definition::alias("Target")),
            "Definition::Alias(Target)"
        );
    }

    #[test]
    fn config_collects_in_order() {
        let config = ContainerConfig::new()
            .invokable("A", || Unit)
            .alias("B", "A")
            .shared("A", false);

        assert_eq!(config.definitions.len(), 2);
        assert_eq!(config.definitions[0].0, "A");
        assert_eq!(config.definitions[1].0, "B");
        assert_eq!(config.shared, [("A".to_string(), false)]);
    }

    #[test]
    fn merge_appends_after() {
        let merged = ContainerConfig::new()
            .invokable("A", || Unit)
            .merge(ContainerConfig::new().invokable("B", || Unit));
        assert_eq!(merged.definitions[0].0, "A");
        assert_eq!(merged.definitions[1].0, "B");
    }
}
