//! Service container — lazy construction, lifetimes, and initializer runs.

use crate::{ContainerConfig, Definition, Initializer, Service, ServiceError, ServiceRef};
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
struct Entry {
    definition: Definition,
    shared: bool,
}

#[derive(Default)]
struct ContainerInner {
    definitions: RwLock<HashMap<String, Entry>>,
    instances: RwLock<HashMap<String, ServiceRef>>,
    initializers: RwLock<Vec<Arc<dyn Initializer>>>,
}

/// Lazy factory/invokable/alias registry with per-service lifetime.
///
/// A cheap-`Clone` handle: factories receive `&ServiceContainer` and may
/// clone it into the services they build. Shared services (the default) are
/// constructed once on first resolve and cached; non-shared services are
/// built fresh per resolve. Every fresh instance passes through the
/// container-wide initializer chain before it is published or returned.
///
/// # Concurrency
///
/// No lock is held while a factory runs, so factories may resolve other
/// services re-entrantly. If two threads race to build the same shared
/// service, publication is first-wins: exactly one instance is ever handed
/// out, the losing construction is discarded before anyone sees it.
#[derive(Clone, Default)]
pub struct ServiceContainer {
    inner: Arc<ContainerInner>,
}

impl fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("definitions", &self.inner.definitions.read().len())
            .field("instances", &self.inner.instances.read().len())
            .finish()
    }
}

impl ServiceContainer {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a container and applies `config`.
    #[must_use]
    pub fn with_config(config: ContainerConfig) -> Self {
        let container = Self::new();
        container.configure(config);
        container
    }

    /// Applies a registration set: definitions, sharing overrides, then
    /// initializers, each in the order given.
    pub fn configure(&self, config: ContainerConfig) {
        for (name, definition) in config.definitions {
            self.register(&name, definition);
        }
        for (name, shared) in config.shared {
            self.set_shared(&name, shared);
        }
        for initializer in config.initializers {
            self.inner.initializers.write().push(initializer);
        }
    }

    /// Registers a definition under `name` (shared by default), replacing
    /// any previous definition of that name.
    pub fn register(&self, name: &str, definition: Definition) {
        tracing::debug!(service = name, ?definition, "register");
        self.inner.definitions.write().insert(
            name.to_string(),
            Entry {
                definition,
                shared: true,
            },
        );
    }

    /// Overrides the sharing rule for `name`.
    ///
    /// Returns `false` if no such definition exists.
    pub fn set_shared(&self, name: &str, shared: bool) -> bool {
        match self.inner.definitions.write().get_mut(name) {
            Some(entry) => {
                entry.shared = shared;
                true
            }
            None => false,
        }
    }

    /// Seeds a pre-built instance under `name`, bypassing construction and
    /// initializers. The instance behaves as shared.
    pub fn set_service(&self, name: &str, service: ServiceRef) {
        self.inner
            .instances
            .write()
            .insert(name.to_string(), service);
    }

    /// Appends a container-wide initializer, run on every instance built
    /// after this point.
    pub fn add_initializer<I>(&self, initializer: I)
    where
        I: Initializer + 'static,
    {
        self.inner.initializers.write().push(Arc::new(initializer));
    }

    /// Returns `true` if `name` is resolvable, without constructing it.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.inner.instances.read().contains_key(name)
            || self.inner.definitions.read().contains_key(name)
    }

    /// Resolves `name`, constructing the service if needed.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Unknown`] — `name` is neither defined nor seeded.
    /// - [`ServiceError::CircularAlias`] — alias resolution revisited a name.
    /// - [`ServiceError::Build`] — a factory failed.
    pub fn resolve(&self, name: &str) -> Result<ServiceRef, ServiceError> {
        self.resolve_inner(name, &mut Vec::new())
    }

    /// Resolves `name` and downcasts to the concrete type `T`.
    ///
    /// # Errors
    ///
    /// As [`resolve`](Self::resolve), plus [`ServiceError::WrongType`] when
    /// the service is not a `T`.
    pub fn resolve_as<T>(&self, name: &str) -> Result<Arc<T>, ServiceError>
    where
        T: Any + Send + Sync,
    {
        self.resolve(name)?
            .into_any()
            .downcast::<T>()
            .map_err(|_| ServiceError::WrongType(name.to_string()))
    }

    fn resolve_inner(
        &self,
        name: &str,
        visiting: &mut Vec<String>,
    ) -> Result<ServiceRef, ServiceError> {
        if visiting.iter().any(|n| n == name) {
            return Err(ServiceError::CircularAlias(name.to_string()));
        }

        if let Some(instance) = self.inner.instances.read().get(name) {
            tracing::trace!(service = name, "cache hit");
            return Ok(Arc::clone(instance));
        }

        let Some(entry) = self.inner.definitions.read().get(name).cloned() else {
            return Err(ServiceError::Unknown(name.to_string()));
        };

        let service = match &entry.definition {
            Definition::Alias(target) => {
                visiting.push(name.to_string());
                self.resolve_inner(target, visiting)?
            }
            Definition::Invokable(build) => self.run_initializers(build()),
            Definition::Factory(build) => self.run_initializers(build(self)?),
        };

        tracing::debug!(service = name, shared = entry.shared, "resolved");
        if entry.shared {
            // First-wins publication: a racing resolve keeps the instance
            // that landed first, the other construction is dropped unseen.
            let mut instances = self.inner.instances.write();
            let published = instances
                .entry(name.to_string())
                .or_insert(service);
            Ok(Arc::clone(published))
        } else {
            Ok(service)
        }
    }

    fn run_initializers(&self, mut instance: Box<dyn Service>) -> ServiceRef {
        let initializers = self.inner.initializers.read().clone();
        for initializer in &initializers {
            initializer.initialize(instance.as_mut(), self);
        }
        Arc::from(instance)
    }
}
