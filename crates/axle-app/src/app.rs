//! Application — the lifecycle controller.
//!
//! A small state machine that owns one event bus and one event per run and
//! drives the fixed trigger sequence bootstrap → route → dispatch → render →
//! finish. Any route or dispatch listener can end the run early by producing
//! a response; a domain error on the event branches past dispatch straight
//! to render and finish.
//!
//! # Example
//!
//! ```
//! use axle_app::{AppConfig, Application, RunOutcome, Stage};
//!
//! let mut app = Application::init(AppConfig::default()).unwrap();
//! // No router is configured, so the run faults through the error branch.
//! let outcome = app.run().unwrap();
//! assert_eq!(outcome, RunOutcome::Faulted(Stage::Route));
//! ```

use crate::config::CONFIG_SERVICE;
use crate::services::{default_container_config, names};
use crate::{AppConfig, AppError, Stage};
use axle_event::{Event, EventBus, Reaction};
use axle_service::{ContainerConfig, ServiceContainer, ServiceError, ServiceRef};
use axle_types::{RequestRef, ResponseRef};
use std::fmt;
use std::sync::Arc;

/// Identifier every application's bus declares, so shared-registry
/// listeners can target applications generically.
pub const APPLICATION_IDENTIFIER: &str = "Application";

/// Lifecycle position of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Constructed; nothing attached yet.
    Created,
    /// Default listeners attached, event built, `bootstrap` triggered.
    Bootstrapped,
    /// `route` completed without error or short-circuit.
    Routed,
    /// A route listener flagged a domain error.
    RouteError,
    /// `dispatch` completed without error or short-circuit.
    Dispatched,
    /// A dispatch listener flagged a domain error.
    DispatchError,
    /// `render` completed.
    Rendered,
    /// Terminal. A finished application cannot run again.
    Finished,
}

/// How a run reached `finish`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The full pipeline ran: route, dispatch, render, finish.
    Completed,
    /// A listener at this stage produced the final response; the remaining
    /// pipeline (including render) was skipped.
    ShortCircuited(Stage),
    /// A domain error at this stage branched the run to render and finish,
    /// skipping dispatch.
    Faulted(Stage),
}

/// The lifecycle controller.
///
/// Owns one [`EventBus`] (not shared with other controllers) and one
/// [`Event`] per run. Collaborators (request, response, routing listener,
/// anything named in [`AppConfig::listeners`]) come out of the
/// [`ServiceContainer`].
pub struct Application {
    config: AppConfig,
    container: ServiceContainer,
    events: EventBus,
    event: Event,
    state: AppState,
    /// Attached aggregates, held so their registrations stay alive.
    listeners: Vec<ServiceRef>,
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Application {
    /// Creates a controller over an already-configured container.
    ///
    /// Resolves the (non-shared) event bus and declares this application's
    /// identifiers on it.
    ///
    /// # Errors
    ///
    /// Fails if the container cannot produce an `EventBus`.
    pub fn new(config: AppConfig, container: ServiceContainer) -> Result<Self, AppError> {
        let bus = container.resolve_as::<EventBus>(names::EVENT_BUS)?;
        let events = (*bus).clone();

        let mut identifiers = vec![APPLICATION_IDENTIFIER.to_string()];
        if let Some(alias) = &config.identifier {
            identifiers.push(alias.clone());
        }
        events.set_identifiers(identifiers);

        Ok(Self {
            config,
            container,
            events,
            event: Event::new(Stage::Bootstrap.as_str()),
            state: AppState::Created,
            listeners: Vec::new(),
        })
    }

    /// Quick initialization: default wiring, the configuration seeded as
    /// the `ApplicationConfig` service, and a fresh controller.
    ///
    /// # Errors
    ///
    /// Fails if the default wiring cannot produce an `EventBus`.
    pub fn init(config: AppConfig) -> Result<Self, AppError> {
        Self::init_with(config, ContainerConfig::new())
    }

    /// [`init`](Self::init) with container overrides applied after the
    /// default wiring: the hook for installing a real router, another
    /// transport's request/response, or extra listener services.
    pub fn init_with(config: AppConfig, overrides: ContainerConfig) -> Result<Self, AppError> {
        let container =
            ServiceContainer::with_config(default_container_config().merge(overrides));
        container.set_service(CONFIG_SERVICE, Arc::new(config.clone()));
        Self::new(config, container)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> AppState {
        self.state
    }

    /// The configuration this application was built with.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The service container.
    #[must_use]
    pub fn container(&self) -> &ServiceContainer {
        &self.container
    }

    /// The application's event bus. Attach listeners here before `run()`.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// The run's event. After a run this still carries whatever the
    /// listeners left on it (params, error, response).
    #[must_use]
    pub fn event(&self) -> &Event {
        &self.event
    }

    /// The bound request, once bootstrapped.
    #[must_use]
    pub fn request(&self) -> Option<RequestRef> {
        self.event.request().cloned()
    }

    /// The final (or in-flight) response. `None` means no response was ever
    /// produced, which is distinct from a response with empty content.
    #[must_use]
    pub fn response(&self) -> Option<ResponseRef> {
        self.event.response().cloned()
    }

    /// Attaches the default listener set, builds the run's event, and
    /// triggers the informational `bootstrap` stage.
    ///
    /// The routing listener is always attached first; names from
    /// [`AppConfig::listeners`] follow, each resolved through the container
    /// and probed for the listener-aggregate capability (non-aggregates are
    /// skipped with a warning).
    ///
    /// # Errors
    ///
    /// - [`AppError::AlreadyBootstrapped`] on a second call.
    /// - [`AppError::Service`] if a configured name fails to resolve.
    /// - [`AppError::Event`] if a bootstrap listener aborts.
    pub fn bootstrap(&mut self) -> Result<&mut Self, AppError> {
        if self.state != AppState::Created {
            return Err(AppError::AlreadyBootstrapped);
        }
        tracing::info!("bootstrapping");

        let mut attach_names = vec![names::ROUTE_LISTENER.to_string()];
        attach_names.extend(self.config.listeners.iter().cloned());
        for name in attach_names {
            let service = self.container.resolve(&name)?;
            match service.as_listener_aggregate() {
                Some(aggregate) => aggregate.attach(&self.events),
                None => {
                    tracing::warn!(service = %name, "configured listener is not an aggregate, skipping");
                    continue;
                }
            }
            self.listeners.push(service);
        }

        let request = self.resolve_request()?;
        let response = self.resolve_response()?;
        self.event = Event::new(Stage::Bootstrap.as_str())
            .with_target(APPLICATION_IDENTIFIER)
            .with_request(request)
            .with_response(response);

        // Informational: listeners may seed params, results are ignored.
        self.events
            .trigger(Stage::Bootstrap.as_str(), &mut self.event)?;
        self.state = AppState::Bootstrapped;
        Ok(self)
    }

    /// Drives one run: route → dispatch → render → finish, with the
    /// short-circuit and error branches described on [`RunOutcome`].
    ///
    /// A `Created` application bootstraps implicitly. A finished one fails:
    /// there is no implicit reset, build a fresh application instead.
    ///
    /// # Errors
    ///
    /// - [`AppError::AlreadyFinished`] when this application already ran.
    /// - [`AppError::Service`] / [`AppError::Event`] as infrastructure
    ///   failures propagate; domain errors never surface here.
    pub fn run(&mut self) -> Result<RunOutcome, AppError> {
        match self.state {
            AppState::Created => {
                self.bootstrap()?;
            }
            AppState::Bootstrapped => {}
            _ => return Err(AppError::AlreadyFinished),
        }

        let stops_pipeline = |event: &Event, reaction: &Reaction| {
            reaction.is_response() || event.error().is_some()
        };

        let routed =
            self.events
                .trigger_until(Stage::Route.as_str(), &mut self.event, stops_pipeline)?;
        if routed.stopped() {
            if let Some(response) = routed.last_response() {
                let response = Arc::clone(response);
                return self.finish_short_circuit(Stage::Route, response);
            }
        }
        if self.event.error().is_some() {
            return self.finish_faulted(Stage::Route);
        }
        self.state = AppState::Routed;

        let dispatched = self.events.trigger_until(
            Stage::Dispatch.as_str(),
            &mut self.event,
            stops_pipeline,
        )?;
        if dispatched.stopped() {
            if let Some(response) = dispatched.last_response() {
                let response = Arc::clone(response);
                return self.finish_short_circuit(Stage::Dispatch, response);
            }
        }
        if self.event.error().is_some() {
            return self.finish_faulted(Stage::Dispatch);
        }
        self.state = AppState::Dispatched;

        self.events
            .trigger(Stage::Render.as_str(), &mut self.event)?;
        self.state = AppState::Rendered;
        self.events
            .trigger(Stage::Finish.as_str(), &mut self.event)?;
        self.state = AppState::Finished;
        tracing::info!("run completed");
        Ok(RunOutcome::Completed)
    }

    /// Short-circuit exit: adopt the listener's response, trigger `finish`,
    /// terminate. Dispatch and render are skipped.
    fn finish_short_circuit(
        &mut self,
        at: Stage,
        response: ResponseRef,
    ) -> Result<RunOutcome, AppError> {
        tracing::info!(stage = %at, "listener produced the final response");
        self.event.set_response(response);
        self.events
            .trigger(Stage::Finish.as_str(), &mut self.event)?;
        self.state = AppState::Finished;
        Ok(RunOutcome::ShortCircuited(at))
    }

    /// Error branch: keep the current response, trigger `render` then
    /// `finish` with the error still on the event. Dispatch never runs.
    fn finish_faulted(&mut self, at: Stage) -> Result<RunOutcome, AppError> {
        self.state = match at {
            Stage::Route => AppState::RouteError,
            _ => AppState::DispatchError,
        };
        tracing::info!(stage = %at, error = ?self.event.error(), "faulted, branching to render");
        self.events
            .trigger(Stage::Render.as_str(), &mut self.event)?;
        self.events
            .trigger(Stage::Finish.as_str(), &mut self.event)?;
        self.state = AppState::Finished;
        Ok(RunOutcome::Faulted(at))
    }

    fn resolve_request(&self) -> Result<RequestRef, AppError> {
        self.container
            .resolve(names::REQUEST)?
            .as_request()
            .ok_or_else(|| AppError::from(ServiceError::WrongType(names::REQUEST.to_string())))
    }

    fn resolve_response(&self) -> Result<ResponseRef, AppError> {
        self.container
            .resolve(names::RESPONSE)?
            .as_response()
            .ok_or_else(|| AppError::from(ServiceError::WrongType(names::RESPONSE.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ERROR_NO_MATCH;
    use axle_service::Service;
    use std::any::Any;

    #[derive(Debug)]
    struct NotAnAggregate;

    impl Service for NotAnAggregate {
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
    fn init_starts_created() {
        let app = Application::init(AppConfig::default()).unwrap();
        assert_eq!(app.state(), AppState::Created);
        assert!(app.response().is_none());
    }

    #[test]
    fn bootstrap_attaches_route_listener_and_builds_event() {
        let mut app = Application::init(AppConfig::default()).unwrap();
        app.bootstrap().unwrap();

        assert_eq!(app.state(), AppState::Bootstrapped);
        assert_eq!(app.events().len(), 1);
        assert!(app.request().is_some());
        assert!(app.response().is_some());
        assert_eq!(app.event().target(), Some(APPLICATION_IDENTIFIER));
    }

    #[test]
    fn bootstrap_twice_fails() {
        let mut app = Application::init(AppConfig::default()).unwrap();
        app.bootstrap().unwrap();
        assert!(matches!(
            app.bootstrap().unwrap_err(),
            AppError::AlreadyBootstrapped
        ));
    }

    #[test]
    fn run_bootstraps_implicitly() {
        let mut app = Application::init(AppConfig::default()).unwrap();
        app.run().unwrap();
        assert_eq!(app.state(), AppState::Finished);
    }

    #[test]
    fn default_wiring_faults_on_route() {
        let mut app = Application::init(AppConfig::default()).unwrap();
        let outcome = app.run().unwrap();

        assert_eq!(outcome, RunOutcome::Faulted(Stage::Route));
        assert_eq!(app.event().error(), Some(ERROR_NO_MATCH));
        // The bootstrap-assigned response survives the fault untouched.
        assert_eq!(app.response().unwrap().content(), "");
    }

    #[test]
    fn second_run_fails() {
        let mut app = Application::init(AppConfig::default()).unwrap();
        app.run().unwrap();
        assert!(matches!(app.run().unwrap_err(), AppError::AlreadyFinished));
    }

    #[test]
    fn non_aggregate_listener_is_skipped() {
        let config = AppConfig {
            listeners: vec!["Oddball".into()],
            ..AppConfig::default()
        };
        let mut app = Application::init_with(
            config,
            ContainerConfig::new().invokable("Oddball", || NotAnAggregate),
        )
        .unwrap();

        app.bootstrap().unwrap();
        // Only the routing listener is attached.
        assert_eq!(app.events().len(), 1);
    }

    #[test]
    fn unknown_configured_listener_fails_bootstrap() {
        let config = AppConfig {
            listeners: vec!["Ghost".into()],
            ..AppConfig::default()
        };
        let mut app = Application::init(config).unwrap();
        assert!(matches!(
            app.bootstrap().unwrap_err(),
            AppError::Service(ServiceError::Unknown(_))
        ));
    }

    #[test]
    fn configured_identifier_reaches_the_bus() {
        let config = AppConfig {
            identifier: Some("console-app".into()),
            ..AppConfig::default()
        };
        let app = Application::init(config).unwrap();
        assert_eq!(
            app.events().identifiers(),
            vec!["Application".to_string(), "console-app".to_string()]
        );
    }

    #[test]
    fn config_is_seeded_as_a_service() {
        let config = AppConfig {
            identifier: Some("console-app".into()),
            ..AppConfig::default()
        };
        let app = Application::init(config.clone()).unwrap();
        let seeded = app
            .container()
            .resolve_as::<AppConfig>(CONFIG_SERVICE)
            .unwrap();
        assert_eq!(*seeded, config);
    }

    #[test]
    fn fresh_buses_per_application_share_one_registry() {
        let container = ServiceContainer::with_config(default_container_config());
        let a = Application::new(AppConfig::default(), container.clone()).unwrap();
        let b = Application::new(AppConfig::default(), container).unwrap();

        // Non-shared bus definition: each application gets its own.
        a.events().attach(
            "route",
            |_: &mut Event| -> Result<Reaction, axle_event::ListenerError> {
                Ok(Reaction::Continue)
            },
            0,
        );
        assert_eq!(a.events().len(), 1);
        assert_eq!(b.events().len(), 0);

        // ...wired to the one shared registry.
        assert!(Arc::ptr_eq(
            &a.events().shared().unwrap(),
            &b.events().shared().unwrap()
        ));
    }

    #[test]
    fn register_overrides_default_definition() {
        let mut app = Application::init_with(
            AppConfig::default(),
            ContainerConfig::new().factory("RouteListener", |_: &ServiceContainer| {
                Ok(crate::RouteListener::new(Arc::new(
                    crate::router::NullRouter,
                )))
            }),
        )
        .unwrap();
        // Still exactly one routing listener after bootstrap.
        app.bootstrap().unwrap();
        assert_eq!(app.events().len(), 1);
    }
}
