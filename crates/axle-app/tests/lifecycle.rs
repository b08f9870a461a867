//! End-to-end lifecycle runs: full pipeline, short-circuits, and the error
//! branch, driven through a real container and bus.

use axle_app::{
    AppConfig, Application, RouteListener, RouteMatch, Router, RunOutcome, Stage, ERROR_NO_MATCH,
};
use axle_event::testing::TextResponse;
use axle_event::{
    Event, EventBus, ListenerAggregate, ListenerError, ListenerToken, Reaction, SharedRegistry,
};
use axle_service::{ContainerConfig, Service, ServiceContainer};
use axle_types::Request;
use parking_lot::Mutex;
use serde_json::json;
use std::any::Any;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("axle_app=debug,axle_event=debug,axle_service=debug")
        .try_init();
}

/// Router that matches everything with fixed params.
struct MatchAllRouter;

impl Router for MatchAllRouter {
    fn route(&self, _request: &dyn Request) -> Option<RouteMatch> {
        Some(
            RouteMatch::new()
                .param("controller", json!("index"))
                .param("action", json!("show")),
        )
    }
}

/// Container overrides installing the given router.
fn with_router(router: impl Router + 'static) -> ContainerConfig {
    let router: Arc<dyn Router> = Arc::new(router);
    ContainerConfig::new().factory("RouteListener", move |_: &ServiceContainer| {
        Ok(RouteListener::new(Arc::clone(&router)))
    })
}

/// Attaches a recorder to every lifecycle stage, returning the log.
fn record_stages(bus: &EventBus) -> Arc<Mutex<Vec<&'static str>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    for stage in [
        Stage::Bootstrap,
        Stage::Route,
        Stage::Dispatch,
        Stage::Render,
        Stage::Finish,
    ] {
        let log = Arc::clone(&log);
        bus.attach(
            stage.as_str(),
            move |_: &mut Event| -> Result<Reaction, ListenerError> {
                log.lock().push(stage.as_str());
                Ok(Reaction::Continue)
            },
            100,
        );
    }
    log
}

#[test]
fn dispatch_response_ends_the_run() {
    init_tracing();
    // route@10 produces neither error nor response; dispatch@0 returns R.
    let mut app = Application::init_with(AppConfig::default(), with_router(MatchAllRouter)).unwrap();
    let stages = record_stages(app.events());

    app.events().attach(
        "route",
        |_: &mut Event| -> Result<Reaction, ListenerError> { Ok(Reaction::Continue) },
        10,
    );
    let response = TextResponse::shared("dispatched");
    let handler = Arc::clone(&response);
    app.events().attach(
        "dispatch",
        move |_: &mut Event| -> Result<Reaction, ListenerError> {
            Ok(Reaction::Response(Arc::clone(&handler)))
        },
        0,
    );

    let outcome = app.run().unwrap();

    assert_eq!(outcome, RunOutcome::ShortCircuited(Stage::Dispatch));
    assert!(Arc::ptr_eq(&app.response().unwrap(), &response));
    assert_eq!(app.response().unwrap().content(), "dispatched");
    // Render is skipped on the short-circuit exit.
    assert_eq!(
        *stages.lock(),
        ["bootstrap", "route", "dispatch", "finish"]
    );
}

#[test]
fn route_error_skips_dispatch() {
    init_tracing();
    let mut app = Application::init(AppConfig::default()).unwrap();
    let stages = record_stages(app.events());

    // A route listener flags the domain error before the routing listener
    // would even run.
    app.events().attach(
        "route",
        |event: &mut Event| -> Result<Reaction, ListenerError> {
            event.set_error("no-match");
            Ok(Reaction::Continue)
        },
        10,
    );
    let dispatch_probe = Arc::new(Mutex::new(0usize));
    let probe = Arc::clone(&dispatch_probe);
    app.events().attach(
        "dispatch",
        move |_: &mut Event| -> Result<Reaction, ListenerError> {
            *probe.lock() += 1;
            Ok(Reaction::Continue)
        },
        0,
    );

    let outcome = app.run().unwrap();

    assert_eq!(outcome, RunOutcome::Faulted(Stage::Route));
    assert_eq!(*dispatch_probe.lock(), 0);
    // The error is still observable after the run, and the bootstrap
    // response survived unchanged.
    assert_eq!(app.event().error(), Some("no-match"));
    assert_eq!(app.response().unwrap().content(), "");
    assert_eq!(*stages.lock(), ["bootstrap", "route", "render", "finish"]);
}

#[test]
fn no_router_faults_with_no_match() {
    init_tracing();
    let mut app = Application::init(AppConfig::default()).unwrap();
    let outcome = app.run().unwrap();

    assert_eq!(outcome, RunOutcome::Faulted(Stage::Route));
    assert_eq!(app.event().error(), Some(ERROR_NO_MATCH));
}

#[test]
fn route_response_short_circuits_everything() {
    init_tracing();
    let mut app = Application::init_with(AppConfig::default(), with_router(MatchAllRouter)).unwrap();
    let stages = record_stages(app.events());

    // Below the stage recorder (100), above the routing listener (0).
    let early = TextResponse::shared("cached");
    let handler = Arc::clone(&early);
    app.events().attach(
        "route",
        move |_: &mut Event| -> Result<Reaction, ListenerError> {
            Ok(Reaction::Response(Arc::clone(&handler)))
        },
        50,
    );

    let outcome = app.run().unwrap();

    assert_eq!(outcome, RunOutcome::ShortCircuited(Stage::Route));
    assert!(Arc::ptr_eq(&app.response().unwrap(), &early));
    assert_eq!(*stages.lock(), ["bootstrap", "route", "finish"]);
}

#[test]
fn quiet_pipeline_keeps_bootstrap_response() {
    init_tracing();
    let mut app = Application::init_with(AppConfig::default(), with_router(MatchAllRouter)).unwrap();
    let stages = record_stages(app.events());

    let outcome = app.run().unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    // No listener produced a response, so the bootstrap-assigned console
    // response is the final one.
    assert_eq!(app.response().unwrap().content(), "");
    // The route match fed the event params.
    assert_eq!(app.event().param("controller"), Some(&json!("index")));
    assert_eq!(
        *stages.lock(),
        ["bootstrap", "route", "dispatch", "render", "finish"]
    );
}

#[test]
fn render_transforms_the_response_in_place() {
    init_tracing();
    let mut app = Application::init_with(AppConfig::default(), with_router(MatchAllRouter)).unwrap();

    app.events().attach(
        "render",
        |event: &mut Event| -> Result<Reaction, ListenerError> {
            if let Some(response) = event.response() {
                let action = event
                    .param("action")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown")
                    .to_string();
                response.set_content(format!("rendered: {action}"));
            }
            Ok(Reaction::Continue)
        },
        0,
    );

    let outcome = app.run().unwrap();
    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(app.response().unwrap().content(), "rendered: show");
}

#[test]
fn cleared_response_is_distinct_from_empty() {
    init_tracing();
    let mut app = Application::init_with(AppConfig::default(), with_router(MatchAllRouter)).unwrap();

    app.events().attach(
        "render",
        |event: &mut Event| -> Result<Reaction, ListenerError> {
            event.clear_response();
            Ok(Reaction::Continue)
        },
        0,
    );

    let outcome = app.run().unwrap();
    assert_eq!(outcome, RunOutcome::Completed);
    // "No response produced" is a real state, not an empty body.
    assert!(app.response().is_none());
}

#[test]
fn aborting_listener_fails_the_run() {
    init_tracing();
    let mut app = Application::init_with(AppConfig::default(), with_router(MatchAllRouter)).unwrap();

    app.events().attach(
        "dispatch",
        |_: &mut Event| -> Result<Reaction, ListenerError> {
            Err(ListenerError::abort("handler panicked"))
        },
        0,
    );

    let err = app.run().unwrap_err();
    assert!(matches!(err, axle_app::AppError::Event(_)));
}

#[test]
fn shared_registry_listener_targets_the_application() {
    init_tracing();
    let mut app = Application::init_with(AppConfig::default(), with_router(MatchAllRouter)).unwrap();

    let registry = app
        .container()
        .resolve_as::<SharedRegistry>("SharedRegistry")
        .unwrap();
    let fired = Arc::new(Mutex::new(0usize));
    let probe = Arc::clone(&fired);
    registry.attach(
        "Application",
        "finish",
        move |_: &mut Event| -> Result<Reaction, ListenerError> {
            *probe.lock() += 1;
            Ok(Reaction::Continue)
        },
        0,
    );

    app.run().unwrap();
    assert_eq!(*fired.lock(), 1);
}

/// Aggregate that stamps a param during bootstrap, standing in for a
/// host-configured listener service.
struct StampListener {
    tokens: Mutex<Vec<ListenerToken>>,
}

impl StampListener {
    fn new() -> Self {
        Self {
            tokens: Mutex::new(Vec::new()),
        }
    }
}

impl ListenerAggregate for StampListener {
    fn attach(&self, bus: &EventBus) {
        let token = bus.attach(
            "bootstrap",
            |event: &mut Event| -> Result<Reaction, ListenerError> {
                event.set_param("stamped", json!(true));
                Ok(Reaction::Continue)
            },
            0,
        );
        self.tokens.lock().push(token);
    }

    fn detach(&self, bus: &EventBus) {
        for token in self.tokens.lock().drain(..) {
            bus.detach(&token);
        }
    }
}

impl Service for StampListener {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn as_listener_aggregate(&self) -> Option<&dyn ListenerAggregate> {
        Some(self)
    }
}

#[test]
fn configured_listener_service_attaches_at_bootstrap() {
    init_tracing();
    let config = AppConfig {
        listeners: vec!["StampListener".into()],
        ..AppConfig::default()
    };
    let overrides = with_router(MatchAllRouter)
        .merge(ContainerConfig::new().factory("StampListener", |_: &ServiceContainer| {
            Ok(StampListener::new())
        }));
    let mut app = Application::init_with(config, overrides).unwrap();

    app.run().unwrap();
    assert_eq!(app.event().param("stamped"), Some(&json!(true)));
}

#[test]
fn one_event_threads_every_stage() {
    init_tracing();
    let mut app = Application::init_with(AppConfig::default(), with_router(MatchAllRouter)).unwrap();

    // Each stage appends to the same param: stage N sees what N-1 wrote.
    for stage in ["bootstrap", "route", "dispatch", "render"] {
        app.events().attach(
            stage,
            move |event: &mut Event| -> Result<Reaction, ListenerError> {
                let mut trail: Vec<serde_json::Value> = event
                    .param("trail")
                    .and_then(|v| v.as_array())
                    .cloned()
                    .unwrap_or_default();
                trail.push(json!(event.name()));
                event.set_param("trail", json!(trail));
                Ok(Reaction::Continue)
            },
            -100,
        );
    }

    app.run().unwrap();
    assert_eq!(
        app.event().param("trail"),
        Some(&json!(["bootstrap", "route", "dispatch", "render"]))
    );
}
