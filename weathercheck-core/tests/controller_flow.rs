//! End-to-end controller tests: store + effect handler + task manager
//! against mock providers.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc;
use weathercheck_core::api::{ForecastClient, GeocodeClient};
use weathercheck_core::{
    reducer, Action, Coordinates, EffectHandler, FixedLocator, Locator, NoLocator, Status, Store,
    TaskManager,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    store: Store,
    tasks: TaskManager,
    handler: EffectHandler,
    rx: mpsc::UnboundedReceiver<Action>,
}

impl Harness {
    fn new(server: &MockServer, locator: Arc<dyn Locator>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let timeout = Duration::from_secs(2);
        let handler = EffectHandler::new(
            locator,
            ForecastClient::new(format!("{}/forecast", server.uri()), timeout).expect("client"),
            GeocodeClient::new(format!("{}/reverse", server.uri()), timeout).expect("client"),
        );
        Self {
            store: Store::new(Default::default(), reducer),
            tasks: TaskManager::new(tx),
            handler,
            rx,
        }
    }

    fn dispatch(&mut self, action: Action) {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.handler.handle(effect, &mut self.tasks);
        }
    }

    /// Feed task results back into the store until `done` holds or nothing
    /// arrives for a while.
    async fn pump_until(&mut self, done: impl Fn(&Store) -> bool) {
        while !done(&self.store) {
            match tokio::time::timeout(Duration::from_secs(3), self.rx.recv()).await {
                Ok(Some(action)) => self.dispatch(action),
                _ => break,
            }
        }
    }

    /// Drain whatever arrives within `window`.
    async fn settle(&mut self, window: Duration) {
        while let Ok(Some(action)) = tokio::time::timeout(window, self.rx.recv()).await {
            self.dispatch(action);
        }
    }
}

fn london_forecast() -> serde_json::Value {
    json!({
        "hourly": {
            "time": ["2024-01-01T00:00", "2024-01-01T01:00"],
            "temperature_2m": [10, 11],
            "precipitation_probability": [5, 6]
        }
    })
}

async fn mount_forecast(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_place(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn locate_then_forecast_and_place() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(london_forecast())).await;
    mount_place(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "countryName": "United Kingdom", "city": "London" })),
    )
    .await;

    let mut h = Harness::new(
        &server,
        Arc::new(FixedLocator(Coordinates::new(51.5, -0.12))),
    );
    h.dispatch(Action::LocateRequest);
    assert!(h.store.state().is_loading());

    h.pump_until(|s| s.state().status == Status::Ready && !s.state().place.is_empty())
        .await;

    let state = h.store.state();
    assert_eq!(state.coordinates, Some(Coordinates::new(51.5, -0.12)));
    assert_eq!(state.temperatures_today, vec![Some(10.0), Some(11.0)]);
    assert_eq!(state.precipitation_probabilities, vec![Some(5.0), Some(6.0)]);
    assert_eq!(state.place.city, "London");
    assert_eq!(state.place.country, "United Kingdom");
}

#[tokio::test]
async fn forecast_failure_sets_generic_message() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(500)).await;
    mount_place(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "countryName": "Peru", "locality": "Cusco" })),
    )
    .await;

    let mut h = Harness::new(&server, Arc::new(FixedLocator(Coordinates::new(-13.5, -71.9))));
    h.dispatch(Action::LocateRequest);
    h.pump_until(|s| s.state().error().is_some()).await;
    h.settle(Duration::from_millis(200)).await;

    let state = h.store.state();
    assert_eq!(
        state.status,
        Status::Failed("Failed to fetch weather data".into())
    );
    // place still lands and leaves the error in place
    assert_eq!(state.place.city, "Cusco");
}

#[tokio::test]
async fn place_failure_is_silent() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(london_forecast())).await;
    mount_place(&server, ResponseTemplate::new(502)).await;

    let mut h = Harness::new(&server, Arc::new(FixedLocator(Coordinates::new(51.5, -0.12))));
    h.dispatch(Action::LocateRequest);
    h.pump_until(|s| s.state().status == Status::Ready).await;
    h.settle(Duration::from_millis(200)).await;

    let state = h.store.state();
    assert_eq!(state.status, Status::Ready);
    assert!(state.place.is_empty());
}

#[tokio::test]
async fn unsupported_locator_fails_without_fetching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut h = Harness::new(&server, Arc::new(NoLocator));
    h.dispatch(Action::LocateRequest);
    h.pump_until(|s| s.state().error().is_some()).await;

    let state = h.store.state();
    assert_eq!(
        state.error(),
        Some("Geolocation not supported by your browser")
    );
    assert_eq!(state.coordinates, None);
}

#[tokio::test]
async fn new_location_supersedes_slow_fetch() {
    let server = MockServer::start().await;
    mount_forecast(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(london_forecast())
            .set_delay(Duration::from_millis(300)),
    )
    .await;
    mount_place(&server, ResponseTemplate::new(404)).await;

    let mut h = Harness::new(&server, Arc::new(NoLocator));
    h.dispatch(Action::LocationDidResolve(Coordinates::new(1.0, 1.0)));
    h.dispatch(Action::LocationDidResolve(Coordinates::new(2.0, 2.0)));
    assert_eq!(h.store.state().generation, 2);

    h.pump_until(|s| s.state().status == Status::Ready).await;
    h.settle(Duration::from_millis(400)).await;

    let state = h.store.state();
    assert_eq!(state.coordinates, Some(Coordinates::new(2.0, 2.0)));
    assert_eq!(state.status, Status::Ready);
    assert!(!h.tasks.is_running(weathercheck_core::TaskKey::Forecast));
}
