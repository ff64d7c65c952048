use async_trait::async_trait;
use marketio::application::flows::{ParkingSelection, VignetteSelection};
use marketio::application::ledger::{Ledger, VEHICLES_KEY};
use marketio::application::wizard::{Position, Progress, Wizard};
use marketio::domain::catalog::{ParkingCity, ParkingDuration, VignetteCountry};
use marketio::domain::envelope::{ErrorCode, Response};
use marketio::domain::ports::{GeneratorBox, KeyValueStore, ServiceBox, VerticalService};
use marketio::domain::purchase::{ParkingReceipt, ParkingRequest};
use marketio::domain::records::VehicleKind;
use marketio::domain::vertical::{Parking, Vignettes};
use marketio::error::MarketError;
use marketio::infrastructure::artifacts::SeededArtifacts;
use marketio::infrastructure::in_memory::InMemoryStore;
use marketio::infrastructure::mock::{MockServices, data};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn generator() -> GeneratorBox {
    Arc::new(SeededArtifacts::new(11))
}

fn ledger() -> Ledger {
    Ledger::new(Arc::new(InMemoryStore::new()), generator())
}

fn mocks() -> MockServices {
    MockServices::new(generator(), Duration::ZERO)
}

fn city(id: &str) -> ParkingCity {
    data::cities().into_iter().find(|c| c.id == id).unwrap()
}

fn country(id: &str) -> VignetteCountry {
    data::countries().into_iter().find(|c| c.id == id).unwrap()
}

fn two_hours() -> ParkingDuration {
    data::parking_durations().into_iter().find(|d| d.minutes == 120).unwrap()
}

/// Walks a parking wizard up to review.
fn fill_parking(wizard: &mut Wizard<Parking>) {
    let zagreb = city("zagreb");
    let zone = zagreb.zone("zg-z2").unwrap().clone();
    wizard.advance(ParkingSelection::City(zagreb)).unwrap();
    wizard.advance(ParkingSelection::Zone(zone)).unwrap();
    wizard.advance(ParkingSelection::Plate("ZG1234AB".into())).unwrap();
    wizard.advance(ParkingSelection::Duration(two_hours())).unwrap();
}

/// Sleeps through the first `slow` purchases, then delegates.
struct Stalling {
    inner: ServiceBox<Parking>,
    slow: usize,
    calls: AtomicUsize,
}

#[async_trait]
impl VerticalService<Parking> for Stalling {
    async fn fetch_catalog(&self, filter: Option<&str>) -> Response<Vec<ParkingCity>> {
        self.inner.fetch_catalog(filter).await
    }

    async fn purchase(&self, request: ParkingRequest) -> Response<ParkingReceipt> {
        if self.calls.fetch_add(1, Ordering::SeqCst) < self.slow {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        self.inner.purchase(request).await
    }
}

/// Fails the first purchase with a network error, then delegates.
struct FailOnce {
    inner: ServiceBox<Parking>,
    calls: AtomicUsize,
}

#[async_trait]
impl VerticalService<Parking> for FailOnce {
    async fn fetch_catalog(&self, filter: Option<&str>) -> Response<Vec<ParkingCity>> {
        self.inner.fetch_catalog(filter).await
    }

    async fn purchase(&self, request: ParkingRequest) -> Response<ParkingReceipt> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Response::err(ErrorCode::NetworkError, "connection reset");
        }
        self.inner.purchase(request).await
    }
}

/// Counts purchase calls before delegating.
struct Counting {
    inner: ServiceBox<Parking>,
    calls: AtomicUsize,
}

#[async_trait]
impl VerticalService<Parking> for Counting {
    async fn fetch_catalog(&self, filter: Option<&str>) -> Response<Vec<ParkingCity>> {
        self.inner.fetch_catalog(filter).await
    }

    async fn purchase(&self, request: ParkingRequest) -> Response<ParkingReceipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.purchase(request).await
    }
}

#[test]
fn test_advance_gates_on_valid_selection() {
    let mut wizard = Wizard::<Parking>::new(mocks().parking, ledger());
    assert_eq!(wizard.position(), Position::Step("city"));

    let err = wizard.advance(ParkingSelection::Plate("ZG1234AB".into()));
    assert!(matches!(err, Err(MarketError::InvalidState(_))));
    assert_eq!(wizard.position(), Position::Step("city"));
    assert!(wizard.last_error().is_some());

    wizard.advance(ParkingSelection::City(city("zagreb"))).unwrap();
    assert_eq!(wizard.position(), Position::Step("zone"));
    assert!(wizard.last_error().is_none());
    assert_eq!(wizard.progress(), Progress { completed: 1, total: 4 });

    let foreign = city("split").zones.remove(0);
    assert!(wizard.advance(ParkingSelection::Zone(foreign)).is_err());
    assert_eq!(wizard.position(), Position::Step("zone"));
    assert!(!wizard.can_submit());
}

#[test]
fn test_retreat_clears_current_and_later_steps() {
    let mut wizard = Wizard::<Parking>::new(mocks().parking, ledger());
    fill_parking(&mut wizard);
    assert_eq!(wizard.position(), Position::Review);
    assert!(wizard.can_submit());

    assert_eq!(wizard.retreat(), Position::Step("duration"));
    assert!(wizard.draft().duration.is_none());
    assert_eq!(wizard.retreat(), Position::Step("plate"));
    assert!(wizard.draft().plate.is_none());
    assert!(wizard.draft().zone.is_some());
    assert!(!wizard.can_submit());

    wizard.retreat();
    wizard.retreat();
    assert_eq!(wizard.retreat(), Position::Step("city"));
    assert!(wizard.draft().city.is_none());
}

#[test]
fn test_single_vehicle_country_skips_vehicle_step() {
    let mut wizard = Wizard::<Vignettes>::new(mocks().vignettes, ledger());
    wizard
        .advance(VignetteSelection::Country(country("switzerland")))
        .unwrap();
    assert_eq!(wizard.position(), Position::Step("duration"));
    assert!(wizard.is_skipped("vehicle"));
    assert_eq!(wizard.draft().vehicle.as_ref().map(|v| v.id.as_str()), Some("car"));

    // Going back from duration passes over the filled step.
    assert_eq!(wizard.retreat(), Position::Step("country"));
    assert!(wizard.draft().vehicle.is_none());
    assert!(!wizard.is_skipped("vehicle"));

    wizard
        .advance(VignetteSelection::Country(country("slovenia")))
        .unwrap();
    assert_eq!(wizard.position(), Position::Step("vehicle"));
}

#[tokio::test]
async fn test_submit_records_and_prompts_for_unsaved_plate() {
    let ledger = ledger();
    let mut wizard = Wizard::<Parking>::new(mocks().parking, ledger.clone());
    fill_parking(&mut wizard);

    let completion = wizard.submit().await.unwrap();
    assert_eq!(completion.receipt.amount.to_string(), "2.20");
    assert_eq!(completion.save_vehicle_prompt.as_deref(), Some("ZG1234AB"));
    assert_eq!(wizard.position(), Position::Done);

    let history = ledger.transactions().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].title, "Parking - Zone 2 - Centre");

    assert!(matches!(
        wizard.advance(ParkingSelection::City(city("pula"))),
        Err(MarketError::InvalidState(_))
    ));
    wizard.reset();
    assert_eq!(wizard.position(), Position::Step("city"));
}

#[tokio::test]
async fn test_saved_plate_is_not_prompted() {
    let ledger = ledger();
    ledger
        .save_vehicle("zg1234ab", Some("Mine"), VehicleKind::Car)
        .await
        .unwrap();

    let mut wizard = Wizard::<Parking>::new(mocks().parking, ledger);
    fill_parking(&mut wizard);
    let completion = wizard.submit().await.unwrap();
    assert_eq!(completion.save_vehicle_prompt, None);
}

#[tokio::test]
async fn test_timeout_is_reported_and_retryable() {
    let ledger = ledger();
    let service = Arc::new(Stalling {
        inner: mocks().parking,
        slow: 1,
        calls: AtomicUsize::new(0),
    });
    let mut wizard = Wizard::<Parking>::new(service, ledger.clone())
        .with_timeout(Duration::from_millis(50));
    fill_parking(&mut wizard);

    let err = wizard.submit().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Timeout);
    assert_eq!(wizard.position(), Position::Review);
    assert_eq!(wizard.last_error().map(|e| e.code), Some(ErrorCode::Timeout));
    assert!(ledger.transactions().await.unwrap().is_empty());

    assert!(wizard.submit().await.is_ok());
    assert_eq!(wizard.position(), Position::Done);
    assert_eq!(ledger.transactions().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_purchase_keeps_draft() {
    let ledger = ledger();
    let service = Arc::new(FailOnce {
        inner: mocks().parking,
        calls: AtomicUsize::new(0),
    });
    let mut wizard = Wizard::<Parking>::new(service, ledger.clone());
    fill_parking(&mut wizard);

    let err = wizard.submit().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NetworkError);
    assert!(wizard.can_submit());
    assert_eq!(wizard.draft().plate.as_deref(), Some("ZG1234AB"));
    assert!(ledger.transactions().await.unwrap().is_empty());

    wizard.submit().await.unwrap();
    assert_eq!(ledger.transactions().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_incomplete_draft_never_reaches_service() {
    let service = Arc::new(Counting {
        inner: mocks().parking,
        calls: AtomicUsize::new(0),
    });
    let ledger = ledger();
    let mut wizard = Wizard::<Parking>::new(service.clone(), ledger.clone());
    wizard
        .advance(ParkingSelection::City(city("zagreb")))
        .unwrap();

    let err = wizard.submit().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    assert_eq!(wizard.position(), Position::Step("zone"));
    assert!(ledger.transactions().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unreadable_vehicles_do_not_fail_purchase() {
    let store = Arc::new(InMemoryStore::new());
    store
        .set(VEHICLES_KEY, "not json".to_string())
        .await
        .unwrap();
    let ledger = Ledger::new(store, generator());
    let mut wizard = Wizard::<Parking>::new(mocks().parking, ledger.clone());
    fill_parking(&mut wizard);

    let completion = wizard.submit().await.unwrap();
    assert_eq!(completion.save_vehicle_prompt, None);
    assert_eq!(wizard.position(), Position::Done);
    assert_eq!(ledger.transactions().await.unwrap().len(), 1);

    // A completed wizard refuses a second submit, so nothing is recorded twice.
    assert!(wizard.submit().await.is_err());
    assert_eq!(ledger.transactions().await.unwrap().len(), 1);
}
