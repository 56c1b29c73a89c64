//! Integration tests for the full session flow: bootstrap, click, submit,
//! rehydration, list clicks and reset.

use std::sync::{Arc, Mutex};

use waymark::location::StaticLocationProvider;
use waymark::map::DEFAULT_ZOOM;
use waymark::session::{FormInput, SessionError, SessionState, ValidationError};
use waymark::storage::{PersistenceGateway, StorageService, STORAGE_KEY};
use waymark::workouts::types::{LatLng, Workout, WorkoutDetails};
use waymark::{SessionController, WorkoutKind};

use crate::mocks::{
    FailingLocationProvider, MapCall, RecordingMapWidget, RecordingView, SharedStorage, ViewEvent,
};

type TestController = SessionController<RecordingMapWidget, SharedStorage, RecordingView>;
type Log<T> = Arc<Mutex<Vec<T>>>;

fn new_session(storage: SharedStorage) -> (TestController, Log<MapCall>, Log<ViewEvent>) {
    let (widget, map_calls) = RecordingMapWidget::new();
    let (view, view_events) = RecordingView::new();
    let controller = SessionController::new(widget, storage, view);
    (controller, map_calls, view_events)
}

fn running_input(distance_km: f64, duration_min: f64, cadence_spm: f64) -> FormInput {
    FormInput {
        kind: WorkoutKind::Running,
        distance_km,
        duration_min,
        cadence_spm,
        elevation_gain_m: f64::NAN,
    }
}

#[test]
fn test_click_then_submit_records_running_workout() {
    let (mut controller, map_calls, view_events) = new_session(SharedStorage::new());
    let mut provider = StaticLocationProvider::new(LatLng::new(51.5, -0.12));
    controller.bootstrap(&mut provider);
    assert_eq!(controller.state(), SessionState::MapReady);

    let click = LatLng::new(-37.8, 144.9);
    controller.handle_map_click(click);
    assert_eq!(controller.state(), SessionState::FormShown { coords: click });
    assert!(view_events.lock().unwrap().contains(&ViewEvent::FormShown));

    controller
        .handle_submit(running_input(5.2, 24.0, 178.0))
        .expect("Should accept valid input");

    // One running entry with the derived pace, at the click coordinates.
    assert_eq!(controller.workouts().len(), 1);
    let workout = &controller.workouts()[0];
    assert_eq!(workout.kind(), WorkoutKind::Running);
    assert_eq!(workout.coords, click);
    let WorkoutDetails::Running {
        pace_min_per_km, ..
    } = workout.details
    else {
        panic!("Expected running details");
    };
    assert!((pace_min_per_km - 4.615).abs() < 1e-3);
    assert!(workout.description.starts_with("Running on "));

    // Marker placed at the click-time coordinates with the running style.
    let markers: Vec<_> = map_calls
        .lock()
        .unwrap()
        .iter()
        .filter(|c| matches!(c, MapCall::AddMarker { .. }))
        .cloned()
        .collect();
    assert_eq!(markers.len(), 1);
    let MapCall::AddMarker { at, style, .. } = &markers[0] else {
        unreachable!()
    };
    assert_eq!(*at, click);
    assert_eq!(style, "running-popup");

    // List entry rendered, form closed, back to MapReady.
    let events = view_events.lock().unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, ViewEvent::Entry { id, .. } if *id == workout.id)));
    assert!(events.contains(&ViewEvent::FormHidden));
    drop(events);
    assert_eq!(controller.state(), SessionState::MapReady);
}

#[test]
fn test_submit_persists_whole_store() {
    let storage = SharedStorage::new();
    let (mut controller, _map_calls, _view_events) = new_session(storage.clone());
    let mut provider = StaticLocationProvider::new(LatLng::new(0.0, 0.0));
    controller.bootstrap(&mut provider);

    controller.handle_map_click(LatLng::new(1.0, 1.0));
    controller
        .handle_submit(running_input(5.0, 25.0, 170.0))
        .expect("Should accept valid input");

    let persisted = PersistenceGateway::new(storage).load();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].id, controller.workouts()[0].id);
}

#[test]
fn test_sensor_failure_degrades_to_list_only() {
    // Seed a prior session's history.
    let storage = SharedStorage::new();
    let history = vec![
        Workout::running(LatLng::new(-37.8, 144.9), 5.2, 24.0, 178.0),
        Workout::cycling(LatLng::new(27.9, 86.9), 27.0, 95.0, 523.0),
    ];
    PersistenceGateway::new(storage.clone()).save(&history);

    let (mut controller, map_calls, view_events) = new_session(storage);
    controller.bootstrap(&mut FailingLocationProvider);

    // Failure notice shown, no map calls at all.
    assert_eq!(controller.state(), SessionState::AwaitingLocation);
    assert!(map_calls.lock().unwrap().is_empty());
    assert!(view_events
        .lock()
        .unwrap()
        .contains(&ViewEvent::Notice("Could not get your position".to_string())));

    // History still rendered into the list.
    let entries = view_events
        .lock()
        .unwrap()
        .iter()
        .filter(|e| matches!(e, ViewEvent::Entry { .. }))
        .count();
    assert_eq!(entries, 2);
    assert_eq!(controller.workouts().len(), 2);

    // Map-dependent features stay unavailable: clicks are ignored.
    controller.handle_map_click(LatLng::new(0.0, 0.0));
    assert_eq!(controller.state(), SessionState::AwaitingLocation);
    assert!(!view_events.lock().unwrap().contains(&ViewEvent::FormShown));
}

#[test]
fn test_rehydrated_markers_wait_for_map_init() {
    let storage = SharedStorage::new();
    let history = vec![Workout::running(LatLng::new(-37.8, 144.9), 5.2, 24.0, 178.0)];
    PersistenceGateway::new(storage.clone()).save(&history);

    let (mut controller, map_calls, _view_events) = new_session(storage);
    let mut provider = StaticLocationProvider::new(LatLng::new(51.5, -0.12));
    controller.bootstrap(&mut provider);

    // The view is created first; the restored workout's marker follows it.
    let calls = map_calls.lock().unwrap();
    assert!(matches!(calls[0], MapCall::InitView(..)));
    assert!(matches!(
        calls[1],
        MapCall::AddMarker { at, .. } if at == LatLng::new(-37.8, 144.9)
    ));
}

#[test]
fn test_submits_append_in_order_with_unique_ids() {
    let (mut controller, _map_calls, _view_events) = new_session(SharedStorage::new());
    let mut provider = StaticLocationProvider::new(LatLng::new(0.0, 0.0));
    controller.bootstrap(&mut provider);

    for i in 0..3 {
        let coords = LatLng::new(f64::from(i), f64::from(i));
        controller.handle_map_click(coords);
        controller
            .handle_submit(running_input(5.0 + f64::from(i), 25.0, 170.0))
            .expect("Should accept valid input");
    }

    let workouts = controller.workouts();
    assert_eq!(workouts.len(), 3);
    for (i, workout) in workouts.iter().enumerate() {
        assert_eq!(workout.distance_km, 5.0 + i as f64);
    }
    let mut ids: Vec<_> = workouts.iter().map(|w| w.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_invalid_submit_keeps_form_open() {
    let (mut controller, map_calls, view_events) = new_session(SharedStorage::new());
    let mut provider = StaticLocationProvider::new(LatLng::new(0.0, 0.0));
    controller.bootstrap(&mut provider);

    let click = LatLng::new(2.0, 3.0);
    controller.handle_map_click(click);

    let result = controller.handle_submit(running_input(-3.0, 24.0, 178.0));
    assert_eq!(
        result,
        Err(SessionError::Validation(ValidationError::NotPositive {
            field: "Distance"
        }))
    );

    // Notice surfaced, nothing recorded, form still open.
    assert!(view_events
        .lock()
        .unwrap()
        .iter()
        .any(|e| matches!(e, ViewEvent::Notice(_))));
    assert!(controller.workouts().is_empty());
    assert_eq!(controller.state(), SessionState::FormShown { coords: click });
    assert!(!view_events.lock().unwrap().contains(&ViewEvent::FormHidden));
    assert!(!map_calls
        .lock()
        .unwrap()
        .iter()
        .any(|c| matches!(c, MapCall::AddMarker { .. })));
}

#[test]
fn test_submit_without_open_form_is_rejected() {
    let (mut controller, _map_calls, _view_events) = new_session(SharedStorage::new());
    let mut provider = StaticLocationProvider::new(LatLng::new(0.0, 0.0));
    controller.bootstrap(&mut provider);

    let result = controller.handle_submit(running_input(5.0, 25.0, 170.0));
    assert_eq!(result, Err(SessionError::NoFormOpen));
    assert!(controller.workouts().is_empty());
}

#[test]
fn test_entry_click_recenters_on_workout() {
    let (mut controller, map_calls, _view_events) = new_session(SharedStorage::new());
    let mut provider = StaticLocationProvider::new(LatLng::new(0.0, 0.0));
    controller.bootstrap(&mut provider);

    let click = LatLng::new(-37.8, 144.9);
    controller.handle_map_click(click);
    controller
        .handle_submit(running_input(5.2, 24.0, 178.0))
        .expect("Should accept valid input");
    let id = controller.workouts()[0].id;

    controller.handle_entry_click(id);
    assert!(map_calls
        .lock()
        .unwrap()
        .contains(&MapCall::FlyTo(click, DEFAULT_ZOOM)));
}

#[test]
fn test_entry_click_with_unknown_id_is_ignored() {
    let (mut controller, map_calls, _view_events) = new_session(SharedStorage::new());
    let mut provider = StaticLocationProvider::new(LatLng::new(0.0, 0.0));
    controller.bootstrap(&mut provider);

    controller.handle_entry_click(uuid::Uuid::new_v4());
    assert!(!map_calls
        .lock()
        .unwrap()
        .iter()
        .any(|c| matches!(c, MapCall::FlyTo(..))));
}

#[test]
fn test_kind_change_toggles_fields_without_state_change() {
    let (mut controller, _map_calls, view_events) = new_session(SharedStorage::new());
    let mut provider = StaticLocationProvider::new(LatLng::new(0.0, 0.0));
    controller.bootstrap(&mut provider);

    controller.handle_map_click(LatLng::new(1.0, 1.0));
    let state = controller.state();
    controller.handle_kind_change();

    assert!(view_events.lock().unwrap().contains(&ViewEvent::FieldsToggled));
    assert_eq!(controller.state(), state);
}

#[test]
fn test_reset_clears_history_and_restarts() {
    let storage = SharedStorage::new();
    let (mut controller, _map_calls, _view_events) = new_session(storage.clone());
    let mut provider = StaticLocationProvider::new(LatLng::new(0.0, 0.0));
    controller.bootstrap(&mut provider);

    controller.handle_map_click(LatLng::new(1.0, 1.0));
    controller
        .handle_submit(running_input(5.0, 25.0, 170.0))
        .expect("Should accept valid input");
    assert!(storage.get(STORAGE_KEY).is_some());

    controller.reset();

    assert!(storage.get(STORAGE_KEY).is_none());
    assert!(controller.workouts().is_empty());
    assert_eq!(controller.state(), SessionState::AwaitingLocation);
}
