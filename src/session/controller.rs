//! Session controller: the state machine tying model, map, persistence and
//! presentation together.

use thiserror::Error;
use uuid::Uuid;

use crate::location::LocationProvider;
use crate::map::{MapGateway, MapWidget, DEFAULT_ZOOM};
use crate::session::form::{FormInput, ValidationError};
use crate::session::view::SessionView;
use crate::storage::keyvalue::StorageService;
use crate::storage::persistence::PersistenceGateway;
use crate::workouts::store::WorkoutStore;
use crate::workouts::types::{LatLng, Workout, WorkoutKind};

/// Where the session currently is.
///
/// `MapReady` doubles as "form hidden": a click moves to `FormShown`, a
/// successful submit moves back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    /// Waiting for the one-shot location fix; no map view exists
    AwaitingLocation,
    /// Map view is live, form hidden
    MapReady,
    /// Form is open for the workout to be recorded at `coords`
    FormShown {
        /// Coordinates captured from the initiating map click
        coords: LatLng,
    },
}

/// Session-level failures. None of these are fatal; the worst outcome is a
/// map-less but still list-viewable session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Form input violated the validation rules
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Submit arrived while no form was open
    #[error("No workout form is open")]
    NoFormOpen,
}

/// Orchestrates startup, form lifecycle, workout creation and rendering.
///
/// Owns the store exclusively; the map gateway, persistence gateway and view
/// only ever see individual workouts or read-only slices. All methods run on
/// the single controller thread, reacting to host-delivered events.
pub struct SessionController<W: MapWidget, S: StorageService, V: SessionView> {
    state: SessionState,
    store: WorkoutStore,
    map: MapGateway<W>,
    persistence: PersistenceGateway<S>,
    view: V,
}

impl<W: MapWidget, S: StorageService, V: SessionView> SessionController<W, S, V> {
    /// Build a controller around the injected collaborators.
    pub fn new(widget: W, storage: S, view: V) -> Self {
        Self {
            state: SessionState::AwaitingLocation,
            store: WorkoutStore::new(),
            map: MapGateway::new(widget),
            persistence: PersistenceGateway::new(storage),
            view,
        }
    }

    /// Start the session: rehydrate history, then attempt one location fix.
    ///
    /// Rehydrated workouts are rendered into the list before the fix is
    /// requested, so the history is readable even when the sensor fails.
    /// Their markers are deferred until the map view exists. The fix is
    /// requested exactly once; on failure the session stays in
    /// [`SessionState::AwaitingLocation`] with map features unavailable.
    pub fn bootstrap(&mut self, provider: &mut impl LocationProvider) {
        let restored = self.persistence.load();
        for workout in &restored {
            self.view.render_entry(workout);
        }
        if !restored.is_empty() {
            tracing::info!("Restored {} workouts from history", restored.len());
        }
        self.store.replace_all(restored);

        match provider.current_position() {
            Ok(fix) => {
                self.map.initialize(fix, DEFAULT_ZOOM);
                for workout in self.store.all() {
                    self.map.place_marker(
                        workout.coords,
                        &popup_text(workout),
                        marker_style(workout.kind()),
                    );
                }
                self.state = SessionState::MapReady;
            }
            Err(e) => {
                tracing::warn!("Location fix failed: {e}");
                self.view.show_notice("Could not get your position");
            }
        }
    }

    /// A click landed on the map: capture its coordinates and open the form.
    /// Ignored while no map view exists.
    pub fn handle_map_click(&mut self, coords: LatLng) {
        if self.state == SessionState::AwaitingLocation {
            tracing::debug!("Map click before map is ready, ignoring");
            return;
        }
        self.state = SessionState::FormShown { coords };
        self.view.show_form();
    }

    /// The activity-kind selector changed: swap the kind-specific form row.
    pub fn handle_kind_change(&mut self) {
        self.view.toggle_kind_fields();
    }

    /// The form was submitted. Validates, then records the workout at the
    /// click-time coordinates, renders it, closes the form and persists the
    /// whole store.
    ///
    /// Rejected input leaves the form open and the state unchanged.
    pub fn handle_submit(&mut self, input: FormInput) -> Result<(), SessionError> {
        let SessionState::FormShown { coords } = self.state else {
            return Err(SessionError::NoFormOpen);
        };

        if let Err(e) = input.validate() {
            tracing::debug!("Rejected form input: {e}");
            self.view.show_notice(&e.to_string());
            return Err(e.into());
        }

        let workout = match input.kind {
            WorkoutKind::Running => Workout::running(
                coords,
                input.distance_km,
                input.duration_min,
                input.cadence_spm,
            ),
            WorkoutKind::Cycling => Workout::cycling(
                coords,
                input.distance_km,
                input.duration_min,
                input.elevation_gain_m,
            ),
        };

        tracing::info!("Recorded {} at {}", workout.description, workout.coords);
        self.map
            .place_marker(workout.coords, &popup_text(&workout), marker_style(workout.kind()));
        self.view.render_entry(&workout);
        self.store.append(workout);
        self.view.hide_form();
        self.persistence.save(self.store.all());
        self.state = SessionState::MapReady;
        Ok(())
    }

    /// A list entry was clicked: center the map on its workout. A stale or
    /// foreign id is silently ignored.
    pub fn handle_entry_click(&mut self, id: Uuid) {
        match self.store.find_by_id(id) {
            Some(workout) => self.map.center_on(workout.coords, DEFAULT_ZOOM),
            None => tracing::debug!("List entry {id} not in store, ignoring"),
        }
    }

    /// Drop the persisted history and return to the pre-bootstrap state.
    /// The host is expected to start the session over afterwards.
    pub fn reset(&mut self) {
        self.persistence.clear();
        self.store.replace_all(Vec::new());
        self.state = SessionState::AwaitingLocation;
        tracing::info!("Session reset");
    }

    /// Current state-machine position.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Read-only ordered view of the recorded workouts.
    pub fn workouts(&self) -> &[Workout] {
        self.store.all()
    }

    /// Mutable access to the map gateway, for the widget integration to
    /// register and feed the click handler.
    pub fn map_mut(&mut self) -> &mut MapGateway<W> {
        &mut self.map
    }
}

/// Marker popup body: the kind's glyph plus the frozen description.
fn popup_text(workout: &Workout) -> String {
    let glyph = match workout.kind() {
        WorkoutKind::Running => "🏃",
        WorkoutKind::Cycling => "🚴",
    };
    format!("{glyph} {}", workout.description)
}

/// Popup style class, keyed by kind.
fn marker_style(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "running-popup",
        WorkoutKind::Cycling => "cycling-popup",
    }
}
