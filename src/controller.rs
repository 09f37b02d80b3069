//! Workout Controller - turns form submissions into stored workouts
//!
//! One interaction at a time:
//!
//! ```text
//! Idle ──begin_entry──> AwaitingInput ──create──> Validating ─┬─> Committed ─> Idle
//!                                                             └─> Rejected  ─> Idle (+ alert)
//! ```
//!
//! Creation is refused until the reference location has arrived, since
//! the map cannot show anything before then.

use std::fmt;

use tracing::{debug, info, warn};

use crate::kv::KvStore;
use crate::render::{marker_label, marker_text, AlertSink, ListEntry, ListSink, MapSink};
use crate::store::{ReloadReport, WorkoutStore};
use crate::validate::{validate, RawWorkoutInput};
use crate::workout::{
    CalendarZone, Clock, Coordinates, IdGenerator, Locale, SystemClock, TimestampIdGenerator,
    Workout, WorkoutKind,
};
use crate::{Error, Result};

/// Where the current creation interaction stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionState {
    /// No form open
    Idle,
    /// Form open for a clicked map position
    AwaitingInput {
        /// Clicked position
        at: Coordinates,
    },
    /// Submission being checked
    Validating,
}

/// How the last submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Workout stored
    Committed,
    /// Input refused, store untouched
    Rejected,
}

/// A committed workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Created {
    /// The new record, ready to render
    pub workout: Workout,
    /// Whether the slot write succeeded
    pub persisted: bool,
}

/// Returned by [`WorkoutController::reset`]: the host should restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct RestartRequested;

/// Orchestrates validation, construction, storage and rendering.
///
/// # Example
///
/// ```rust
/// use trailmark::controller::WorkoutController;
/// use trailmark::kv::MemoryKvStore;
/// use trailmark::store::WorkoutStore;
/// use trailmark::validate::RawWorkoutInput;
/// use trailmark::workout::{Coordinates, WorkoutKind};
///
/// # fn example() -> trailmark::Result<()> {
/// let mut app = WorkoutController::builder(WorkoutStore::new(MemoryKvStore::new())).build();
/// app.location_acquired(Coordinates::new(55.75, 37.61));
///
/// let created = app.create(RawWorkoutInput::numeric(
///     WorkoutKind::Running,
///     [55.75, 37.61],
///     5.2,
///     24.0,
///     178.0,
/// ))?;
/// assert!(created.persisted);
/// assert_eq!(app.all().len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct WorkoutController<S: KvStore> {
    store: WorkoutStore<S>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    location: Option<Coordinates>,
    state: InteractionState,
    last_outcome: Option<Outcome>,
    form_kind: WorkoutKind,
    map: Option<Box<dyn MapSink + Send>>,
    list: Option<Box<dyn ListSink + Send>>,
    alerts: Option<Box<dyn AlertSink + Send>>,
}

impl<S: KvStore> fmt::Debug for WorkoutController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkoutController")
            .field("workouts", &self.store.len())
            .field("locale", &self.store.locale())
            .field("location", &self.location)
            .field("state", &self.state)
            .field("form_kind", &self.form_kind)
            .finish_non_exhaustive()
    }
}

impl<S: KvStore> WorkoutController<S> {
    /// Create a builder around `store`.
    #[must_use]
    pub fn builder(store: WorkoutStore<S>) -> WorkoutControllerBuilder<S> {
        WorkoutControllerBuilder::new(store)
    }

    /// Reload persisted workouts and render them into the list sink.
    pub fn start(&mut self) -> ReloadReport {
        let report = self.store.reload();
        self.render_all();
        report
    }

    /// Push every stored workout to the list sink, oldest first.
    pub fn render_all(&mut self) {
        let locale = self.store.locale();
        if let Some(list) = self.list.as_mut() {
            for workout in self.store.list() {
                list.render_entry(&ListEntry::new(workout, locale));
            }
        }
    }

    /// Record the reference location and put every stored workout on the map.
    pub fn location_acquired(&mut self, coordinates: Coordinates) {
        info!(lat = coordinates.lat, lng = coordinates.lng, "reference location acquired");
        self.location = Some(coordinates);
        let locale = self.store.locale();
        if let Some(map) = self.map.as_mut() {
            map.pan_to(coordinates);
            for workout in self.store.list() {
                map.place_marker(
                    workout.coordinates(),
                    marker_label(workout),
                    &marker_text(workout, locale),
                );
            }
        }
    }

    /// The location source gave up; tell the user.
    pub fn location_denied(&mut self) {
        warn!("location access denied");
        self.alert("Location access was not granted");
    }

    /// Open the form for a clicked map position.
    ///
    /// # Errors
    ///
    /// Returns `LocationUnavailable` before the reference location arrives.
    pub fn begin_entry(&mut self, at: Coordinates) -> Result<()> {
        if self.location.is_none() {
            return Err(Error::LocationUnavailable);
        }
        self.state = InteractionState::AwaitingInput { at };
        Ok(())
    }

    /// Close the form without submitting.
    pub fn cancel_entry(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// Switch the form between running and cycling fields.
    pub fn toggle_kind(&mut self) -> WorkoutKind {
        self.form_kind = self.form_kind.toggled();
        self.form_kind
    }

    /// Kind currently selected in the form.
    #[must_use]
    pub const fn form_kind(&self) -> WorkoutKind {
        self.form_kind
    }

    /// Validate, build, store and persist a workout from raw form values.
    ///
    /// When `input.coordinates` is `None` the position clicked in
    /// [`begin_entry`](Self::begin_entry) is used. A failed slot write
    /// still commits the workout in memory; `persisted` reports it and the
    /// alert sink gets a warning.
    ///
    /// # Errors
    ///
    /// Returns `LocationUnavailable` before the reference location arrives,
    /// or `Validation` naming every bad field. The store is untouched in
    /// both cases.
    pub fn create(&mut self, input: RawWorkoutInput) -> Result<Created> {
        if self.location.is_none() {
            return Err(self.reject(Error::LocationUnavailable));
        }

        let clicked = match self.state {
            InteractionState::AwaitingInput { at } => Some(at),
            _ => None,
        };
        self.state = InteractionState::Validating;

        let valid = match validate(&input.or_coordinates(clicked)) {
            Ok(valid) => valid,
            Err(e) => return Err(self.reject(e)),
        };

        let created_at = self.clock.now();
        let workout = Workout::builder(
            self.ids.next_id(created_at),
            valid.coordinates,
            valid.distance,
            valid.duration,
            valid.activity,
        )
        .created_at(created_at)
        .locale(self.store.locale())
        .calendar_zone(self.store.calendar_zone())
        .build();

        self.store.add(workout.clone());
        let persisted = match self.store.persist() {
            Ok(()) => true,
            Err(e) => {
                self.alert(&e.to_string());
                false
            }
        };

        let locale = self.store.locale();
        if let Some(map) = self.map.as_mut() {
            map.place_marker(
                workout.coordinates(),
                marker_label(&workout),
                &marker_text(&workout, locale),
            );
        }
        if let Some(list) = self.list.as_mut() {
            list.render_entry(&ListEntry::new(&workout, locale));
        }

        info!(id = workout.id(), kind = %workout.kind(), persisted, "workout created");
        self.state = InteractionState::Idle;
        self.last_outcome = Some(Outcome::Committed);
        Ok(Created { workout, persisted })
    }

    /// Find a workout by id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.store.find_by_id(id)
    }

    /// All workouts, oldest first.
    #[must_use]
    pub fn all(&self) -> &[Workout] {
        self.store.list()
    }

    /// Pan the map to a workout; `None` if the id is unknown.
    pub fn locate(&mut self, id: &str) -> Option<Coordinates> {
        let coordinates = self.store.find_by_id(id)?.coordinates();
        if let Some(map) = self.map.as_mut() {
            map.pan_to(coordinates);
        }
        Some(coordinates)
    }

    /// Forget every workout, in memory and in the slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` if the slot cannot be deleted.
    pub fn reset(&mut self) -> Result<RestartRequested> {
        self.store.clear()?;
        self.state = InteractionState::Idle;
        info!("workout log reset, restart requested");
        Ok(RestartRequested)
    }

    /// Underlying store.
    #[must_use]
    pub const fn store(&self) -> &WorkoutStore<S> {
        &self.store
    }

    /// Current interaction state.
    #[must_use]
    pub const fn state(&self) -> InteractionState {
        self.state
    }

    /// How the most recent submission ended.
    #[must_use]
    pub const fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// Reference location, once acquired.
    #[must_use]
    pub const fn location(&self) -> Option<Coordinates> {
        self.location
    }

    fn reject(&mut self, error: Error) -> Error {
        debug!(error = %error, "workout rejected");
        self.alert(&error.to_string());
        self.state = InteractionState::Idle;
        self.last_outcome = Some(Outcome::Rejected);
        error
    }

    fn alert(&mut self, message: &str) {
        if let Some(alerts) = self.alerts.as_mut() {
            alerts.alert(message);
        }
    }
}

/// Builder for `WorkoutController`.
pub struct WorkoutControllerBuilder<S: KvStore> {
    store: WorkoutStore<S>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    map: Option<Box<dyn MapSink + Send>>,
    list: Option<Box<dyn ListSink + Send>>,
    alerts: Option<Box<dyn AlertSink + Send>>,
}

impl<S: KvStore> WorkoutControllerBuilder<S> {
    /// Create a new builder with the wall clock and timestamp ids.
    #[must_use]
    pub fn new(store: WorkoutStore<S>) -> Self {
        Self {
            store,
            clock: Box::new(SystemClock),
            ids: Box::new(TimestampIdGenerator::new()),
            map: None,
            list: None,
            alerts: None,
        }
    }

    /// Set the creation clock.
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Set the id generator.
    #[must_use]
    pub fn id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Set the locale for descriptions (new and reloaded) and rendered text.
    ///
    /// Defaults to the store's own locale.
    #[must_use]
    pub fn locale(mut self, locale: Locale) -> Self {
        self.store = self.store.with_locale(locale);
        self
    }

    /// Set the zone whose calendar day goes into descriptions.
    ///
    /// Defaults to the store's own zone.
    #[must_use]
    pub fn calendar_zone(mut self, zone: CalendarZone) -> Self {
        self.store = self.store.with_calendar_zone(zone);
        self
    }

    /// Attach the map widget.
    #[must_use]
    pub fn map_sink(mut self, sink: impl MapSink + Send + 'static) -> Self {
        self.map = Some(Box::new(sink));
        self
    }

    /// Attach the workout list.
    #[must_use]
    pub fn list_sink(mut self, sink: impl ListSink + Send + 'static) -> Self {
        self.list = Some(Box::new(sink));
        self
    }

    /// Attach the alert channel.
    #[must_use]
    pub fn alert_sink(mut self, sink: impl AlertSink + Send + 'static) -> Self {
        self.alerts = Some(Box::new(sink));
        self
    }

    /// Build the `WorkoutController`.
    #[must_use]
    pub fn build(self) -> WorkoutController<S> {
        WorkoutController {
            store: self.store,
            clock: self.clock,
            ids: self.ids,
            location: None,
            state: InteractionState::Idle,
            last_outcome: None,
            form_kind: WorkoutKind::Running,
            map: self.map,
            list: self.list,
            alerts: self.alerts,
        }
    }
}
