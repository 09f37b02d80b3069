//! # Trailmark: workout log core
//!
//! Trailmark records running and cycling sessions, derives pace or speed,
//! and keeps the whole log in a single key-value slot so it survives
//! restarts. Map, list and alert widgets are reached through sink traits;
//! nothing here depends on a UI.
//!
//! ## Layers
//!
//! - [`workout`]: typed records, derived metrics, descriptions
//! - [`store`]: ordered collection plus persist/reload through a [`kv::KvStore`]
//! - [`controller`]: validation, creation, lookup and sink notification
//!
//! ## Example Usage
//!
//! ```rust
//! use trailmark::controller::WorkoutController;
//! use trailmark::kv::MemoryKvStore;
//! use trailmark::store::WorkoutStore;
//! use trailmark::validate::RawWorkoutInput;
//! use trailmark::workout::{Coordinates, WorkoutKind};
//!
//! let mut app = WorkoutController::builder(WorkoutStore::new(MemoryKvStore::new())).build();
//! app.start();
//! app.location_acquired(Coordinates::new(55.75, 37.61));
//!
//! let created = app
//!     .create(RawWorkoutInput::numeric(WorkoutKind::Cycling, [55.76, 37.62], 27.0, 95.0, 523.0))
//!     .expect("valid input");
//! assert_eq!(app.find_by_id(created.workout.id()), Some(&created.workout));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod controller;
pub mod error;
pub mod kv;
pub mod render;
pub mod store;
pub mod validate;
pub mod workout;

pub use error::{Error, InputField, Result};
