//! Workout domain model
//!
//! One record type with a kind-specific payload:
//!
//! ```text
//! Workout ── Activity::Running { cadence }        → Metric::Pace  (min/km)
//!        └── Activity::Cycling { elevation_gain } → Metric::Speed (km/h)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use trailmark::workout::{Activity, Coordinates, Workout};
//!
//! let run = Workout::new(
//!     "0781234567",
//!     Coordinates::new(55.75, 37.61),
//!     5.2,
//!     24.0,
//!     Activity::Running { cadence: 178 },
//! );
//! assert!((run.pace().unwrap() - 4.615).abs() < 1e-3);
//! ```

mod id;
mod locale;
mod record;

pub use id::{Clock, IdGenerator, ManualClock, SystemClock, TimestampIdGenerator, ID_DIGITS};
pub use locale::{CalendarZone, Locale, Units};
pub use record::{Activity, Coordinates, Metric, Workout, WorkoutBuilder, WorkoutKind};
