//! Workout Log Demo
//!
//! Run with: `cargo run --example workout_log`
//!
//! Set `TRAILMARK_DATA_DIR` to keep workouts between runs, `TRAILMARK_LOCALE=ru`
//! for Russian labels, `TRAILMARK_UTC_OFFSET_MINUTES` to pin the calendar day,
//! and `RUST_LOG=debug` to see store activity.

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use trailmark::config::TrackerConfig;
use trailmark::controller::WorkoutController;
use trailmark::kv::{FileKvStore, KvStore, MemoryKvStore};
use trailmark::render::{AlertSink, ListEntry, ListSink, MapSink};
use trailmark::store::WorkoutStore;
use trailmark::validate::RawWorkoutInput;
use trailmark::workout::{Coordinates, WorkoutKind};

struct Console;

impl MapSink for Console {
    fn place_marker(&mut self, coordinates: Coordinates, label: &str, rich_text: &str) {
        println!("   [map] marker at ({:.4}, {:.4}): {label}", coordinates.lat, coordinates.lng);
        for line in rich_text.lines() {
            println!("         {line}");
        }
    }

    fn pan_to(&mut self, coordinates: Coordinates) {
        println!("   [map] pan to ({:.4}, {:.4})", coordinates.lat, coordinates.lng);
    }
}

impl ListSink for Console {
    fn render_entry(&mut self, entry: &ListEntry) {
        let details: Vec<String> = entry
            .details
            .iter()
            .map(|d| format!("{} {} {}", d.icon, d.value, d.unit))
            .collect();
        println!("   [list] #{} {} | {}", entry.id, entry.title, details.join("  "));
    }
}

impl AlertSink for Console {
    fn alert(&mut self, message: &str) {
        println!("   [alert] {message}");
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = TrackerConfig::from_env();
    let kv: Box<dyn KvStore> = match &config.data_dir {
        Some(dir) => Box::new(
            FileKvStore::open(dir)
                .with_context(|| format!("opening workout directory {}", dir.display()))?,
        ),
        None => Box::new(MemoryKvStore::new()),
    };

    let mut app = WorkoutController::builder(WorkoutStore::with_slot(kv, config.slot.clone()))
        .locale(config.locale)
        .calendar_zone(config.calendar_zone())
        .map_sink(Console)
        .list_sink(Console)
        .alert_sink(Console)
        .build();

    println!("=== Trailmark Workout Log Demo ===\n");

    println!("1. Startup");
    let report = app.start();
    println!("   slot {:?}: {:?}, {} loaded\n", config.slot, report.status, report.loaded);

    println!("2. Location acquired");
    let home = Coordinates::new(55.7558, 37.6173);
    app.location_acquired(home);
    println!();

    println!("3. Logging a run and a ride");
    app.begin_entry(Coordinates::new(55.7601, 37.6189))?;
    let run = app.create(RawWorkoutInput {
        kind: "running".into(),
        coordinates: None,
        distance: "5.2".into(),
        duration: "24".into(),
        extra: "178".into(),
    })?;
    app.create(RawWorkoutInput::numeric(
        WorkoutKind::Cycling,
        [55.7312, 37.6031],
        27.0,
        95.0,
        523.0,
    ))?;
    println!();

    println!("4. Rejected input");
    let rejected = app.create(RawWorkoutInput {
        kind: "running".into(),
        coordinates: Some([55.75, 37.61]),
        distance: "0".into(),
        duration: "-5".into(),
        extra: "NaN".into(),
    });
    if let Err(e) = rejected {
        println!("   fields: {:?}", e.invalid_fields());
    }
    println!();

    println!("5. Locate the run");
    app.locate(run.workout.id());
    println!("\n{} workouts logged", app.all().len());

    Ok(())
}
