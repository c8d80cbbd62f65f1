//! Pure stopwatch logic with no platform dependencies.
//! Testable on host; the app crate supplies clock, ticks and output.

mod dial;
mod error;
mod format;
mod tracker;

pub use dial::{
    graduations, hand_angle, lap_marker_angle, nearest_major, Graduation, GRADUATION_COUNT,
};
pub use error::TrackerError;
pub use format::{format_elapsed, format_lap_line};
pub use tracker::{ElapsedTimeTracker, Lap, LapKind, RunState, Snapshot, TimerState};

/// Wall-clock instant, in seconds from an arbitrary origin.
pub type Timestamp = f64;

/// A span of elapsed time in seconds.
pub type Seconds = f64;
