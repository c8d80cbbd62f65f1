use std::fmt;
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::error::TrackerError;
use crate::{Seconds, Timestamp};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RunState {
    Stopped,
    Running,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Stopped => f.write_str("stopped"),
            RunState::Running => f.write_str("running"),
        }
    }
}

/// Where a lap sits relative to every other lap of the same tracker.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LapKind {
    Shortest,
    Longest,
    Regular,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Lap {
    pub duration: Seconds,
    pub kind: LapKind,
}

impl Lap {
    fn regular(duration: Seconds) -> Self {
        Self { duration, kind: LapKind::Regular }
    }
}

/// Raw accumulator. `start_reference_time` is `Some` exactly while running.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct TimerState {
    start_reference_time: Option<Timestamp>,
    current_time: Timestamp,
    accumulated_time: Seconds,
    lap_boundary: Seconds,
    completed_laps: Vec<Lap>,
}

impl TimerState {
    pub fn run_state(&self) -> RunState {
        match self.start_reference_time {
            Some(_) => RunState::Running,
            None => RunState::Stopped,
        }
    }

    pub fn accumulated_time(&self) -> Seconds {
        self.accumulated_time
    }

    pub fn lap_boundary(&self) -> Seconds {
        self.lap_boundary
    }

    pub fn completed_laps(&self) -> &[Lap] {
        &self.completed_laps
    }

    pub fn total_elapsed(&self) -> Seconds {
        match self.start_reference_time {
            Some(start) => self.accumulated_time + (self.current_time - start),
            None => self.accumulated_time,
        }
    }

    /// Duration of the lap that is still open.
    pub fn current_lap_time(&self) -> Seconds {
        self.total_elapsed() - self.lap_boundary
    }

    /// Completed laps followed by the open lap, or nothing before any time has passed.
    pub fn all_laps(&self) -> Vec<Lap> {
        if self.total_elapsed() <= 0.0 {
            return Vec::new();
        }
        let mut laps = Vec::with_capacity(self.completed_laps.len() + 1);
        laps.extend_from_slice(&self.completed_laps);
        laps.push(Lap::regular(self.current_lap_time()));
        laps
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Clone, PartialEq, Debug)]
pub struct Snapshot {
    pub total: Seconds,
    pub running: bool,
    pub laps: Vec<Lap>,
    /// End of the most recent completed lap, if any lap has been recorded.
    pub lap_boundary: Option<Seconds>,
}

/// Tags every entry equal to the minimum `Shortest` and every entry equal to
/// the maximum `Longest`. When all durations are equal, all stay `Regular`.
fn classify(durations: &[Seconds]) -> Vec<Lap> {
    let shortest = durations.iter().copied().fold(f64::INFINITY, f64::min);
    let longest = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    durations
        .iter()
        .map(|&duration| {
            let kind = if shortest == longest {
                LapKind::Regular
            } else if duration == shortest {
                LapKind::Shortest
            } else if duration == longest {
                LapKind::Longest
            } else {
                LapKind::Regular
            };
            Lap { duration, kind }
        })
        .collect()
}

/// Elapsed-time accumulator with lap recording.
///
/// Driven by `tick` from an external periodic source while running and by
/// the four user commands. `start` while running and `stop`/`tick` while
/// stopped are rejected with [`TrackerError::InvalidStateTransition`] and
/// leave the state untouched; `lap`, `reset` and `snapshot` always succeed.
#[derive(Debug, Default)]
pub struct ElapsedTimeTracker {
    state: TimerState,
    subscribers: Vec<Sender<Snapshot>>,
}

impl ElapsedTimeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.run_state() == RunState::Running
    }

    pub fn total_elapsed(&self) -> Seconds {
        self.state.total_elapsed()
    }

    pub fn current_lap_time(&self) -> Seconds {
        self.state.current_lap_time()
    }

    pub fn start(&mut self, now: Timestamp) -> Result<(), TrackerError> {
        self.require("start", RunState::Stopped)?;
        self.state.current_time = now;
        self.state.start_reference_time = Some(now);
        log::debug!("started at {now:.3}, banked {:.3}s", self.state.accumulated_time);
        self.publish();
        Ok(())
    }

    pub fn tick(&mut self, now: Timestamp) -> Result<(), TrackerError> {
        self.require("tick", RunState::Running)?;
        self.state.current_time = now;
        log::trace!("tick {now:.3}");
        self.publish();
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), TrackerError> {
        self.require("stop", RunState::Running)?;
        self.state.accumulated_time = self.state.total_elapsed();
        self.state.start_reference_time = None;
        log::debug!("stopped at {:.3}s", self.state.accumulated_time);
        self.publish();
        Ok(())
    }

    /// Closes the open lap and reclassifies every recorded lap.
    ///
    /// Allowed while stopped as well; that records the (possibly zero)
    /// remainder since the last boundary.
    pub fn lap(&mut self) -> Lap {
        let closed = self.state.current_lap_time();
        let mut durations: Vec<Seconds> =
            self.state.completed_laps.iter().map(|lap| lap.duration).collect();
        durations.push(closed);

        self.state.completed_laps = classify(&durations);
        self.state.lap_boundary = self.state.total_elapsed();
        log::debug!(
            "lap {} closed at {:.3}s ({:.3}s)",
            durations.len(),
            self.state.lap_boundary,
            closed
        );
        self.publish();

        // classify() yields one entry per duration, so the last one is `closed`.
        self.state
            .completed_laps
            .last()
            .copied()
            .unwrap_or(Lap::regular(closed))
    }

    /// Back to a fresh stopped tracker with no laps. Subscribers are kept.
    pub fn reset(&mut self) {
        self.state = TimerState::default();
        log::debug!("reset");
        self.publish();
    }

    pub fn snapshot(&self) -> Snapshot {
        let lap_boundary = if self.state.completed_laps.is_empty() {
            None
        } else {
            Some(self.state.lap_boundary)
        };
        Snapshot {
            total: self.state.total_elapsed(),
            running: self.is_running(),
            laps: self.state.all_laps(),
            lap_boundary,
        }
    }

    /// Receives a snapshot after every successful mutating call.
    pub fn subscribe(&mut self) -> Receiver<Snapshot> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    fn require(&self, operation: &'static str, wanted: RunState) -> Result<(), TrackerError> {
        let state = self.state.run_state();
        if state == wanted {
            Ok(())
        } else {
            log::warn!("rejected {operation} while {state}");
            Err(TrackerError::InvalidStateTransition { operation, state })
        }
    }

    fn publish(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}
