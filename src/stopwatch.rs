use std::sync::mpsc::Sender;
use std::time::Duration;

use stopwatch_core::{ElapsedTimeTracker, Lap, Snapshot};

use crate::clock::Clock;
use crate::error::AppError;
use crate::pump::TickPump;
use crate::AppEvent;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyOutcome {
    Handled,
    Ignored,
    Quit,
}

/// Tracker plus the resources that drive it.
///
/// The tick pump exists exactly while the tracker runs. It is acquired in
/// `start` and released in `stop`, in `reset`, and when the app is dropped.
pub struct StopwatchApp<C: Clock> {
    tracker: ElapsedTimeTracker,
    clock: C,
    tick_interval: Duration,
    events: Sender<AppEvent>,
    pump: Option<TickPump>,
}

impl<C: Clock> StopwatchApp<C> {
    pub fn new(clock: C, tick_interval: Duration, events: Sender<AppEvent>) -> Self {
        Self {
            tracker: ElapsedTimeTracker::new(),
            clock,
            tick_interval,
            events,
            pump: None,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.tracker.snapshot()
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.tracker.is_running()
    }

    #[cfg(test)]
    pub fn pump_running(&self) -> bool {
        self.pump.is_some()
    }

    pub fn start(&mut self) -> Result<(), AppError> {
        let now = self.clock.now();
        self.tracker.start(now)?;
        match TickPump::start(self.tick_interval, self.events.clone()) {
            Ok(pump) => {
                self.pump = Some(pump);
                log::info!("stopwatch started");
                Ok(())
            }
            Err(e) => {
                // Without ticks the display would freeze; undo the start
                self.tracker.stop()?;
                Err(e)
            }
        }
    }

    /// Stops at the current clock reading rather than the last pump tick.
    pub fn stop(&mut self) -> Result<(), AppError> {
        if self.tracker.is_running() {
            self.tracker.tick(self.clock.now())?;
        }
        self.tracker.stop()?;
        self.pump = None;
        log::info!("stopwatch stopped at {:.3}s", self.tracker.total_elapsed());
        Ok(())
    }

    pub fn lap(&mut self) -> Result<Lap, AppError> {
        if self.tracker.is_running() {
            self.tracker.tick(self.clock.now())?;
        }
        let lap = self.tracker.lap();
        log::info!("lap {:.3}s", lap.duration);
        Ok(lap)
    }

    pub fn reset(&mut self) {
        self.pump = None;
        self.tracker.reset();
        log::info!("stopwatch reset");
    }

    /// Returns whether the tick was applied. A pump event can still be
    /// queued after `stop`; it is dropped here.
    pub fn on_pump(&mut self) -> Result<bool, AppError> {
        if !self.tracker.is_running() {
            log::trace!("stale pump event ignored");
            return Ok(false);
        }
        self.tracker.tick(self.clock.now())?;
        Ok(true)
    }

    /// Lap is offered only while running and reset only while stopped.
    pub fn handle_key(&mut self, key: char) -> Result<KeyOutcome, AppError> {
        log::debug!("key {:?}", key);
        match key {
            's' | ' ' | '\r' | '\n' => {
                if self.tracker.is_running() {
                    self.stop()?;
                } else {
                    self.start()?;
                }
                Ok(KeyOutcome::Handled)
            }
            'l' if self.tracker.is_running() => {
                self.lap()?;
                Ok(KeyOutcome::Handled)
            }
            'r' if !self.tracker.is_running() => {
                self.reset();
                Ok(KeyOutcome::Handled)
            }
            'q' => Ok(KeyOutcome::Quit),
            _ => Ok(KeyOutcome::Ignored),
        }
    }
}
