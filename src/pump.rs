use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::AppError;
use crate::AppEvent;

/// Periodic tick source feeding `AppEvent::Pump` into the event loop.
///
/// Holding a `TickPump` is holding the timer: dropping it cancels the thread
/// and waits for it to exit, so no tick can be produced after the drop.
pub struct TickPump {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TickPump {
    pub fn start(interval: Duration, events: Sender<AppEvent>) -> Result<Self, AppError> {
        let (stop_tx, stop_rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("tick-pump".to_string())
            .spawn(move || pump_thread(interval, stop_rx, events))
            .map_err(|source| AppError::Spawn { name: "tick-pump", source })?;
        log::debug!("tick pump started, interval {:?}", interval);
        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }
}

impl Drop for TickPump {
    fn drop(&mut self) {
        // Disconnecting the control channel wakes the thread immediately
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("tick pump thread panicked");
            }
        }
        log::debug!("tick pump stopped");
    }
}

fn pump_thread(interval: Duration, stop_rx: Receiver<()>, events: Sender<AppEvent>) {
    loop {
        match stop_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {
                if events.send(AppEvent::Pump).is_err() {
                    log::debug!("event loop gone, tick pump exiting");
                    break;
                }
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
