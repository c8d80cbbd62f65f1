mod clock;
mod config;
mod error;
mod pump;
mod stopwatch;
mod ui;

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Sender};
use std::thread;

use tracing_subscriber::EnvFilter;

use crate::clock::SystemClock;
use crate::config::Config;
use crate::error::AppError;
use crate::stopwatch::{KeyOutcome, StopwatchApp};

/// Everything the event loop reacts to.
pub enum AppEvent {
    Key(char),
    Pump,
    Quit,
}

/// Falls back to "info" when the directive does not parse, returning why.
fn build_filter(filter: &str) -> (EnvFilter, Option<String>) {
    match EnvFilter::try_new(filter) {
        Ok(env_filter) => (env_filter, None),
        Err(e) => (
            EnvFilter::new("info"),
            Some(format!("ignoring log filter '{filter}': {e}")),
        ),
    }
}

fn init_logging(filter: &str) {
    let (env_filter, rejected) = build_filter(filter);
    // Logs go to stderr so they don't tear the status line on stdout
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
    if let Some(reason) = rejected {
        log::warn!("{reason}");
    }
}

/// Reads stdin line by line. An empty line is ENTER; EOF quits.
fn key_thread(events: Sender<AppEvent>) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("stdin read failed: {e}");
                break;
            }
        };
        let keys: Vec<char> = if line.is_empty() {
            vec!['\n']
        } else {
            line.chars().collect()
        };
        for key in keys {
            if events.send(AppEvent::Key(key)).is_err() {
                return;
            }
        }
    }
    events.send(AppEvent::Quit).ok();
}

fn run(config: Config) -> Result<(), AppError> {
    let (tx, rx) = mpsc::channel();

    let key_tx = tx.clone();
    thread::Builder::new()
        .name("keys".to_string())
        .spawn(move || key_thread(key_tx))
        .map_err(|source| AppError::Spawn { name: "keys", source })?;

    let mut app = StopwatchApp::new(SystemClock::new(), config.tick_interval, tx);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    ui::draw_stopwatch(&mut out, &app.snapshot())?;

    while let Ok(event) = rx.recv() {
        match event {
            AppEvent::Key(key) => match app.handle_key(key) {
                Ok(KeyOutcome::Handled) => ui::draw_stopwatch(&mut out, &app.snapshot())?,
                Ok(KeyOutcome::Ignored) => {}
                Ok(KeyOutcome::Quit) => break,
                Err(AppError::Tracker(e)) => log::warn!("{e}"),
                Err(e) => return Err(e),
            },
            AppEvent::Pump => {
                if app.on_pump()? {
                    ui::draw_status(&mut out, &app.snapshot())?;
                }
            }
            AppEvent::Quit => break,
        }
    }

    // Releases the tick pump before the final report
    let snapshot = app.snapshot();
    drop(app);
    ui::draw_stopwatch(&mut out, &snapshot)?;
    Ok(())
}

fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_logging("info");
            log::error!("{}", AppError::from(e));
            std::process::exit(2);
        }
    };

    init_logging(&config.log_filter);
    log::info!("Stopwatch PID is {}, tick {:?}", std::process::id(), config.tick_interval);

    if let Err(e) = run(config) {
        log::error!("stopwatch exited with error: {e}");
        std::process::exit(1);
    }
    log::info!("stopwatch exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_directives() {
        let (_, rejected) = build_filter("info");
        assert_eq!(rejected, None);
        let (_, rejected) = build_filter("stopwatch=trace,stopwatch_core=debug");
        assert_eq!(rejected, None);
    }

    #[test]
    fn test_build_filter_reports_bad_directive() {
        let (_, rejected) = build_filter("stopwatch=loud");
        let reason = rejected.unwrap();
        assert!(reason.starts_with("ignoring log filter 'stopwatch=loud'"));
    }
}
