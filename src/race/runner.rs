use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::notify::Notifier;
use crate::race::countdown::{Countdown, TickOutcome};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunnerEvent {
    Tick(TickOutcome),
    Finished,
    Stopped,
}

/// Handle to a countdown ticking on its own worker thread.
///
/// The worker owns the `Countdown`; ticks never overlap. Dropping the handle
/// stops the countdown.
pub struct CountdownRunner {
    stop: Arc<AtomicBool>,
    wake: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
    events: Receiver<RunnerEvent>,
}

impl CountdownRunner {
    pub fn start(
        initial_seconds: u32,
        interval: Duration,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let (wake_tx, wake_rx) = mpsc::channel();
        let (events_tx, events_rx) = mpsc::channel();
        let stop_for_worker = Arc::clone(&stop);
        info!(initial_seconds, ?interval, "countdown started");
        let worker = thread::spawn(move || {
            run_tick_loop(
                Countdown::start(initial_seconds),
                interval,
                notifier,
                stop_for_worker,
                wake_rx,
                events_tx,
            )
        });
        Self {
            stop,
            wake: Some(wake_tx),
            worker: Some(worker),
            events: events_rx,
        }
    }

    pub fn events(&self) -> &Receiver<RunnerEvent> {
        &self.events
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }

    /// Halts ticking and waits for the worker to exit. No alert fires after
    /// this returns. Calling it again does nothing.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        // Dropping the sender wakes a worker waiting for its next deadline.
        self.wake.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
            info!("countdown stopped");
        }
    }
}

impl Drop for CountdownRunner {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_tick_loop(
    mut countdown: Countdown,
    interval: Duration,
    notifier: Arc<dyn Notifier>,
    stop: Arc<AtomicBool>,
    wake: Receiver<()>,
    events: Sender<RunnerEvent>,
) {
    let mut next_tick = Instant::now() + interval;
    while countdown.is_running() {
        let wait = next_tick.saturating_duration_since(Instant::now());
        match wake.recv_timeout(wait) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
        if stop.load(Ordering::Relaxed) {
            break;
        }

        let Some(outcome) = countdown.tick() else {
            break;
        };
        if let Some(alert) = outcome.alert {
            debug!(kind = ?alert.kind, remaining = alert.remaining_seconds, "dispatching alert");
            notifier.notify(alert.title(), &alert.subtitle());
        }
        let _ = events.send(RunnerEvent::Tick(outcome));
        if outcome.finished {
            let _ = events.send(RunnerEvent::Finished);
            return;
        }
        next_tick += interval;
    }
    info!(
        remaining = countdown.remaining_seconds(),
        "countdown cancelled before race start"
    );
    countdown.stop();
    let _ = events.send(RunnerEvent::Stopped);
}
