mod clock;
mod config;
mod display;
mod logging;
mod notify;
mod race;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, warn};

use crate::clock::{Clock, FixedClock, SystemClock};
use crate::config::{RaceSettings, load_settings};
use crate::display::{TimeDisplayMode, format_remaining, format_wall_clock, render_tick_line};
use crate::notify::{Notifier, NotifierKind, select_notifier};
use crate::race::model::{TargetTime, WallClockTime};
use crate::race::resolver::resolve;
use crate::race::runner::{CountdownRunner, RunnerEvent};

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliNotifier {
    Auto,
    Desktop,
    Console,
    Silent,
}

impl From<CliNotifier> for NotifierKind {
    fn from(value: CliNotifier) -> Self {
        match value {
            CliNotifier::Auto => NotifierKind::Auto,
            CliNotifier::Desktop => NotifierKind::Desktop,
            CliNotifier::Console => NotifierKind::Console,
            CliNotifier::Silent => NotifierKind::Silent,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "regattastart",
    version,
    about = "Race start countdown with minute, ten-second and final-second alerts"
)]
struct Cli {
    /// Race start time on today's clock, e.g. "5:00:00 PM".
    target: TargetTime,

    /// Use this time of day instead of the system clock.
    #[arg(long)]
    now: Option<WallClockTime>,

    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long = "tick-ms", alias = "tick_ms")]
    tick_ms: Option<u64>,

    #[arg(long, value_enum)]
    notifier: Option<CliNotifier>,

    /// Hide the live countdown line.
    #[arg(long)]
    quiet: bool,

    #[arg(long = "24h")]
    hour24: bool,

    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut settings = match cli.config.as_deref() {
        Some(path) => {
            load_settings(path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => RaceSettings::default(),
    };
    apply_overrides(&mut settings, &cli);

    let clock: Box<dyn Clock> = match cli.now {
        Some(now) => Box::new(FixedClock(now)),
        None => Box::new(SystemClock),
    };
    let now = clock.now();
    debug!(race_start = %cli.target, now = ?now, "resolving race start");
    let initial_seconds = resolve(&cli.target, &now)?;

    let selected = select_notifier(settings.notifier, &settings.app_name)?;
    if let Some(reason) = selected.fallback_reason.as_deref() {
        warn!("{reason}");
    }

    let target_text = match settings.time_display {
        TimeDisplayMode::Hour12 => cli.target.to_string(),
        TimeDisplayMode::Hour24 => format!(
            "{:02}:{:02}:{:02}",
            cli.target.hour24(),
            cli.target.minute(),
            cli.target.second()
        ),
    };
    println!(
        "Race start at {target_text} (now {}), countdown {}",
        format_wall_clock(&now, settings.time_display),
        format_remaining(initial_seconds)
    );
    println!("Alerts via {} notifications", selected.label);

    let notifier: Arc<dyn Notifier> = Arc::from(selected.notifier);
    let runner = CountdownRunner::start(
        initial_seconds,
        Duration::from_millis(settings.tick_interval_ms),
        notifier,
    );
    follow_countdown(runner, &settings, spawn_stop_listener());
    Ok(())
}

fn apply_overrides(settings: &mut RaceSettings, cli: &Cli) {
    if let Some(tick_ms) = cli.tick_ms {
        settings.tick_interval_ms = tick_ms;
    }
    if let Some(notifier) = cli.notifier {
        settings.notifier = notifier.into();
    }
    if cli.quiet {
        settings.show_countdown = false;
    }
    if cli.hour24 {
        settings.time_display = TimeDisplayMode::Hour24;
    }
}

fn follow_countdown(
    mut runner: CountdownRunner,
    settings: &RaceSettings,
    stop_requests: Receiver<()>,
) {
    loop {
        if runner.is_running() && stop_requests.try_recv().is_ok() {
            runner.stop();
        }
        match runner.events().recv_timeout(EVENT_POLL_INTERVAL) {
            Ok(RunnerEvent::Tick(outcome)) => {
                if settings.show_countdown {
                    println!("{}", render_tick_line(&outcome));
                }
            }
            Ok(RunnerEvent::Finished) => break,
            Ok(RunnerEvent::Stopped) => {
                println!("Race countdown stopped");
                break;
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

/// Enter or `stop` on stdin cancels the countdown; end of input is ignored.
fn spawn_stop_listener() -> Receiver<()> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                return;
            };
            let command = line.trim();
            if command.is_empty() || command.eq_ignore_ascii_case("stop") {
                let _ = tx.send(());
                return;
            }
        }
    });
    rx
}
