use serde::Deserialize;

use crate::race::countdown::TickOutcome;
use crate::race::model::{TargetTime, WallClockTime};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
pub enum TimeDisplayMode {
    #[default]
    #[serde(rename = "12h")]
    Hour12,
    #[serde(rename = "24h")]
    Hour24,
}

/// `HH:MM:SS`; hours keep counting past 99.
pub fn format_remaining(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = seconds / 60 % 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

pub fn format_wall_clock(time: &WallClockTime, mode: TimeDisplayMode) -> String {
    match mode {
        TimeDisplayMode::Hour24 => format!(
            "{:02}:{:02}:{:02}",
            time.hour(),
            time.minute(),
            time.second()
        ),
        TimeDisplayMode::Hour12 => TargetTime::from_wall_clock(time).to_string(),
    }
}

pub fn render_tick_line(outcome: &TickOutcome) -> String {
    if outcome.finished {
        return "GO! Race started".to_string();
    }
    format!("T-{}", format_remaining(outcome.remaining))
}
