use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::Am => f.write_str("AM"),
            Meridiem::Pm => f.write_str("PM"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum TargetTimeError {
    #[error("hour {0} is out of range; expected 1-12")]
    Hour12OutOfRange(u32),
    #[error("hour {0} is out of range; expected 0-23")]
    Hour24OutOfRange(u32),
    #[error("minute {0} is out of range; expected 0-59")]
    MinuteOutOfRange(u32),
    #[error("second {0} is out of range; expected 0-59")]
    SecondOutOfRange(u32),
    #[error("invalid time '{0}', expected H:MM:SS AM|PM")]
    Unparseable(String),
}

/// Race start time as picked on a 12-hour dial.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TargetTime {
    hour12: u32,
    minute: u32,
    second: u32,
    meridiem: Meridiem,
}

impl TargetTime {
    pub fn new(
        hour12: u32,
        minute: u32,
        second: u32,
        meridiem: Meridiem,
    ) -> Result<Self, TargetTimeError> {
        if !(1..=12).contains(&hour12) {
            return Err(TargetTimeError::Hour12OutOfRange(hour12));
        }
        check_minute_second(minute, second)?;
        Ok(Self {
            hour12,
            minute,
            second,
            meridiem,
        })
    }

    /// Picker default: the current wall-clock time on the 12-hour dial.
    pub fn from_wall_clock(now: &WallClockTime) -> Self {
        let hour12 = match now.hour % 12 {
            0 => 12,
            hour => hour,
        };
        let meridiem = if now.hour >= 12 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        };
        Self {
            hour12,
            minute: now.minute,
            second: now.second,
            meridiem,
        }
    }

    pub fn hour12(&self) -> u32 {
        self.hour12
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    pub fn hour24(&self) -> u32 {
        match self.meridiem {
            Meridiem::Am => self.hour12 % 12,
            Meridiem::Pm => self.hour12 % 12 + 12,
        }
    }

    pub fn seconds_since_midnight(&self) -> u32 {
        self.hour24() * 3600 + self.minute * 60 + self.second
    }
}

impl fmt::Display for TargetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02}:{:02} {}",
            self.hour12(),
            self.minute,
            self.second,
            self.meridiem()
        )
    }
}

impl FromStr for TargetTime {
    type Err = TargetTimeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let time = parse_twelve_hour(input)
            .ok_or_else(|| TargetTimeError::Unparseable(input.trim().to_string()))?;
        let (is_pm, hour12) = time.hour12();
        let meridiem = if is_pm { Meridiem::Pm } else { Meridiem::Am };
        Self::new(hour12, time.minute(), time.second(), meridiem)
    }
}

/// Local device time of day, 24-hour.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct WallClockTime {
    hour: u32,
    minute: u32,
    second: u32,
}

impl WallClockTime {
    pub fn new(hour: u32, minute: u32, second: u32) -> Result<Self, TargetTimeError> {
        if hour > 23 {
            return Err(TargetTimeError::Hour24OutOfRange(hour));
        }
        check_minute_second(minute, second)?;
        Ok(Self {
            hour,
            minute,
            second,
        })
    }

    /// Sub-second precision is dropped.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    pub fn seconds_since_midnight(&self) -> u32 {
        self.hour * 3600 + self.minute * 60 + self.second
    }
}

impl FromStr for WallClockTime {
    type Err = TargetTimeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let time = parse_twelve_hour(trimmed)
            .or_else(|| NaiveTime::parse_from_str(trimmed, "%H:%M:%S").ok())
            .or_else(|| NaiveTime::parse_from_str(trimmed, "%H:%M").ok())
            .ok_or_else(|| TargetTimeError::Unparseable(trimmed.to_string()))?;
        Self::new(time.hour(), time.minute(), time.second())
    }
}

fn parse_twelve_hour(input: &str) -> Option<NaiveTime> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%I:%M:%S %p")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%I:%M %p"))
        .ok()
}

fn check_minute_second(minute: u32, second: u32) -> Result<(), TargetTimeError> {
    if minute > 59 {
        return Err(TargetTimeError::MinuteOutOfRange(minute));
    }
    if second > 59 {
        return Err(TargetTimeError::SecondOutOfRange(second));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum AlertKind {
    MinutePassed,
    FinalCountdownTen,
    GetReady,
    RaceStart,
}

/// Milestone alert, dispatched to the notifier as soon as it is produced.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub remaining_seconds: u32,
}

impl Alert {
    pub fn new(kind: AlertKind, remaining_seconds: u32) -> Self {
        Self {
            kind,
            remaining_seconds,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            AlertKind::MinutePassed => "One Minute Passed",
            AlertKind::FinalCountdownTen => "Final Countdown",
            AlertKind::GetReady => "Get Ready!",
            AlertKind::RaceStart => "Race Start",
        }
    }

    pub fn subtitle(&self) -> String {
        match self.kind {
            AlertKind::MinutePassed => "Next check in 60 seconds".to_string(),
            AlertKind::FinalCountdownTen => format!("{} seconds!", self.remaining_seconds),
            AlertKind::GetReady => format!("Starting in {}...", self.remaining_seconds),
            AlertKind::RaceStart => "Go!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    use super::*;

    #[test]
    fn twelve_hour_conversion_handles_noon_and_midnight() {
        let midnight = TargetTime::new(12, 0, 0, Meridiem::Am).expect("valid");
        let noon = TargetTime::new(12, 0, 0, Meridiem::Pm).expect("valid");
        let five_pm = TargetTime::new(5, 0, 0, Meridiem::Pm).expect("valid");
        assert_eq!(midnight.hour24(), 0);
        assert_eq!(noon.hour24(), 12);
        assert_eq!(five_pm.seconds_since_midnight(), 17 * 3600);
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert_eq!(
            TargetTime::new(0, 0, 0, Meridiem::Am),
            Err(TargetTimeError::Hour12OutOfRange(0))
        );
        assert_eq!(
            TargetTime::new(13, 0, 0, Meridiem::Pm),
            Err(TargetTimeError::Hour12OutOfRange(13))
        );
        assert_eq!(
            TargetTime::new(1, 60, 0, Meridiem::Pm),
            Err(TargetTimeError::MinuteOutOfRange(60))
        );
        assert_eq!(
            WallClockTime::new(24, 0, 0),
            Err(TargetTimeError::Hour24OutOfRange(24))
        );
        assert_eq!(
            WallClockTime::new(10, 0, 60),
            Err(TargetTimeError::SecondOutOfRange(60))
        );
    }

    #[test]
    fn parses_target_time_text() {
        let target: TargetTime = "5:00:00 PM".parse().expect("valid");
        assert_eq!(target, TargetTime::new(5, 0, 0, Meridiem::Pm).expect("valid"));

        let short: TargetTime = "11:30 am".parse().expect("valid");
        assert_eq!(short, TargetTime::new(11, 30, 0, Meridiem::Am).expect("valid"));
        assert_eq!(short.to_string(), "11:30:00 AM");

        let err = "17:00:00".parse::<TargetTime>().expect_err("24h text is not a dial time");
        assert!(err.to_string().contains("expected H:MM:SS AM|PM"));
    }

    #[test]
    fn parsed_twelve_o_clock_keeps_its_meridiem() {
        let midnight: TargetTime = "12:00:00 AM".parse().expect("valid");
        assert_eq!((midnight.hour12(), midnight.meridiem()), (12, Meridiem::Am));
        assert_eq!(midnight.seconds_since_midnight(), 0);

        let half_past_noon: TargetTime = "12:30 PM".parse().expect("valid");
        assert_eq!(
            (half_past_noon.hour12(), half_past_noon.meridiem()),
            (12, Meridiem::Pm)
        );
        assert_eq!(half_past_noon.hour24(), 12);
    }

    #[test]
    fn parses_wall_clock_in_either_notation() {
        let twelve: WallClockTime = "2:59:59 PM".parse().expect("valid");
        let twenty_four: WallClockTime = "14:59:59".parse().expect("valid");
        assert_eq!(twelve, twenty_four);
        assert_eq!(twelve.seconds_since_midnight(), 14 * 3600 + 59 * 60 + 59);
    }

    #[test]
    fn picker_default_maps_midnight_hour_to_twelve() {
        let just_after_midnight = WallClockTime::new(0, 15, 0).expect("valid");
        let target = TargetTime::from_wall_clock(&just_after_midnight);
        assert_eq!(target.hour12(), 12);
        assert_eq!(target.meridiem(), Meridiem::Am);
        assert_eq!(
            target.seconds_since_midnight(),
            just_after_midnight.seconds_since_midnight()
        );
    }

    #[test]
    fn wall_clock_reads_local_fields_of_zoned_datetime() {
        let during_dst = New_York
            .with_ymd_and_hms(2026, 7, 4, 16, 45, 30)
            .single()
            .expect("valid");
        let wall = WallClockTime::from_time(&during_dst);
        assert_eq!((wall.hour(), wall.minute(), wall.second()), (16, 45, 30));
    }

    #[test]
    fn leap_second_reads_as_fifty_nine() {
        let leap = NaiveTime::from_hms_milli_opt(23, 59, 59, 1_500).expect("valid leap second");
        let wall = WallClockTime::from_time(&leap);
        assert_eq!(wall.second(), 59);
        assert_eq!(wall.seconds_since_midnight(), 24 * 3600 - 1);
    }

    #[test]
    fn alert_text_matches_milestone() {
        assert_eq!(Alert::new(AlertKind::MinutePassed, 120).title(), "One Minute Passed");
        assert_eq!(
            Alert::new(AlertKind::FinalCountdownTen, 30).subtitle(),
            "30 seconds!"
        );
        assert_eq!(Alert::new(AlertKind::GetReady, 3).subtitle(), "Starting in 3...");
        assert_eq!(Alert::new(AlertKind::RaceStart, 0).subtitle(), "Go!");
    }
}
