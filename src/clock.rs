use chrono::Local;

use crate::race::model::WallClockTime;

pub trait Clock {
    fn now(&self) -> WallClockTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> WallClockTime {
        WallClockTime::from_time(&Local::now())
    }
}

/// Always reports the same time of day.
pub struct FixedClock(pub WallClockTime);

impl Clock for FixedClock {
    fn now(&self) -> WallClockTime {
        self.0
    }
}
