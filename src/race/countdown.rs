use crate::race::model::{Alert, AlertKind};

/// Result of a single tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickOutcome {
    /// Remaining seconds seen at the start of the tick; alerts are decided on this.
    pub observed: u32,
    pub remaining: u32,
    pub alert: Option<Alert>,
    pub finished: bool,
}

/// Owned countdown state, advanced one second per `tick`.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining_seconds: u32,
    running: bool,
}

impl Countdown {
    pub fn start(initial_seconds: u32) -> Self {
        Self {
            remaining_seconds: initial_seconds,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn tick(&mut self) -> Option<TickOutcome> {
        if !self.running {
            return None;
        }

        let observed = self.remaining_seconds;
        if observed == 0 {
            self.running = false;
            return Some(TickOutcome {
                observed,
                remaining: 0,
                alert: Some(Alert::new(AlertKind::RaceStart, 0)),
                finished: true,
            });
        }

        let alert = milestone_for(observed).map(|kind| Alert::new(kind, observed));
        self.remaining_seconds = observed - 1;
        Some(TickOutcome {
            observed,
            remaining: self.remaining_seconds,
            alert,
            finished: false,
        })
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.remaining_seconds = 0;
    }
}

/// Milestone for a non-zero remaining count, checked in priority order:
/// whole minutes, then tens inside the final minute, then the last five seconds.
pub fn milestone_for(remaining_seconds: u32) -> Option<AlertKind> {
    if remaining_seconds == 0 {
        None
    } else if remaining_seconds % 60 == 0 {
        Some(AlertKind::MinutePassed)
    } else if remaining_seconds % 10 == 0 && remaining_seconds < 60 {
        Some(AlertKind::FinalCountdownTen)
    } else if remaining_seconds <= 5 {
        Some(AlertKind::GetReady)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_completion(initial: u32) -> Vec<TickOutcome> {
        let mut countdown = Countdown::start(initial);
        let mut outcomes = Vec::new();
        while let Some(outcome) = countdown.tick() {
            outcomes.push(outcome);
        }
        outcomes
    }

    fn alerts_of(outcomes: &[TickOutcome], kind: AlertKind) -> Vec<u32> {
        outcomes
            .iter()
            .filter_map(|outcome| outcome.alert)
            .filter(|alert| alert.kind == kind)
            .map(|alert| alert.remaining_seconds)
            .collect()
    }

    #[test]
    fn ticks_once_per_second_down_to_zero() {
        let outcomes = run_to_completion(7);
        assert_eq!(outcomes.len(), 8);
        let observed: Vec<u32> = outcomes.iter().map(|outcome| outcome.observed).collect();
        assert_eq!(observed, vec![7, 6, 5, 4, 3, 2, 1, 0]);
        assert!(outcomes.last().is_some_and(|outcome| outcome.finished));
        assert!(outcomes[..7].iter().all(|outcome| !outcome.finished));
    }

    #[test]
    fn milestones_from_two_minutes_five() {
        let outcomes = run_to_completion(125);
        assert_eq!(outcomes.len(), 126);
        assert_eq!(alerts_of(&outcomes, AlertKind::MinutePassed), vec![120, 60]);
        assert_eq!(
            alerts_of(&outcomes, AlertKind::FinalCountdownTen),
            vec![50, 40, 30, 20, 10]
        );
        assert_eq!(alerts_of(&outcomes, AlertKind::GetReady), vec![5, 4, 3, 2, 1]);
        assert_eq!(alerts_of(&outcomes, AlertKind::RaceStart), vec![0]);
        assert_eq!(outcomes.iter().filter(|outcome| outcome.alert.is_some()).count(), 13);
    }

    #[test]
    fn zero_start_fires_race_start_on_first_tick() {
        let mut countdown = Countdown::start(0);
        let outcome = countdown.tick().expect("running");
        assert_eq!(outcome.alert, Some(Alert::new(AlertKind::RaceStart, 0)));
        assert!(outcome.finished);
        assert!(!countdown.is_running());
        assert_eq!(countdown.tick(), None);
    }

    #[test]
    fn stop_halts_further_ticks_and_is_idempotent() {
        let mut countdown = Countdown::start(90);
        for _ in 0..30 {
            countdown.tick();
        }
        assert_eq!(countdown.remaining_seconds(), 60);
        countdown.stop();
        assert!(!countdown.is_running());
        assert_eq!(countdown.tick(), None);
        countdown.stop();
        assert_eq!(countdown.tick(), None);
        assert!(!countdown.is_running());
    }

    #[test]
    fn milestone_priority_order() {
        assert_eq!(milestone_for(180), Some(AlertKind::MinutePassed));
        assert_eq!(milestone_for(60), Some(AlertKind::MinutePassed));
        assert_eq!(milestone_for(70), None);
        assert_eq!(milestone_for(59), None);
        assert_eq!(milestone_for(10), Some(AlertKind::FinalCountdownTen));
        assert_eq!(milestone_for(6), None);
        assert_eq!(milestone_for(5), Some(AlertKind::GetReady));
        assert_eq!(milestone_for(1), Some(AlertKind::GetReady));
        assert_eq!(milestone_for(0), None);
    }
}
