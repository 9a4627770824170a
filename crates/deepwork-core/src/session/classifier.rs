//! Final-status classification, invoked only by `complete` after `end_time`
//! is fixed.

use super::model::{Session, SessionStatus};

/// Pause count at or above which a completed session counts as interrupted.
pub const PAUSE_LIMIT: usize = 4;
/// Allowed overrun of the scheduled duration before a session is overdue.
pub const OVERRUN_FACTOR: f64 = 1.1;

/// Map a completing session to its terminal status. First match wins:
///
/// 1. completed mid-pause, open interruption never resumed -> `abandoned`
/// 2. at least [`PAUSE_LIMIT`] interruptions -> `interrupted`
/// 3. actual worked minutes beyond `scheduled * 1.1` -> `overdue`
/// 4. otherwise -> `completed`
///
/// `prior` is the status the session held immediately before completing.
pub(crate) fn final_status(session: &Session, prior: SessionStatus) -> SessionStatus {
    if prior == SessionStatus::Paused && session.open_interruption().is_some() {
        return SessionStatus::Abandoned;
    }

    if session.pause_count() >= PAUSE_LIMIT {
        return SessionStatus::Interrupted;
    }

    if let (Some(_), Some(end)) = (session.start_time, session.end_time) {
        if let Some(actual) = session.actual_minutes(end) {
            if actual > session.scheduled_minutes as f64 * OVERRUN_FACTOR {
                return SessionStatus::Overdue;
            }
        }
    }

    SessionStatus::Completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn four_resumed_pauses_means_interrupted() {
        // Total elapsed time stays well under the schedule; the pause count
        // alone decides.
        let now = Utc::now();
        let mut session = Session::create("Test", None, 30, now).unwrap();
        session.start(now).unwrap();
        for i in 0..4 {
            let at = now + Duration::seconds(i * 10);
            session.pause(&format!("pause {}", i + 1), at).unwrap();
            session.resume(at + Duration::seconds(5)).unwrap();
        }
        session.complete(now + Duration::minutes(1)).unwrap();
        assert_eq!(session.status, SessionStatus::Interrupted);
        assert_eq!(session.pause_count(), 4);
    }

    #[test]
    fn never_resumed_means_abandoned() {
        let now = Utc::now();
        let mut session = Session::create("Test", None, 30, now).unwrap();
        session.start(now).unwrap();
        session.pause("got distracted", now + Duration::minutes(2)).unwrap();
        session.complete(now + Duration::minutes(3)).unwrap();
        assert_eq!(session.status, SessionStatus::Abandoned);
        // The interruption stays open even after completion.
        assert!(session.open_interruption().is_some());
    }

    #[test]
    fn abandonment_beats_pause_count() {
        // Four pauses with the last one never resumed: rule order makes this
        // abandoned, not interrupted.
        let now = Utc::now();
        let mut session = Session::create("Test", None, 30, now).unwrap();
        session.start(now).unwrap();
        for i in 0..3 {
            let at = now + Duration::seconds(i * 10);
            session.pause("quick", at).unwrap();
            session.resume(at + Duration::seconds(5)).unwrap();
        }
        session.pause("gone", now + Duration::minutes(1)).unwrap();
        session.complete(now + Duration::minutes(2)).unwrap();
        assert_eq!(session.pause_count(), 4);
        assert_eq!(session.status, SessionStatus::Abandoned);
    }

    #[test]
    fn overrun_means_overdue() {
        // Started 15 minutes ago against a 10 minute schedule: 15 > 11.
        let start = Utc::now() - Duration::minutes(15);
        let mut session = Session::create("Overdue test", None, 10, start).unwrap();
        session.start(start).unwrap();
        session.complete(Utc::now()).unwrap();
        assert_eq!(session.status, SessionStatus::Overdue);
    }

    #[test]
    fn within_tolerance_completes() {
        // 25 actual minutes against a 30 minute schedule: 25 <= 33.
        let start = Utc::now() - Duration::minutes(25);
        let mut session = Session::create("Normal test", None, 30, start).unwrap();
        session.start(start).unwrap();
        session.complete(Utc::now()).unwrap();
        assert_eq!(session.status, SessionStatus::Completed);
    }

    #[test]
    fn overrun_must_be_strict() {
        // Exactly at the threshold is not overdue.
        let start = Utc::now() - Duration::minutes(11);
        let mut session = Session::create("Boundary", None, 10, start).unwrap();
        session.start(start).unwrap();
        session.complete(start + Duration::minutes(11)).unwrap();
        assert_eq!(session.status, SessionStatus::Completed);
    }

    #[test]
    fn pauses_do_not_count_toward_overrun() {
        // 25 wall-clock minutes but 15 of them paused: 10 actual <= 11.
        let start = Utc::now() - Duration::minutes(25);
        let mut session = Session::create("Paused long", None, 10, start).unwrap();
        session.start(start).unwrap();
        session.pause("long break", start + Duration::minutes(5)).unwrap();
        session.resume(start + Duration::minutes(20)).unwrap();
        session.complete(start + Duration::minutes(25)).unwrap();
        assert_eq!(session.status, SessionStatus::Completed);
    }

    #[test]
    fn resumed_pause_then_overrun_is_overdue() {
        // One resumed pause, but still 20 actual minutes against 10.
        let start = Utc::now() - Duration::minutes(22);
        let mut session = Session::create("Slow", None, 10, start).unwrap();
        session.start(start).unwrap();
        session.pause("tea", start + Duration::minutes(5)).unwrap();
        session.resume(start + Duration::minutes(7)).unwrap();
        session.complete(start + Duration::minutes(22)).unwrap();
        assert_eq!(session.status, SessionStatus::Overdue);
    }
}
