//! Worked-time accounting.
//!
//! Actual worked time is the wall-clock span from start to end minus every
//! interruption's pause span. An open interruption is clamped to the same
//! reference end-point as the session itself (`end_time` once set, otherwise
//! `now`) -- that coupling keeps in-progress and completed readings
//! consistent.

use chrono::{DateTime, Utc};

use super::model::Session;

/// Fractional minutes between two instants. Negative when `end < start`.
pub(crate) fn span_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 60_000.0
}

impl Session {
    /// Actual worked minutes so far, excluding pause spans.
    ///
    /// Returns `None` for a session that never started. The result floors at
    /// zero even if clock skew or malformed data would make it negative.
    /// Works for in-progress sessions too, with `now` as the open end-point.
    pub fn actual_minutes(&self, now: DateTime<Utc>) -> Option<f64> {
        let start = self.start_time?;
        let end = self.end_time.unwrap_or(now);
        let mut total = span_minutes(start, end);
        for interruption in &self.interruptions {
            let resumed = interruption.resume_time.unwrap_or(end);
            total -= span_minutes(interruption.pause_time, resumed);
        }
        Some(total.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Interruption, Session};
    use chrono::Duration;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn started_at(start: DateTime<Utc>) -> Session {
        let mut session = Session::create("Focus block", None, 60, start).unwrap();
        session.start(start).unwrap();
        session
    }

    fn interruption(
        session: &Session,
        pause: DateTime<Utc>,
        resume: Option<DateTime<Utc>>,
    ) -> Interruption {
        Interruption {
            id: Uuid::new_v4().to_string(),
            session_id: session.id.clone(),
            reason: "test".to_string(),
            pause_time: pause,
            resume_time: resume,
        }
    }

    #[test]
    fn undefined_before_start() {
        let session = Session::create("Never started", None, 30, Utc::now()).unwrap();
        assert!(session.actual_minutes(Utc::now()).is_none());
    }

    #[test]
    fn in_progress_uses_now_as_end_point() {
        let now = Utc::now();
        let session = started_at(now - Duration::minutes(10));
        let actual = session.actual_minutes(now).unwrap();
        assert!((actual - 10.0).abs() < 1e-6);
    }

    #[test]
    fn pause_spans_are_subtracted() {
        let now = Utc::now();
        let start = now - Duration::minutes(25);
        let mut session = started_at(start);
        let entry = interruption(
            &session,
            start + Duration::minutes(5),
            Some(start + Duration::minutes(20)),
        );
        session.interruptions.push(entry);
        // 25 wall-clock minutes, 15 paused
        let actual = session.actual_minutes(now).unwrap();
        assert!((actual - 10.0).abs() < 1e-6);
    }

    #[test]
    fn open_interruption_clamps_to_now() {
        let now = Utc::now();
        let start = now - Duration::minutes(10);
        let mut session = started_at(start);
        let entry = interruption(&session, start + Duration::minutes(5), None);
        session.interruptions.push(entry);
        // 5 worked, then paused until now
        let actual = session.actual_minutes(now).unwrap();
        assert!((actual - 5.0).abs() < 1e-6);
    }

    #[test]
    fn open_interruption_clamps_to_end_time_once_set() {
        let now = Utc::now();
        let start = now - Duration::minutes(30);
        let mut session = started_at(start);
        session.pause("distracted", start + Duration::minutes(5)).unwrap();
        session.complete(start + Duration::minutes(10)).unwrap();
        // The open pause span ends at end_time, not at the later "now".
        let actual = session.actual_minutes(now).unwrap();
        assert!((actual - 5.0).abs() < 1e-6);
    }

    #[test]
    fn floors_at_zero() {
        let now = Utc::now();
        let start = now - Duration::minutes(5);
        let mut session = started_at(start);
        // Malformed: pause recorded before the session even started.
        let entry = interruption(&session, start - Duration::minutes(30), None);
        session.interruptions.push(entry);
        assert_eq!(session.actual_minutes(now).unwrap(), 0.0);
    }

    #[test]
    fn equals_wall_clock_without_pauses() {
        let now = Utc::now();
        let start = now - Duration::minutes(42);
        let mut session = started_at(start);
        session.complete(now).unwrap();
        let actual = session.actual_minutes(now).unwrap();
        assert!((actual - 42.0).abs() < 1e-6);
    }

    proptest! {
        // Non-overlapping pause spans inside the session window: actual time
        // stays within [0, wall], equals wall only with zero pauses and is
        // strictly below it otherwise.
        #[test]
        fn bounded_by_wall_clock(spans in prop::collection::vec((1i64..30, 1i64..20), 0..4)) {
            let wall = 180i64;
            let now = Utc::now();
            let start = now - Duration::minutes(wall);
            let mut session = started_at(start);
            let mut cursor = 0i64;
            for (gap, len) in spans {
                let pause_at = cursor + gap;
                let resume_at = pause_at + len;
                if resume_at >= wall {
                    break;
                }
                let entry = interruption(
                    &session,
                    start + Duration::minutes(pause_at),
                    Some(start + Duration::minutes(resume_at)),
                );
                session.interruptions.push(entry);
                cursor = resume_at;
            }
            session.complete(now).unwrap();

            let actual = session.actual_minutes(now).unwrap();
            prop_assert!(actual >= 0.0);
            prop_assert!(actual <= wall as f64 + 1e-6);
            if session.pause_count() == 0 {
                prop_assert!((actual - wall as f64).abs() < 1e-6);
            } else {
                prop_assert!(actual < wall as f64);
            }
        }
    }
}
