//! Read-only projections of a session and its interruptions.
//!
//! Both shapes are pure functions of state: no side effects, no validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::{Interruption, Session, SessionStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterruptionView {
    pub id: String,
    pub reason: String,
    pub pause_time: DateTime<Utc>,
    pub resume_time: Option<DateTime<Utc>>,
}

impl From<&Interruption> for InterruptionView {
    fn from(interruption: &Interruption) -> Self {
        InterruptionView {
            id: interruption.id.clone(),
            reason: interruption.reason.clone(),
            pause_time: interruption.pause_time,
            resume_time: interruption.resume_time,
        }
    }
}

/// Full detail view: all fields plus the interruption list and derived
/// `pause_count` / `actual_minutes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDetail {
    pub id: String,
    pub title: String,
    pub goal: Option<String>,
    pub scheduled_minutes: u32,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub pause_count: usize,
    /// Absent for a session that never started.
    pub actual_minutes: Option<f64>,
    pub interruptions: Vec<InterruptionView>,
}

impl SessionDetail {
    pub fn project(session: &Session, now: DateTime<Utc>) -> Self {
        SessionDetail {
            id: session.id.clone(),
            title: session.title.clone(),
            goal: session.goal.clone(),
            scheduled_minutes: session.scheduled_minutes,
            start_time: session.start_time,
            end_time: session.end_time,
            status: session.status,
            created_at: session.created_at,
            pause_count: session.pause_count(),
            actual_minutes: session.actual_minutes(now),
            interruptions: session.interruptions.iter().map(Into::into).collect(),
        }
    }
}

/// List-item view: no interruption details, same derived fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub scheduled_minutes: u32,
    pub status: SessionStatus,
    pub pause_count: usize,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub actual_minutes: Option<f64>,
}

impl SessionSummary {
    pub fn project(session: &Session, now: DateTime<Utc>) -> Self {
        SessionSummary {
            id: session.id.clone(),
            title: session.title.clone(),
            scheduled_minutes: session.scheduled_minutes,
            status: session.status,
            pause_count: session.pause_count(),
            start_time: session.start_time,
            end_time: session.end_time,
            actual_minutes: session.actual_minutes(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn detail_carries_derived_fields() {
        let now = Utc::now();
        let start = now - Duration::minutes(12);
        let mut session = Session::create("Review PRs", Some("clear the queue"), 30, start).unwrap();
        session.start(start).unwrap();
        session.pause("standup", start + Duration::minutes(4)).unwrap();
        session.resume(start + Duration::minutes(6)).unwrap();

        let detail = SessionDetail::project(&session, now);
        assert_eq!(detail.pause_count, 1);
        assert_eq!(detail.interruptions.len(), 1);
        assert_eq!(detail.interruptions[0].reason, "standup");
        let actual = detail.actual_minutes.unwrap();
        assert!((actual - 10.0).abs() < 1e-6);
    }

    #[test]
    fn actual_minutes_absent_before_start() {
        let now = Utc::now();
        let session = Session::create("Not yet", None, 30, now).unwrap();
        let detail = SessionDetail::project(&session, now);
        assert!(detail.actual_minutes.is_none());
        let summary = SessionSummary::project(&session, now);
        assert!(summary.actual_minutes.is_none());
        assert_eq!(summary.status, SessionStatus::Scheduled);
    }

    #[test]
    fn serializes_with_lowercase_status() {
        let now = Utc::now();
        let session = Session::create("Serialize me", None, 30, now).unwrap();
        let json = serde_json::to_value(SessionDetail::project(&session, now)).unwrap();
        assert_eq!(json["status"], "scheduled");
        assert!(json["actual_minutes"].is_null());
        assert_eq!(json["pause_count"], 0);
    }
}
