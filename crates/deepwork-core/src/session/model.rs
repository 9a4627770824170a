//! Session and interruption data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of a session.
///
/// `Scheduled`, `Active` and `Paused` are live states; the rest are terminal
/// and no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Scheduled,
    Active,
    Paused,
    Completed,
    Interrupted,
    Abandoned,
    Overdue,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Active => "active",
            SessionStatus::Paused => "paused",
            SessionStatus::Completed => "completed",
            SessionStatus::Interrupted => "interrupted",
            SessionStatus::Abandoned => "abandoned",
            SessionStatus::Overdue => "overdue",
        }
    }

    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionStatus::Completed
                | SessionStatus::Interrupted
                | SessionStatus::Abandoned
                | SessionStatus::Overdue
        )
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown session status '{0}'")]
pub struct ParseStatusError(String);

impl FromStr for SessionStatus {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "scheduled" => Ok(SessionStatus::Scheduled),
            "active" => Ok(SessionStatus::Active),
            "paused" => Ok(SessionStatus::Paused),
            "completed" => Ok(SessionStatus::Completed),
            "interrupted" => Ok(SessionStatus::Interrupted),
            "abandoned" => Ok(SessionStatus::Abandoned),
            "overdue" => Ok(SessionStatus::Overdue),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// One pause episode within a session.
///
/// An interruption with no `resume_time` is "open": the session was paused
/// and has not been resumed since.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interruption {
    pub id: String,
    pub session_id: String,
    pub reason: String,
    pub pause_time: DateTime<Utc>,
    pub resume_time: Option<DateTime<Utc>>,
}

impl Interruption {
    pub fn is_open(&self) -> bool {
        self.resume_time.is_none()
    }
}

/// One planned unit of focused work.
///
/// The session exclusively owns its interruptions, kept in pause order.
/// `title`, `goal` and `scheduled_minutes` are fixed at creation;
/// `start_time` and `end_time` are each set exactly once by the lifecycle
/// engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub title: String,
    pub goal: Option<String>,
    pub scheduled_minutes: u32,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub interruptions: Vec<Interruption>,
}

impl Session {
    /// Number of recorded interruptions. Derived, never stored.
    pub fn pause_count(&self) -> usize {
        self.interruptions.len()
    }

    /// The interruption with the latest pause time, if any.
    pub fn last_interruption(&self) -> Option<&Interruption> {
        self.interruptions.iter().max_by_key(|i| i.pause_time)
    }

    /// The single interruption that has not been resumed yet, if any.
    pub fn open_interruption(&self) -> Option<&Interruption> {
        self.interruptions.iter().find(|i| i.is_open())
    }
}
