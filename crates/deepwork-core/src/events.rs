use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionStatus;

/// Every successful lifecycle transition produces an Event.
/// The CLI prints them; callers embedding the core can subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        session_id: String,
        at: DateTime<Utc>,
    },
    SessionPaused {
        session_id: String,
        reason: String,
        pause_count: usize,
        at: DateTime<Utc>,
    },
    SessionResumed {
        session_id: String,
        /// How long the interruption that was just closed lasted.
        paused_minutes: f64,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        session_id: String,
        final_status: SessionStatus,
        pause_count: usize,
        actual_minutes: Option<f64>,
        at: DateTime<Utc>,
    },
}
