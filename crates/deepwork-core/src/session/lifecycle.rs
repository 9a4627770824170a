//! Session lifecycle state machine.
//!
//! Each transition is a guarded operation: the guard is checked before any
//! field is touched, so a rejected operation leaves the session exactly as it
//! was. The caller supplies `now` for every timestamped effect and commits
//! the mutated aggregate durably before letting another operation observe it.
//!
//! ## State Transitions
//!
//! ```text
//! scheduled -> active <-> paused
//!                 \         /
//!                  complete
//!                     |
//!   completed | interrupted | abandoned | overdue
//! ```

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::accounting::span_minutes;
use super::classifier;
use super::model::{Interruption, Session, SessionStatus};
use crate::error::{InvalidTransition, ValidationError};
use crate::events::Event;

/// Maximum title length in characters.
pub const TITLE_MAX_LEN: usize = 200;
/// Maximum pause reason length in characters.
pub const REASON_MAX_LEN: usize = 500;
/// Maximum scheduled duration in minutes (8 hours).
pub const SCHEDULED_MINUTES_MAX: u32 = 480;

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.chars().count();
    if len == 0 || len > TITLE_MAX_LEN {
        return Err(ValidationError::TitleLength { len });
    }
    Ok(())
}

fn validate_scheduled_minutes(minutes: u32) -> Result<(), ValidationError> {
    if minutes == 0 || minutes > SCHEDULED_MINUTES_MAX {
        return Err(ValidationError::DurationRange { minutes });
    }
    Ok(())
}

fn validate_reason(reason: &str) -> Result<(), ValidationError> {
    let len = reason.chars().count();
    if len == 0 || len > REASON_MAX_LEN {
        return Err(ValidationError::ReasonLength { len });
    }
    Ok(())
}

impl Session {
    /// Create a new session in the `scheduled` state.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] for an empty or oversized title, or a
    /// scheduled duration outside 1-480 minutes.
    pub fn create(
        title: &str,
        goal: Option<&str>,
        scheduled_minutes: u32,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        validate_title(title)?;
        validate_scheduled_minutes(scheduled_minutes)?;
        Ok(Session {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            goal: goal.map(str::to_string),
            scheduled_minutes,
            start_time: None,
            end_time: None,
            status: SessionStatus::Scheduled,
            created_at: now,
            interruptions: Vec::new(),
        })
    }

    /// Start a scheduled session, fixing its `start_time`.
    ///
    /// # Errors
    /// Returns [`InvalidTransition`] unless the session is `scheduled`.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<Event, InvalidTransition> {
        if self.status != SessionStatus::Scheduled {
            return Err(InvalidTransition {
                operation: "start",
                from: self.status,
            });
        }
        self.status = SessionStatus::Active;
        self.start_time = Some(now);
        Ok(Event::SessionStarted {
            session_id: self.id.clone(),
            at: now,
        })
    }

    /// Pause an active session, recording a new open interruption.
    ///
    /// The reason is validated before the state guard, mirroring a request
    /// layer that rejects malformed input before touching the session.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] for an empty or oversized reason, or
    /// [`InvalidTransition`] unless the session is `active`. Neither mutates
    /// the session.
    pub fn pause(&mut self, reason: &str, now: DateTime<Utc>) -> Result<Event, crate::CoreError> {
        validate_reason(reason)?;
        if self.status != SessionStatus::Active {
            return Err(InvalidTransition {
                operation: "pause",
                from: self.status,
            }
            .into());
        }
        self.interruptions.push(Interruption {
            id: Uuid::new_v4().to_string(),
            session_id: self.id.clone(),
            reason: reason.to_string(),
            pause_time: now,
            resume_time: None,
        });
        self.status = SessionStatus::Paused;
        Ok(Event::SessionPaused {
            session_id: self.id.clone(),
            reason: reason.to_string(),
            pause_count: self.pause_count(),
            at: now,
        })
    }

    /// Resume a paused session, closing the open interruption.
    ///
    /// # Errors
    /// Returns [`InvalidTransition`] unless the session is `paused`.
    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<Event, InvalidTransition> {
        if self.status != SessionStatus::Paused {
            return Err(InvalidTransition {
                operation: "resume",
                from: self.status,
            });
        }
        let mut paused_minutes = 0.0;
        if let Some(open) = self.interruptions.iter_mut().find(|i| i.resume_time.is_none()) {
            open.resume_time = Some(now);
            paused_minutes = span_minutes(open.pause_time, now).max(0.0);
        }
        self.status = SessionStatus::Active;
        Ok(Event::SessionResumed {
            session_id: self.id.clone(),
            paused_minutes,
            at: now,
        })
    }

    /// Complete a session, fixing its `end_time` and deriving the terminal
    /// status via the classifier.
    ///
    /// Completing while paused leaves the open interruption open; the
    /// classifier reads that as abandonment.
    ///
    /// # Errors
    /// Returns [`InvalidTransition`] unless the session is `active` or
    /// `paused`.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<Event, InvalidTransition> {
        if !matches!(self.status, SessionStatus::Active | SessionStatus::Paused) {
            return Err(InvalidTransition {
                operation: "complete",
                from: self.status,
            });
        }
        let prior = self.status;
        self.end_time = Some(now);
        self.status = classifier::final_status(self, prior);
        Ok(Event::SessionCompleted {
            session_id: self.id.clone(),
            final_status: self.status,
            pause_count: self.pause_count(),
            actual_minutes: self.actual_minutes(now),
            at: now,
        })
    }
}
