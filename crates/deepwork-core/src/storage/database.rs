//! SQLite-based session and interruption storage.
//!
//! The storage layer is the persistence collaborator of the lifecycle
//! engine: it loads a session together with its ordered interruptions and
//! durably commits mutations. It owns the NotFound condition; the engine
//! never raises it.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::data_dir;
use crate::error::DatabaseError;
use crate::session::{Interruption, Session, SessionStatus};

fn parse_datetime(value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn parse_optional_datetime(value: Option<String>) -> rusqlite::Result<Option<DateTime<Utc>>> {
    value.as_deref().map(parse_datetime).transpose()
}

fn parse_status(value: &str) -> rusqlite::Result<SessionStatus> {
    value.parse::<SessionStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn row_to_session(row: &Row) -> rusqlite::Result<Session> {
    let scheduled_minutes: i64 = row.get(3)?;
    let start_time: Option<String> = row.get(4)?;
    let end_time: Option<String> = row.get(5)?;
    let status: String = row.get(6)?;
    let created_at: String = row.get(7)?;
    Ok(Session {
        id: row.get(0)?,
        title: row.get(1)?,
        goal: row.get(2)?,
        scheduled_minutes: scheduled_minutes as u32,
        start_time: parse_optional_datetime(start_time)?,
        end_time: parse_optional_datetime(end_time)?,
        status: parse_status(&status)?,
        created_at: parse_datetime(&created_at)?,
        interruptions: Vec::new(),
    })
}

fn row_to_interruption(row: &Row) -> rusqlite::Result<Interruption> {
    let pause_time: String = row.get(3)?;
    let resume_time: Option<String> = row.get(4)?;
    Ok(Interruption {
        id: row.get(0)?,
        session_id: row.get(1)?,
        reason: row.get(2)?,
        pause_time: parse_datetime(&pause_time)?,
        resume_time: parse_optional_datetime(resume_time)?,
    })
}

const SESSION_COLUMNS: &str =
    "id, title, goal, scheduled_minutes, start_time, end_time, status, created_at";

/// SQLite database for session storage.
///
/// Sessions own their interruptions: deleting a session cascades.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/deepwork/deepwork.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()?.join("deepwork.db");
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        log::debug!("opened session database at {}", path.display());
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "PRAGMA foreign_keys = ON;
            PRAGMA busy_timeout = 5000;

            CREATE TABLE IF NOT EXISTS sessions (
                id                TEXT PRIMARY KEY,
                title             TEXT NOT NULL,
                goal              TEXT,
                scheduled_minutes INTEGER NOT NULL,
                start_time        TEXT,
                end_time          TEXT,
                status            TEXT NOT NULL DEFAULT 'scheduled',
                created_at        TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS interruptions (
                id          TEXT PRIMARY KEY,
                session_id  TEXT NOT NULL REFERENCES sessions(id) ON DELETE CASCADE,
                reason      TEXT NOT NULL,
                pause_time  TEXT NOT NULL,
                resume_time TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_created_at ON sessions(created_at);
            CREATE INDEX IF NOT EXISTS idx_interruptions_session_id ON interruptions(session_id);",
        )?;
        Ok(())
    }

    /// Insert a freshly created session.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn insert_session(&self, session: &Session) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO sessions (id, title, goal, scheduled_minutes, start_time, end_time, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                session.id,
                session.title,
                session.goal,
                session.scheduled_minutes as i64,
                session.start_time.map(|dt| dt.to_rfc3339()),
                session.end_time.map(|dt| dt.to_rfc3339()),
                session.status.as_str(),
                session.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Load a session with its interruptions in pause order.
    ///
    /// # Errors
    /// Returns an error if the query fails; an unknown id is `Ok(None)`.
    pub fn get_session(&self, id: &str) -> Result<Option<Session>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1"
        ))?;
        let session = stmt.query_row(params![id], row_to_session).optional()?;
        let Some(mut session) = session else {
            return Ok(None);
        };
        session.interruptions = self.load_interruptions(&session.id)?;
        Ok(Some(session))
    }

    /// Load a session, raising NotFound for an unknown id.
    ///
    /// # Errors
    /// Returns [`DatabaseError::SessionNotFound`] when the id is unknown.
    pub fn require_session(&self, id: &str) -> Result<Session, DatabaseError> {
        self.get_session(id)?
            .ok_or_else(|| DatabaseError::SessionNotFound { id: id.to_string() })
    }

    /// List all sessions newest first, each with its interruptions.
    pub fn list_sessions(&self) -> Result<Vec<Session>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions ORDER BY created_at DESC"
        ))?;
        let rows = stmt.query_map([], row_to_session)?;
        let mut sessions = Vec::new();
        for row in rows {
            let mut session = row?;
            session.interruptions = self.load_interruptions(&session.id)?;
            sessions.push(session);
        }
        Ok(sessions)
    }

    /// Persist lifecycle mutations: status, timestamps and interruptions.
    ///
    /// Immutable fields (title, goal, scheduled duration) are never updated.
    ///
    /// # Errors
    /// Returns an error if any statement fails.
    pub fn update_session(&self, session: &Session) -> Result<(), DatabaseError> {
        self.conn.execute(
            "UPDATE sessions SET status = ?2, start_time = ?3, end_time = ?4 WHERE id = ?1",
            params![
                session.id,
                session.status.as_str(),
                session.start_time.map(|dt| dt.to_rfc3339()),
                session.end_time.map(|dt| dt.to_rfc3339()),
            ],
        )?;
        for interruption in &session.interruptions {
            self.conn.execute(
                "INSERT OR REPLACE INTO interruptions (id, session_id, reason, pause_time, resume_time)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    interruption.id,
                    interruption.session_id,
                    interruption.reason,
                    interruption.pause_time.to_rfc3339(),
                    interruption.resume_time.map(|dt| dt.to_rfc3339()),
                ],
            )?;
        }
        Ok(())
    }

    /// Delete a session and, via cascade, its interruptions.
    ///
    /// # Errors
    /// Returns [`DatabaseError::SessionNotFound`] when the id is unknown.
    pub fn delete_session(&self, id: &str) -> Result<(), DatabaseError> {
        let deleted = self
            .conn
            .execute("DELETE FROM sessions WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(DatabaseError::SessionNotFound { id: id.to_string() });
        }
        Ok(())
    }

    fn load_interruptions(&self, session_id: &str) -> Result<Vec<Interruption>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, reason, pause_time, resume_time
             FROM interruptions
             WHERE session_id = ?1
             ORDER BY pause_time ASC",
        )?;
        let rows = stmt.query_map(params![session_id], row_to_interruption)?;
        let mut interruptions = Vec::new();
        for row in rows {
            interruptions.push(row?);
        }
        Ok(interruptions)
    }
}
