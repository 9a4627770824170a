//! # Deepwork Core Library
//!
//! This library provides the core business logic for Deepwork, a deep work
//! session tracker. It implements a CLI-first philosophy where all operations
//! are available via a standalone CLI binary built as a thin layer over this
//! library.
//!
//! ## Architecture
//!
//! - **Session Engine**: a synchronous lifecycle state machine over one
//!   session aggregate at a time. The caller supplies `now` for every
//!   timestamped effect and is responsible for serializing concurrent
//!   operations against the same session.
//! - **Storage**: SQLite-based session persistence and TOML-based
//!   configuration.
//!
//! ## Key Components
//!
//! - [`Session`]: session aggregate with lifecycle transitions
//! - [`Database`]: session and interruption persistence
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod session;
pub mod storage;

pub use error::{ConfigError, CoreError, DatabaseError, InvalidTransition, ValidationError};
pub use events::Event;
pub use session::{Interruption, Session, SessionDetail, SessionStatus, SessionSummary};
pub use storage::{Config, Database};
