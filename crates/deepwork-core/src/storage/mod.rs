mod config;
pub mod database;

pub use config::Config;
pub use database::Database;

use std::io;
use std::path::PathBuf;

/// Returns `~/.config/deepwork[-dev]/` based on DEEPWORK_ENV.
///
/// Set DEEPWORK_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DEEPWORK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("deepwork-dev")
    } else {
        base_dir.join("deepwork")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
