//! Session persistence on disk. Whoever holds a `Session` is logged in;
//! there is no global flag. The store is the only place a session lives
//! between runs.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// `None` for a guest session.
    pub username: Option<String>,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            username: Some(name.into()),
            logged_in_at: Utc::now(),
        }
    }

    pub fn guest() -> Self {
        Self {
            username: None,
            logged_in_at: Utc::now(),
        }
    }

    pub fn is_guest(&self) -> bool {
        self.username.is_none()
    }
}

/// Stores the current session as pretty-printed JSON in one directory.
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// `~/.trip_planner`, falling back to the working directory when no
    /// home directory is known.
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".trip_planner")
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create session dir {}", self.dir.display()))?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(self.session_path(), json)
            .with_context(|| format!("failed to write {}", self.session_path().display()))?;
        Ok(())
    }

    /// Missing or unreadable session files mean "not logged in", they do
    /// not fail startup.
    pub fn load(&self) -> Result<Option<Session>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        let raw =
            fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring corrupt session file");
                Ok(None)
            }
        }
    }

    pub fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}
