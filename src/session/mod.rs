//! Session token persistence
//!
//! Login yields an opaque token that gates access to the budget view. The
//! token is stored as JSON under the config directory, read at startup, and
//! removed by `logout`. The token itself is never inspected.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};

/// A stored session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque token issued by the auth service
    pub token: String,

    /// When the token was obtained
    pub acquired_at: DateTime<Utc>,
}

impl Session {
    /// Create a session acquired now
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            acquired_at: Utc::now(),
        }
    }
}

/// Reads and writes the session file
#[derive(Debug, Clone)]
pub struct SessionStore {
    session_file: PathBuf,
}

impl SessionStore {
    /// Create a store for the configured session file
    pub fn new(paths: &BudgetPaths) -> Self {
        Self {
            session_file: paths.session_file(),
        }
    }

    /// Persist a session, replacing any previous one
    pub fn save(&self, session: &Session) -> BudgetResult<()> {
        if let Some(parent) = self.session_file.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| BudgetError::Io(format!("Failed to create config dir: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(session)
            .map_err(|e| BudgetError::Session(format!("Failed to serialize session: {}", e)))?;

        std::fs::write(&self.session_file, contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write session file: {}", e)))?;

        Ok(())
    }

    /// Load the stored session, if any.
    ///
    /// A malformed session file is treated as no session rather than an
    /// error; the user just has to log in again.
    pub fn load(&self) -> BudgetResult<Option<Session>> {
        if !self.session_file.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.session_file)
            .map_err(|e| BudgetError::Io(format!("Failed to read session file: {}", e)))?;

        Ok(serde_json::from_str(&contents).ok())
    }

    /// Remove the stored session
    pub fn clear(&self) -> BudgetResult<()> {
        if self.session_file.exists() {
            std::fs::remove_file(&self.session_file)
                .map_err(|e| BudgetError::Io(format!("Failed to remove session file: {}", e)))?;
        }
        Ok(())
    }

    /// Whether a session file exists
    pub fn exists(&self) -> bool {
        self.session_file.exists()
    }
}
