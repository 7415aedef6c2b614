//! Journal entry types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the client was doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Full item list fetch
    Load,
    /// Item creation
    Create,
    /// Item deletion
    Delete,
    /// Favorite toggle
    Favorite,
    /// User registration
    Register,
    /// Login
    Login,
    /// Password reset request
    PasswordReset,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Load => "load",
            Self::Create => "create",
            Self::Delete => "delete",
            Self::Favorite => "favorite",
            Self::Register => "register",
            Self::Login => "login",
            Self::PasswordReset => "password_reset",
        };
        write!(f, "{}", s)
    }
}

/// How it went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
}

/// One journal record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// When the record was written
    pub timestamp: DateTime<Utc>,

    /// The operation attempted
    pub operation: Operation,

    /// Success or failure
    pub outcome: Outcome,

    /// What was acted on (item key, remote identity, user name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Error text for failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl JournalEntry {
    /// Create a success record
    pub fn success(operation: Operation, subject: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            outcome: Outcome::Success,
            subject,
            detail: None,
        }
    }

    /// Create a failure record carrying the error text
    pub fn failure(
        operation: Operation,
        subject: Option<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            outcome: Outcome::Failure,
            subject,
            detail: Some(detail.into()),
        }
    }
}
