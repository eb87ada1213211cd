//! Lookup outcomes and Scratch API payloads

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// Legacy string marker for a username the Scratch API does not know
pub const LEGACY_USERNAME_NOT_FOUND: &str = "@SCRATCHSIG_USERNAME_NOT_FOUND";
/// Legacy string marker for a Scratch API call that could not be completed
pub const LEGACY_API_FAILURE: &str = "@SCRATCHSIG_API_FAILURE";

/// Outcome of resolving a username to a Scratch user ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    /// The user exists; the numeric ID is kept as text
    Found(String),
    /// The API reported that no such user exists
    NotFound,
    /// The API could not be reached or answered with something unusable
    TransientFailure,
}

/// The two unsuccessful outcomes of a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFailure {
    NotFound,
    TransientFailure,
}

impl LookupResult {
    pub fn is_found(&self) -> bool {
        matches!(self, LookupResult::Found(_))
    }

    /// Split into the resolved ID or the failure kind
    pub fn into_result(self) -> Result<String, LookupFailure> {
        match self {
            LookupResult::Found(id) => Ok(id),
            LookupResult::NotFound => Err(LookupFailure::NotFound),
            LookupResult::TransientFailure => Err(LookupFailure::TransientFailure),
        }
    }

    /// Render in the legacy single-string form: the ID itself, or one of the
    /// `@SCRATCHSIG_*` markers.
    pub fn to_legacy_string(&self) -> String {
        match self {
            LookupResult::Found(id) => id.clone(),
            LookupResult::NotFound => LEGACY_USERNAME_NOT_FOUND.to_string(),
            LookupResult::TransientFailure => LEGACY_API_FAILURE.to_string(),
        }
    }

    /// Parse the legacy single-string form.
    ///
    /// An empty string was never a valid ID, so it reads as a failure.
    pub fn from_legacy(value: &str) -> Self {
        match value {
            LEGACY_USERNAME_NOT_FOUND => LookupResult::NotFound,
            LEGACY_API_FAILURE | "" => LookupResult::TransientFailure,
            id => LookupResult::Found(id.to_string()),
        }
    }
}

impl From<LookupFailure> for LookupResult {
    fn from(failure: LookupFailure) -> Self {
        match failure {
            LookupFailure::NotFound => LookupResult::NotFound,
            LookupFailure::TransientFailure => LookupResult::TransientFailure,
        }
    }
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupFailure::NotFound => write!(f, "Scratch user not found"),
            LookupFailure::TransientFailure => write!(f, "Scratch API failure"),
        }
    }
}

impl std::error::Error for LookupFailure {}

/// `GET /users/{username}` response; only the ID is read
#[derive(Debug, Deserialize)]
pub(crate) struct UserResponse {
    pub(crate) id: Option<Value>,
}

impl UserResponse {
    /// The user ID as text, if the payload carries a non-negative integer ID
    /// (as a JSON number or a string of digits).
    pub(crate) fn user_id(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::Number(n) => n.as_u64().map(|id| id.to_string()),
            Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                Some(s.clone())
            }
            _ => None,
        }
    }
}
