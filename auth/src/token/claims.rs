use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity token payload.
///
/// Only the registered claims the service relies on. All three are required,
/// so a token missing any of them fails to deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject, expiring `validity` after `issued_at`.
    pub fn for_subject(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        validity: Duration,
    ) -> Self {
        let expiration = issued_at + validity;

        Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is still valid at exactly its `exp` second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
