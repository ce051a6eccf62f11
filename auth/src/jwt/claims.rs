use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Purpose of a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived token presented on every protected call.
    Access,
    /// Longer-lived token exchanged only for new access tokens.
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Signed payload of a session token.
///
/// The set of fields is closed: a token carrying unknown fields, or missing
/// any of these, does not deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenClaims {
    /// Subject (account email)
    pub sub: String,

    /// Token purpose
    #[serde(rename = "type")]
    pub kind: TokenKind,

    /// Authorization flag set at issuance
    #[serde(rename = "isAuthorized")]
    pub authorized: bool,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims for `subject` expiring `ttl` from now.
    ///
    /// # Errors
    /// * `SigningFailed` - Expiry falls outside the representable time range
    pub fn new(subject: impl ToString, kind: TokenKind, ttl: Duration) -> Result<Self, TokenError> {
        Self::issued_at(subject, kind, Utc::now(), ttl)
    }

    /// Build claims for `subject` as if issued at `now`.
    ///
    /// # Errors
    /// * `SigningFailed` - Expiry falls outside the representable time range
    pub fn issued_at(
        subject: impl ToString,
        kind: TokenKind,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expiry = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::SigningFailed("token expiry is out of range".to_string()))?;

        Ok(Self {
            sub: subject.to_string(),
            kind,
            authorized: true,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        })
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// A token stays valid only while `exp` is strictly in the future.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
