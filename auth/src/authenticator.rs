use std::sync::OnceLock;

use chrono::Duration;
use chrono::Utc;
use serde::Serialize;

use crate::guard;
use crate::jwt::TokenClaims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::jwt::TokenKind;
use crate::password::HashingError;
use crate::password::PasswordHasher;

/// Verified against when no stored digest exists for a login attempt.
const DECOY_PASSWORD: &str = "decoy-password-never-issued";

/// Validity windows of issued tokens.
///
/// Access tokens must be strictly shorter-lived than refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    access: Duration,
    refresh: Duration,
}

impl TokenLifetimes {
    /// Create validity windows for access and refresh tokens.
    ///
    /// # Arguments
    /// * `access` - Lifetime of access tokens
    /// * `refresh` - Lifetime of refresh tokens
    ///
    /// # Errors
    /// * `InvalidLifetimes` - A lifetime is not positive, or access >= refresh
    /// * `OutOfRange` - An expiry computed from the refresh lifetime cannot be
    ///   represented
    pub fn new(access: Duration, refresh: Duration) -> Result<Self, LifetimesError> {
        if access <= Duration::zero() || access >= refresh {
            return Err(LifetimesError::InvalidLifetimes {
                access_secs: access.num_seconds(),
                refresh_secs: refresh.num_seconds(),
            });
        }

        if Utc::now().checked_add_signed(refresh).is_none() {
            return Err(LifetimesError::OutOfRange);
        }

        Ok(Self { access, refresh })
    }

    pub fn access(&self) -> Duration {
        self.access
    }

    pub fn refresh(&self) -> Duration {
        self.refresh
    }
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(5),
            refresh: Duration::minutes(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifetimesError {
    #[error(
        "Access token lifetime ({access_secs}s) must be positive and shorter than refresh token lifetime ({refresh_secs}s)"
    )]
    InvalidLifetimes { access_secs: i64, refresh_secs: i64 },

    #[error("Token lifetime is too large to represent")]
    OutOfRange,
}

/// Access and refresh tokens issued together at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication and authorization failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    /// Same value whether the account is unknown or the password is wrong.
    #[error("Invalid user credentials")]
    InvalidCredentials,

    #[error("Missing or malformed bearer token")]
    MissingToken,

    #[error("Expected {expected} token, got {found} token")]
    WrongTokenKind { expected: TokenKind, found: TokenKind },

    #[error("User is not authorized")]
    NotAuthorized,

    #[error(transparent)]
    Hashing(#[from] HashingError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Coordinates password verification with token issuance, refresh and
/// authorization.
///
/// Holds no per-request state; one instance is shared by every request.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    codec: TokenCodec,
    lifetimes: TokenLifetimes,
    decoy_digest: OnceLock<String>,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `codec` - Token codec holding the signing secret
    /// * `lifetimes` - Validity windows of issued tokens
    ///
    /// # Returns
    /// Authenticator using the default Argon2 password hasher
    pub fn new(codec: TokenCodec, lifetimes: TokenLifetimes) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            codec,
            lifetimes,
            decoy_digest: OnceLock::new(),
        }
    }

    pub fn lifetimes(&self) -> TokenLifetimes {
        self.lifetimes
    }

    /// Hash a password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// PHC string format hash
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, HashingError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password supplied by the caller
    /// * `stored_hash` - PHC string stored for the account
    /// * `subject` - Identity the tokens are bound to (account email)
    ///
    /// # Returns
    /// Access and refresh tokens for `subject`
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Hashing` - Stored digest is malformed
    /// * `Token` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_pair(subject)?)
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Runs a full password verification against a fixed digest so the
    /// caller spends the same work as for a wrong password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password supplied by the caller
    ///
    /// # Returns
    /// Always `InvalidCredentials`
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        let digest = self
            .decoy_digest
            .get_or_init(|| self.password_hasher.hash(DECOY_PASSWORD).unwrap_or_default());

        let _ = self.password_hasher.verify(password, digest);

        AuthenticationError::InvalidCredentials
    }

    /// Issue an access and a refresh token without checking credentials.
    ///
    /// # Arguments
    /// * `subject` - Identity the tokens are bound to
    ///
    /// # Returns
    /// Token pair with lifetimes taken from [`TokenLifetimes`]
    ///
    /// # Errors
    /// * `MissingSecret` - Codec was built without a secret
    /// * `SigningFailed` - Token encoding failed or an expiry is out of range
    pub fn issue_pair(&self, subject: &str) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self
                .codec
                .issue(subject, TokenKind::Access, self.lifetimes.access)?,
            refresh_token: self
                .codec
                .issue(subject, TokenKind::Refresh, self.lifetimes.refresh)?,
        })
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The refresh token is not consumed and stays usable until it expires.
    ///
    /// # Arguments
    /// * `refresh_token` - Previously issued refresh token
    ///
    /// # Returns
    /// New access token for the same subject
    ///
    /// # Errors
    /// * `Token` - Refresh token is invalid or expired
    /// * `WrongTokenKind` - An access token was presented
    pub fn refresh(&self, refresh_token: &str) -> Result<String, AuthenticationError> {
        let claims = self.codec.parse(refresh_token)?;

        if claims.kind != TokenKind::Refresh {
            return Err(AuthenticationError::WrongTokenKind {
                expected: TokenKind::Refresh,
                found: claims.kind,
            });
        }

        Ok(self
            .codec
            .issue(claims.subject(), TokenKind::Access, self.lifetimes.access)?)
    }

    /// Authorize a protected call from its raw `Authorization` header.
    ///
    /// # Arguments
    /// * `header` - Value of the `Authorization` header, if present
    ///
    /// # Returns
    /// Claims of the presented access token
    ///
    /// # Errors
    /// See [`guard::authorize`].
    pub fn authorize(&self, header: Option<&str>) -> Result<TokenClaims, AuthenticationError> {
        guard::authorize(&self.codec, header)
    }

    /// Verify any token and return its claims, whatever its kind.
    ///
    /// # Arguments
    /// * `token` - Encoded token
    ///
    /// # Errors
    /// * `MissingSecret` - Codec was built without a secret
    /// * `Invalid` - Token is malformed or its signature does not verify
    /// * `Expired` - Token is past its expiry
    pub fn validate_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.codec.parse(token)
    }
}
