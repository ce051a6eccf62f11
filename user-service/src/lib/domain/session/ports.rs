use async_trait::async_trait;
use auth::TokenPair;

use crate::user::errors::UserError;

/// Port for credential exchange: login and token refresh.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify credentials and issue an access and a refresh token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password; the two are
    ///   indistinguishable
    /// * `Storage` - Database operation failed
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, UserError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    /// * `Authentication` - Token is invalid, expired or not a refresh token
    async fn refresh(&self, refresh_token: &str) -> Result<String, UserError>;
}
