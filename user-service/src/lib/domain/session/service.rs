use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::TokenPair;

use crate::session::ports::SessionServicePort;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Login and refresh on top of the user store.
pub struct SessionService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> SessionService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> SessionServicePort for SessionService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, UserError> {
        let Some(credential) = self.repository.find_credential(email).await? else {
            self.authenticator.reject_unknown_account(password);
            return Err(UserError::InvalidCredentials);
        };

        self.authenticator
            .authenticate(password, &credential.password_hash, &credential.email)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                other => UserError::Authentication(other),
            })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, UserError> {
        Ok(self.authenticator.refresh(refresh_token)?)
    }
}
