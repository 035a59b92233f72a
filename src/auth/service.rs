use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{AuthError, Claims, TokenIssuer, UserStore};
use crate::domain::PublicUser;

/// Verifies credentials against the user store and hands out tokens.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenIssuer) -> Self {
        Self { users, tokens }
    }

    /// Returns the sanitized user with a fresh token, or `None` when the
    /// credentials do not match. Unknown user and wrong password are not told apart.
    #[instrument(skip(self, password))]
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<PublicUser>, AuthError> {
        let Some(user) = self.users.find_by_credentials(username, password) else {
            debug!("Credentials rejected");
            return Ok(None);
        };
        let token = self.tokens.issue(&user)?;
        info!(user_id = user.id, "Token issued");
        Ok(Some(user.to_public(Some(token))))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens.verify(token)
    }

    pub fn users(&self) -> Vec<PublicUser> {
        self.users.all().iter().map(|u| u.to_public(None)).collect()
    }
}
