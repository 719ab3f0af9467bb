//! Credential verification for tutorlink.

use tracing::{debug, info, warn};

use super::context::AuthenticatedAccount;
use super::password::{verify_with_salt, PasswordError};
use super::store::hash_blocking;
use crate::config::HashingConfig;
use crate::db::{AccountRepository, Database, Variant};
use crate::{Result, TutorlinkError};

/// Salt hashed against when the username is unknown.
const DUMMY_SALT: &str = "dHV0b3JsaW5rZHVtbXlzYWx0";

/// Verifies username/password pairs against the credential store.
pub struct AuthenticationService<'a> {
    db: &'a Database,
    hashing: HashingConfig,
}

impl<'a> AuthenticationService<'a> {
    /// Create a new AuthenticationService.
    ///
    /// `hashing` is only used for the dummy hash on unknown usernames;
    /// stored hashes are verified with the parameters they carry.
    pub fn new(db: &'a Database, hashing: HashingConfig) -> Self {
        Self { db, hashing }
    }

    /// Verify credentials and return the authenticated account.
    ///
    /// An unknown username and a wrong password both give `AuthFailed`.
    pub async fn authenticate(
        &self,
        variant: Variant,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedAccount> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(TutorlinkError::AuthFailed);
        }

        let repo = AccountRepository::new(self.db.pool());
        let Some(account) = repo.get_by_username(variant, username).await? else {
            // Keep the timing of the two failure paths alike.
            let _ = hash_blocking(
                password.to_string(),
                DUMMY_SALT.to_string(),
                self.hashing.clone(),
            )
            .await;
            debug!(variant = %variant, username = %username, "Login failed: unknown user");
            return Err(TutorlinkError::AuthFailed);
        };

        let candidate = password.to_string();
        let salt = account.salt.clone();
        let hash = account.password_hash.clone();
        let verified =
            tokio::task::spawn_blocking(move || verify_with_salt(&candidate, &salt, &hash))
                .await
                .map_err(|e| TutorlinkError::Hashing(e.to_string()))?;

        match verified {
            Ok(()) => {
                info!(
                    variant = %variant,
                    username = %account.username,
                    account_id = account.id,
                    "Login succeeded"
                );
                Ok(AuthenticatedAccount::new(
                    account.account_ref(),
                    account.username,
                ))
            }
            Err(PasswordError::VerificationFailed) => {
                debug!(
                    variant = %variant,
                    account_id = account.id,
                    "Login failed: wrong password"
                );
                Err(TutorlinkError::AuthFailed)
            }
            Err(PasswordError::InvalidHash | PasswordError::InvalidParams(_)) => {
                warn!(
                    variant = %variant,
                    account_id = account.id,
                    "Stored credentials are corrupt"
                );
                Err(TutorlinkError::AuthFailed)
            }
            Err(e) => Err(e.into()),
        }
    }
}
