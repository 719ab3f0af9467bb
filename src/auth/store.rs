//! Credential store for tutorlink.
//!
//! Owns account records: registration with salted hashing, lookup,
//! listing and deletion.

use tracing::{debug, info};

use crate::auth::password::{generate_salt, hash_with_salt};
use crate::auth::validation::validate_registration;
use crate::config::HashingConfig;
use crate::db::{Account, AccountRef, AccountRepository, Database, NewAccount, Profile, Variant};
use crate::{Result, TutorlinkError};

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Account variant to create.
    pub variant: Variant,
    /// Desired username (trimmed before use).
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Optional profile; must match `variant`.
    pub profile: Option<Profile>,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(variant: Variant, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            variant,
            username: username.into(),
            password: password.into(),
            profile: None,
        }
    }

    /// Set the profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }
}

/// Run Argon2 off the async executor.
pub(crate) async fn hash_blocking(
    password: String,
    salt: String,
    config: HashingConfig,
) -> Result<String> {
    let hash = tokio::task::spawn_blocking(move || hash_with_salt(&password, &salt, &config))
        .await
        .map_err(|e| TutorlinkError::Hashing(e.to_string()))??;
    Ok(hash)
}

/// Store of student and tutor accounts.
pub struct CredentialStore<'a> {
    db: &'a Database,
    hashing: HashingConfig,
}

impl<'a> CredentialStore<'a> {
    /// Create a store over the given database, hashing new passwords with
    /// `hashing`.
    pub fn new(db: &'a Database, hashing: HashingConfig) -> Self {
        Self { db, hashing }
    }

    fn repo(&self) -> AccountRepository<'_> {
        AccountRepository::new(self.db.pool())
    }

    /// Create an account from bare credentials.
    ///
    /// Fails with `InvalidInput` for empty fields and `DuplicateUsername`
    /// when the name is taken within `variant`.
    pub async fn create_account(
        &self,
        variant: Variant,
        username: &str,
        password: &str,
    ) -> Result<AccountRef> {
        let account = self
            .register(RegistrationRequest::new(variant, username, password))
            .await?;
        Ok(account.account_ref())
    }

    /// Register a new account.
    ///
    /// This function:
    /// 1. Validates all input fields
    /// 2. Rejects a username that is already taken (cheap pre-check)
    /// 3. Generates a fresh salt and hashes the password
    /// 4. Inserts the row; the UNIQUE constraint settles concurrent races
    pub async fn register(&self, request: RegistrationRequest) -> Result<Account> {
        let variant = request.variant;
        let username =
            validate_registration(&request.username, &request.password, request.profile.as_ref())?;

        if let Some(profile) = &request.profile {
            if profile.variant() != variant {
                return Err(TutorlinkError::InvalidInput(format!(
                    "{} profile cannot be attached to a {} account",
                    profile.variant(),
                    variant
                )));
            }
        }

        let repo = self.repo();
        if repo.username_exists(variant, username).await? {
            return Err(TutorlinkError::DuplicateUsername(username.to_string()));
        }

        let salt = generate_salt().as_str().to_string();
        let password_hash =
            hash_blocking(request.password.clone(), salt.clone(), self.hashing.clone()).await?;

        let mut new_account = NewAccount::new(variant, username, password_hash, salt);
        if let Some(profile) = request.profile {
            new_account = new_account.with_profile(profile);
        }

        let account = repo.create(&new_account).await?;

        info!(
            variant = %variant,
            username = %account.username,
            account_id = account.id,
            "New account registered"
        );

        Ok(account)
    }

    /// Look up an account by username within a variant.
    pub async fn lookup_by_username(&self, variant: Variant, username: &str) -> Result<Account> {
        let username = username.trim();
        if username.is_empty() {
            return Err(TutorlinkError::NotFound(variant.to_string()));
        }

        debug!(variant = %variant, username = %username, "Looking up account");
        self.repo()
            .get_by_username(variant, username)
            .await?
            .ok_or_else(|| TutorlinkError::NotFound(variant.to_string()))
    }

    /// Get an account by reference.
    pub async fn get(&self, account: AccountRef) -> Result<Account> {
        self.repo()
            .get_by_id(account.variant, account.id)
            .await?
            .ok_or_else(|| TutorlinkError::NotFound(account.variant.to_string()))
    }

    /// Check whether an account reference resolves.
    pub async fn exists(&self, account: AccountRef) -> Result<bool> {
        self.repo().exists(account.variant, account.id).await
    }

    /// List all accounts of a variant, ordered by id.
    pub async fn list(&self, variant: Variant) -> Result<Vec<Account>> {
        self.repo().list(variant).await
    }

    /// Count accounts of a variant.
    pub async fn count(&self, variant: Variant) -> Result<i64> {
        self.repo().count(variant).await
    }

    /// Delete an account.
    ///
    /// Hiring relations that mention it are left as they are.
    pub async fn delete(&self, account: AccountRef) -> Result<()> {
        if !self.repo().delete(account.variant, account.id).await? {
            return Err(TutorlinkError::NotFound(account.variant.to_string()));
        }
        info!(account = %account, "Account deleted");
        Ok(())
    }
}
