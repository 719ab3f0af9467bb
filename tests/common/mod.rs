//! Test helpers for integration tests.
//!
//! Provides database setup, cheap hashing parameters and login helpers.

#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;

use tutorlink::{
    AccountRef, AuthenticationService, CredentialStore, Database, HashingConfig, RequestContext,
    Variant,
};

/// Argon2 parameters small enough to keep tests fast.
pub fn fast_hashing() -> HashingConfig {
    HashingConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}

/// Open a fresh in-memory database.
pub async fn setup_db() -> Database {
    Database::open_in_memory().await.unwrap()
}

/// Open a fresh on-disk database shared through an `Arc`.
///
/// The returned `TempDir` must outlive the database.
pub async fn setup_file_db() -> (TempDir, Arc<Database>) {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("tutorlink.db")).await.unwrap();
    (dir, Arc::new(db))
}

/// Register an account and return its reference.
pub async fn register(
    db: &Database,
    variant: Variant,
    username: &str,
    password: &str,
) -> AccountRef {
    CredentialStore::new(db, fast_hashing())
        .create_account(variant, username, password)
        .await
        .unwrap()
}

/// Authenticate and wrap the identity in a request context.
pub async fn login(
    db: &Database,
    variant: Variant,
    username: &str,
    password: &str,
) -> RequestContext {
    let account = AuthenticationService::new(db, fast_hashing())
        .authenticate(variant, username, password)
        .await
        .unwrap();
    RequestContext::authenticated(account)
}
