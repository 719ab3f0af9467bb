//! E2E account tests for tutorlink.
//!
//! Tests registration and login flows for both account variants.

mod common;

use common::{fast_hashing, register, setup_db, setup_file_db};
use tutorlink::{
    AuthenticationService, CredentialStore, Database, Profile, RegistrationRequest,
    TutorlinkError, Variant,
};

/// Create then authenticate returns the created account.
#[tokio::test]
async fn test_register_then_login() {
    let db = setup_db().await;

    let student = register(&db, Variant::Student, "alice", "pw123").await;
    let tutor = register(&db, Variant::Tutor, "bob", "pw456").await;

    let auth = AuthenticationService::new(&db, fast_hashing());
    let alice = auth
        .authenticate(Variant::Student, "alice", "pw123")
        .await
        .unwrap();
    let bob = auth
        .authenticate(Variant::Tutor, "bob", "pw456")
        .await
        .unwrap();

    assert_eq!(alice.account(), student);
    assert_eq!(bob.account(), tutor);
}

/// Wrong password and unknown user are indistinguishable.
#[tokio::test]
async fn test_login_failures() {
    let db = setup_db().await;
    register(&db, Variant::Student, "alice", "pw123").await;

    let auth = AuthenticationService::new(&db, fast_hashing());

    let wrong = auth
        .authenticate(Variant::Student, "alice", "pw124")
        .await
        .unwrap_err();
    let unknown = auth
        .authenticate(Variant::Student, "mallory", "pw123")
        .await
        .unwrap_err();

    assert!(matches!(wrong, TutorlinkError::AuthFailed));
    assert!(matches!(unknown, TutorlinkError::AuthFailed));
    assert_eq!(wrong.to_string(), unknown.to_string());
}

/// Equal passwords never produce equal stored records.
#[tokio::test]
async fn test_same_password_different_salts() {
    let db = setup_db().await;
    let store = CredentialStore::new(&db, fast_hashing());

    let a = register(&db, Variant::Student, "one", "shared").await;
    let b = register(&db, Variant::Tutor, "two", "shared").await;

    let a = store.get(a).await.unwrap();
    let b = store.get(b).await.unwrap();
    assert_ne!(a.salt, b.salt);
    assert_ne!(a.password_hash, b.password_hash);
    assert!(!a.password_hash.contains("shared"));
}

/// Duplicate usernames are rejected per variant only.
#[tokio::test]
async fn test_duplicate_username() {
    let db = setup_db().await;
    let store = CredentialStore::new(&db, fast_hashing());

    register(&db, Variant::Student, "alice", "pw123").await;

    let result = store
        .create_account(Variant::Student, "alice", "different")
        .await;
    assert!(matches!(result, Err(TutorlinkError::DuplicateUsername(_))));

    let result = store
        .create_account(Variant::Student, "ALICE", "different")
        .await;
    assert!(matches!(result, Err(TutorlinkError::DuplicateUsername(_))));

    assert_eq!(store.count(Variant::Student).await.unwrap(), 1);

    // The tutor namespace is separate.
    store
        .create_account(Variant::Tutor, "alice", "pw123")
        .await
        .unwrap();
    assert_eq!(store.count(Variant::Tutor).await.unwrap(), 1);
}

/// Empty fields are rejected on registration.
#[tokio::test]
async fn test_register_empty_fields() {
    let db = setup_db().await;
    let store = CredentialStore::new(&db, fast_hashing());

    for (username, password) in [("", "pw"), ("name", ""), ("  ", "pw")] {
        let result = store
            .create_account(Variant::Tutor, username, password)
            .await;
        assert!(matches!(result, Err(TutorlinkError::InvalidInput(_))));
    }
    assert_eq!(store.count(Variant::Tutor).await.unwrap(), 0);
}

/// Profiles registered with the account survive a round trip.
#[tokio::test]
async fn test_register_with_profiles() {
    let db = setup_db().await;
    let store = CredentialStore::new(&db, fast_hashing());

    let student_profile = Profile::student("Alon", 20, 2022, "Computer Science");
    let tutor_profile = Profile::tutor("Shawn", 20, "Computer Science", 10);

    store
        .register(
            RegistrationRequest::new(Variant::Student, "aloniliber", "oliu")
                .with_profile(student_profile.clone()),
        )
        .await
        .unwrap();
    store
        .register(
            RegistrationRequest::new(Variant::Tutor, "shawn22", "shawn")
                .with_profile(tutor_profile.clone()),
        )
        .await
        .unwrap();

    let student = store
        .lookup_by_username(Variant::Student, "aloniliber")
        .await
        .unwrap();
    let tutor = store
        .lookup_by_username(Variant::Tutor, "shawn22")
        .await
        .unwrap();

    assert_eq!(student.profile, Some(student_profile));
    assert_eq!(tutor.profile, Some(tutor_profile));
}

/// Accounts persist across reopening a file database.
#[tokio::test]
async fn test_accounts_persist_across_reopen() {
    let (dir, db) = setup_file_db().await;
    let id = register(&db, Variant::Student, "alice", "pw123").await;
    db.close().await;
    drop(db);

    let db = Database::open(dir.path().join("tutorlink.db")).await.unwrap();
    let account = AuthenticationService::new(&db, fast_hashing())
        .authenticate(Variant::Student, "alice", "pw123")
        .await
        .unwrap();
    assert_eq!(account.account(), id);
}
