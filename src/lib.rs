//! tutorlink - student/tutor accounts and hiring relations
//!
//! Salted password storage and verification for two account types, plus
//! the rules governing which student has hired which tutor.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod hiring;
pub mod logging;

pub use auth::{
    generate_salt, hash_with_salt, verify_with_salt, AuthenticatedAccount, AuthenticationService,
    CredentialStore, PasswordError, RegistrationRequest, RequestContext, ValidationError,
};
pub use config::{Config, HashingConfig};
pub use db::{
    Account, AccountRef, AccountRepository, Database, HiringRelation, NewAccount, Profile,
    RelationRepository, Variant,
};
pub use error::{Result, TutorlinkError};
pub use hiring::HiringRelationManager;
