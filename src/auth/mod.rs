//! Authentication module for tutorlink.
//!
//! This module provides salted password hashing, the credential store,
//! credential verification and the per-request identity context.

mod context;
mod password;
mod service;
mod store;
pub mod validation;

pub use context::{AuthenticatedAccount, RequestContext};
pub use password::{generate_salt, hash_with_salt, verify_with_salt, PasswordError};
pub use service::AuthenticationService;
pub use store::{CredentialStore, RegistrationRequest};
pub use validation::ValidationError;
