//! Verified identities and per-request context.

use crate::db::{AccountRef, Variant};
use crate::{Result, TutorlinkError};

/// An account whose credentials were verified.
///
/// Only [`AuthenticationService::authenticate`](super::AuthenticationService::authenticate)
/// produces one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    account: AccountRef,
    username: String,
}

impl AuthenticatedAccount {
    pub(crate) fn new(account: AccountRef, username: impl Into<String>) -> Self {
        Self {
            account,
            username: username.into(),
        }
    }

    /// Reference to the verified account.
    pub fn account(&self) -> AccountRef {
        self.account
    }

    pub fn id(&self) -> i64 {
        self.account.id
    }

    pub fn variant(&self) -> Variant {
        self.account.variant
    }

    /// Stored username (as registered, not as typed at login).
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Identity carried by a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    identity: Option<AuthenticatedAccount>,
}

impl RequestContext {
    /// A context with no verified identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A context acting as `account`.
    pub fn authenticated(account: AuthenticatedAccount) -> Self {
        Self {
            identity: Some(account),
        }
    }

    pub fn identity(&self) -> Option<&AuthenticatedAccount> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// The verified identity, or `Unauthenticated`.
    pub fn require_identity(&self) -> Result<&AuthenticatedAccount> {
        self.identity.as_ref().ok_or(TutorlinkError::Unauthenticated)
    }
}
