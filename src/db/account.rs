//! Account model for tutorlink.
//!
//! Students and tutors share one account shape, tagged by [`Variant`].

use std::fmt;
use std::str::FromStr;

/// Which kind of account a record is.
///
/// Each variant lives in its own table with its own id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// An account that hires tutors.
    Student,
    /// An account that can be hired.
    Tutor,
}

impl Variant {
    /// Convert variant to its string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Student => "student",
            Variant::Tutor => "tutor",
        }
    }

    /// Table holding accounts of this variant.
    pub(crate) fn table(&self) -> &'static str {
        match self {
            Variant::Student => "students",
            Variant::Tutor => "tutors",
        }
    }

    /// The variant on the other side of a hiring relation.
    pub fn counterpart(&self) -> Variant {
        match self {
            Variant::Student => Variant::Tutor,
            Variant::Tutor => Variant::Student,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Variant::Student),
            "tutor" => Ok(Variant::Tutor),
            _ => Err(format!("unknown account variant: {s}")),
        }
    }
}

/// A (variant, id) pair naming one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountRef {
    /// Account variant.
    pub variant: Variant,
    /// Row id within the variant's table.
    pub id: i64,
}

impl AccountRef {
    /// Reference a student account.
    pub fn student(id: i64) -> Self {
        Self {
            variant: Variant::Student,
            id,
        }
    }

    /// Reference a tutor account.
    pub fn tutor(id: i64) -> Self {
        Self {
            variant: Variant::Tutor,
            id,
        }
    }
}

impl fmt::Display for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.variant, self.id)
    }
}

/// Optional descriptive data collected at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profile {
    /// Student profile.
    Student {
        name: String,
        age: u8,
        class_year: u16,
        major: String,
    },
    /// Tutor profile.
    Tutor {
        name: String,
        age: u8,
        area_of_expertise: String,
        /// Price of hiring the tutor, in whole currency units.
        cost: i64,
    },
}

impl Profile {
    /// Build a student profile.
    pub fn student(
        name: impl Into<String>,
        age: u8,
        class_year: u16,
        major: impl Into<String>,
    ) -> Self {
        Profile::Student {
            name: name.into(),
            age,
            class_year,
            major: major.into(),
        }
    }

    /// Build a tutor profile.
    pub fn tutor(
        name: impl Into<String>,
        age: u8,
        area_of_expertise: impl Into<String>,
        cost: i64,
    ) -> Self {
        Profile::Tutor {
            name: name.into(),
            age,
            area_of_expertise: area_of_expertise.into(),
            cost,
        }
    }

    /// The account variant this profile belongs to.
    pub fn variant(&self) -> Variant {
        match self {
            Profile::Student { .. } => Variant::Student,
            Profile::Tutor { .. } => Variant::Tutor,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            Profile::Student { name, .. } | Profile::Tutor { name, .. } => name,
        }
    }
}

/// A persisted account.
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique id within the variant.
    pub id: i64,
    /// Account variant.
    pub variant: Variant,
    /// Login username (unique within the variant, case-insensitive).
    pub username: String,
    /// Argon2id PHC hash of the password.
    pub password_hash: String,
    /// B64 salt the hash was computed with.
    pub salt: String,
    /// Profile data, if any was supplied at registration.
    pub profile: Option<Profile>,
    /// Creation timestamp.
    pub created_at: String,
}

impl Account {
    /// The (variant, id) reference for this account.
    pub fn account_ref(&self) -> AccountRef {
        AccountRef {
            variant: self.variant,
            id: self.id,
        }
    }
}

/// Data for inserting a new account row.
///
/// The password must already be hashed; see `auth::CredentialStore`.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Account variant.
    pub variant: Variant,
    /// Login username.
    pub username: String,
    /// Argon2id PHC hash.
    pub password_hash: String,
    /// B64 salt used for `password_hash`.
    pub salt: String,
    /// Optional profile; must match `variant`.
    pub profile: Option<Profile>,
}

impl NewAccount {
    /// Create a new account record with the required credential fields.
    pub fn new(
        variant: Variant,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        salt: impl Into<String>,
    ) -> Self {
        Self {
            variant,
            username: username.into(),
            password_hash: password_hash.into(),
            salt: salt.into(),
            profile: None,
        }
    }

    /// Attach a profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }
}
