//! Account repository for tutorlink.
//!
//! Row-level access to the `students` and `tutors` tables. Both tables
//! share the credential columns; the profile columns differ and are
//! normalised into one row shape on read.

use super::account::{Account, NewAccount, Profile, Variant};
use super::DbPool;
use crate::{Result, TutorlinkError};

/// Columns selected for an account, padded so both tables decode into
/// [`AccountRow`].
pub(super) fn select_columns(variant: Variant) -> &'static str {
    match variant {
        Variant::Student => {
            "id, username, password_hash, salt, name, age, class_year, major,
             NULL AS area_of_expertise, NULL AS cost, created_at"
        }
        Variant::Tutor => {
            "id, username, password_hash, salt, name, age,
             NULL AS class_year, NULL AS major, area_of_expertise, cost, created_at"
        }
    }
}

/// Repository for account CRUD operations.
pub struct AccountRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new AccountRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new account.
    ///
    /// The UNIQUE constraint on `username` is the authoritative duplicate
    /// check; a violation surfaces as `DuplicateUsername`.
    pub async fn create(&self, new_account: &NewAccount) -> Result<Account> {
        let variant = new_account.variant;
        let columns = ProfileColumns::from_profile(new_account.profile.as_ref());

        if let Some(profile) = &new_account.profile {
            if profile.variant() != variant {
                return Err(TutorlinkError::InvalidInput(format!(
                    "{} profile cannot be attached to a {} account",
                    profile.variant(),
                    variant
                )));
            }
        }

        let query = match variant {
            Variant::Student => sqlx::query_scalar::<_, i64>(
                "INSERT INTO students (username, password_hash, salt, name, age, class_year, major)
                 VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
            )
            .bind(&new_account.username)
            .bind(&new_account.password_hash)
            .bind(&new_account.salt)
            .bind(columns.name)
            .bind(columns.age)
            .bind(columns.class_year)
            .bind(columns.major),
            Variant::Tutor => sqlx::query_scalar::<_, i64>(
                "INSERT INTO tutors (username, password_hash, salt, name, age, area_of_expertise, cost)
                 VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
            )
            .bind(&new_account.username)
            .bind(&new_account.password_hash)
            .bind(&new_account.salt)
            .bind(columns.name)
            .bind(columns.age)
            .bind(columns.area_of_expertise)
            .bind(columns.cost),
        };

        let id = query.fetch_one(self.pool).await.map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                TutorlinkError::DuplicateUsername(new_account.username.clone())
            }
            other => other.into(),
        })?;

        self.get_by_id(variant, id)
            .await?
            .ok_or_else(|| TutorlinkError::NotFound(variant.to_string()))
    }

    /// Get an account by id.
    pub async fn get_by_id(&self, variant: Variant, id: i64) -> Result<Option<Account>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?",
            select_columns(variant),
            variant.table()
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(|r| r.into_account(variant)))
    }

    /// Get an account by username (case-insensitive).
    pub async fn get_by_username(
        &self,
        variant: Variant,
        username: &str,
    ) -> Result<Option<Account>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE username = ? COLLATE NOCASE",
            select_columns(variant),
            variant.table()
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(username)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(|r| r.into_account(variant)))
    }

    /// List every account of a variant, ordered by id.
    pub async fn list(&self, variant: Variant) -> Result<Vec<Account>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id",
            select_columns(variant),
            variant.table()
        );
        let rows = sqlx::query_as::<_, AccountRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_account(variant)).collect())
    }

    /// Delete an account by id.
    ///
    /// Returns true if a row was deleted, false if not found.
    pub async fn delete(&self, variant: Variant, id: i64) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", variant.table());
        let result = sqlx::query(&sql).bind(id).execute(self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count accounts of a variant.
    pub async fn count(&self, variant: Variant) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", variant.table());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(self.pool).await?;
        Ok(count)
    }

    /// Check whether an account id resolves.
    pub async fn exists(&self, variant: Variant, id: i64) -> Result<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)", variant.table());
        let exists: bool = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(exists)
    }

    /// Check if a username is already taken (case-insensitive).
    pub async fn username_exists(&self, variant: Variant, username: &str) -> Result<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE username = ? COLLATE NOCASE)",
            variant.table()
        );
        let exists: bool = sqlx::query_scalar(&sql)
            .bind(username)
            .fetch_one(self.pool)
            .await?;
        Ok(exists)
    }
}

/// Profile fields flattened into nullable columns.
#[derive(Default)]
struct ProfileColumns {
    name: Option<String>,
    age: Option<i64>,
    class_year: Option<i64>,
    major: Option<String>,
    area_of_expertise: Option<String>,
    cost: Option<i64>,
}

impl ProfileColumns {
    fn from_profile(profile: Option<&Profile>) -> Self {
        match profile {
            None => Self::default(),
            Some(Profile::Student {
                name,
                age,
                class_year,
                major,
            }) => Self {
                name: Some(name.clone()),
                age: Some(i64::from(*age)),
                class_year: Some(i64::from(*class_year)),
                major: Some(major.clone()),
                ..Self::default()
            },
            Some(Profile::Tutor {
                name,
                age,
                area_of_expertise,
                cost,
            }) => Self {
                name: Some(name.clone()),
                age: Some(i64::from(*age)),
                area_of_expertise: Some(area_of_expertise.clone()),
                cost: Some(*cost),
                ..Self::default()
            },
        }
    }
}

/// Internal struct for mapping database rows to Account.
#[derive(sqlx::FromRow)]
pub(super) struct AccountRow {
    id: i64,
    username: String,
    password_hash: String,
    salt: String,
    name: Option<String>,
    age: Option<i64>,
    class_year: Option<i64>,
    major: Option<String>,
    area_of_expertise: Option<String>,
    cost: Option<i64>,
    created_at: String,
}

impl AccountRow {
    /// Profile is only reported when every field for the variant is present.
    fn profile(&self, variant: Variant) -> Option<Profile> {
        let name = self.name.clone()?;
        let age = u8::try_from(self.age?).ok()?;
        match variant {
            Variant::Student => Some(Profile::Student {
                name,
                age,
                class_year: u16::try_from(self.class_year?).ok()?,
                major: self.major.clone()?,
            }),
            Variant::Tutor => Some(Profile::Tutor {
                name,
                age,
                area_of_expertise: self.area_of_expertise.clone()?,
                cost: self.cost?,
            }),
        }
    }

    pub(super) fn into_account(self, variant: Variant) -> Account {
        let profile = self.profile(variant);
        Account {
            id: self.id,
            variant,
            username: self.username,
            password_hash: self.password_hash,
            salt: self.salt,
            profile,
            created_at: self.created_at,
        }
    }
}
