//! Input validation for tutorlink registration.
//!
//! Form fields arrive untrusted from the web layer. Usernames are trimmed
//! before use; passwords are taken verbatim.

use thiserror::Error;

use crate::db::Profile;

/// Maximum username length (characters).
pub const MAX_USERNAME_LENGTH: usize = 64;

/// Maximum password length (characters).
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length of names, majors and areas of expertise (characters).
pub const MAX_TEXT_FIELD_LENGTH: usize = 100;

/// Largest accepted age (two digits).
pub const MAX_AGE: u8 = 99;

/// Largest accepted class year (four digits).
pub const MAX_CLASS_YEAR: u16 = 9999;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Username is empty.
    #[error("username is required")]
    UsernameEmpty,

    /// Username is too long.
    #[error("username must be at most {MAX_USERNAME_LENGTH} characters")]
    UsernameTooLong,

    /// Username contains control characters.
    #[error("username contains invalid characters")]
    UsernameInvalidChars,

    /// Password is empty.
    #[error("password is required")]
    PasswordEmpty,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    PasswordTooLong,

    /// A required text field is empty.
    #[error("{0} is required")]
    FieldEmpty(&'static str),

    /// A text field is too long.
    #[error("{0} must be at most {MAX_TEXT_FIELD_LENGTH} characters")]
    FieldTooLong(&'static str),

    /// Age out of range.
    #[error("age must be at most {MAX_AGE}")]
    AgeOutOfRange,

    /// Class year out of range.
    #[error("class year must be at most {MAX_CLASS_YEAR}")]
    ClassYearOutOfRange,

    /// Negative tutor cost.
    #[error("cost cannot be negative")]
    NegativeCost,
}

/// Validate a username and return its trimmed form.
///
/// # Examples
///
/// ```
/// use tutorlink::auth::validation::validate_username;
///
/// assert_eq!(validate_username("  alice ").unwrap(), "alice");
/// assert!(validate_username("   ").is_err());
/// ```
pub fn validate_username(username: &str) -> Result<&str, ValidationError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationError::UsernameEmpty);
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }
    if username.chars().any(|c| c.is_control()) {
        return Err(ValidationError::UsernameInvalidChars);
    }
    Ok(username)
}

/// Validate a password.
///
/// Any non-empty password up to the maximum length is accepted,
/// whitespace included.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordEmpty);
    }
    if password.chars().count() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooLong);
    }
    Ok(())
}

fn validate_text_field(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::FieldEmpty(field));
    }
    if value.chars().count() > MAX_TEXT_FIELD_LENGTH {
        return Err(ValidationError::FieldTooLong(field));
    }
    Ok(())
}

/// Validate profile fields.
pub fn validate_profile(profile: &Profile) -> Result<(), ValidationError> {
    match profile {
        Profile::Student {
            name,
            age,
            class_year,
            major,
        } => {
            validate_text_field(name, "name")?;
            if *age > MAX_AGE {
                return Err(ValidationError::AgeOutOfRange);
            }
            if *class_year > MAX_CLASS_YEAR {
                return Err(ValidationError::ClassYearOutOfRange);
            }
            validate_text_field(major, "major")?;
        }
        Profile::Tutor {
            name,
            age,
            area_of_expertise,
            cost,
        } => {
            validate_text_field(name, "name")?;
            if *age > MAX_AGE {
                return Err(ValidationError::AgeOutOfRange);
            }
            validate_text_field(area_of_expertise, "area of expertise")?;
            if *cost < 0 {
                return Err(ValidationError::NegativeCost);
            }
        }
    }
    Ok(())
}

/// Validate all registration fields at once.
///
/// Returns the trimmed username, or the first validation error.
pub fn validate_registration<'a>(
    username: &'a str,
    password: &str,
    profile: Option<&Profile>,
) -> Result<&'a str, ValidationError> {
    let username = validate_username(username)?;
    validate_password(password)?;
    if let Some(profile) = profile {
        validate_profile(profile)?;
    }
    Ok(username)
}
