//! Input validation helpers shared by the services.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppError;

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 50;
pub const PASSWORD_MIN: usize = 6;
// Upper bound keeps the plaintext inside a single hashing block.
pub const PASSWORD_MAX: usize = 72;
pub const SHORT_TEXT_MAX: usize = 255;
pub const DESCRIPTION_MAX: usize = 5000;
pub const SALARY_MAX: usize = 100;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Pragmatic shape check, not RFC 5322.
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap()
});

pub fn validate_username(username: &str) -> Result<(), AppError> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(AppError::validation(format!(
            "username must be between {USERNAME_MIN} and {USERNAME_MAX} characters"
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.chars().count() > SHORT_TEXT_MAX || !EMAIL_RE.is_match(email) {
        return Err(AppError::validation("email address is not valid"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    let len = password.chars().count();
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&len) {
        return Err(AppError::validation(format!(
            "password must be between {PASSWORD_MIN} and {PASSWORD_MAX} characters"
        )));
    }
    Ok(())
}

fn validate_short_text(value: &str, field: &str) -> Result<(), AppError> {
    let len = value.chars().count();
    if len == 0 || len > SHORT_TEXT_MAX {
        return Err(AppError::validation(format!(
            "{field} must be between 1 and {SHORT_TEXT_MAX} characters"
        )));
    }
    Ok(())
}

/// Validate the writable fields of a job payload.
pub fn validate_job_fields(
    title: &str,
    description: &str,
    location: &str,
    company: &str,
    salary: &str,
) -> Result<(), AppError> {
    validate_short_text(title, "title")?;
    validate_short_text(location, "location")?;
    validate_short_text(company, "company")?;

    let desc_len = description.chars().count();
    if desc_len == 0 || desc_len > DESCRIPTION_MAX {
        return Err(AppError::validation(format!(
            "description must be between 1 and {DESCRIPTION_MAX} characters"
        )));
    }

    if salary.is_empty() || salary.chars().count() > SALARY_MAX {
        return Err(AppError::validation(format!(
            "salary must be between 1 and {SALARY_MAX} characters"
        )));
    }
    Ok(())
}
