//! Client-side credential validation.
//!
//! Runs before any request is issued so malformed input never reaches the
//! identity service. Each check maps to one form field; strength scoring
//! feeds the live meter shown while a password is typed.

use thiserror::Error;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Shape check for an email address: one `@`, a non-empty local part, and
/// a dotted domain. The identity service is the real authority; this only
/// catches typos before a round-trip.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ValidationError::InvalidEmail);
    };

    if local.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_confirmation(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Weak,
    Fair,
    Good,
    Strong,
}

impl std::fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordStrength::Weak => write!(f, "Weak"),
            PasswordStrength::Fair => write!(f, "Fair"),
            PasswordStrength::Good => write!(f, "Good"),
            PasswordStrength::Strong => write!(f, "Strong"),
        }
    }
}

/// Score a password for live form feedback. One point each for: meeting
/// the minimum length, 12+ characters, mixed case, a digit, a symbol.
pub fn password_strength(password: &str) -> PasswordStrength {
    let len = password.chars().count();
    let mut score = 0;

    if len >= MIN_PASSWORD_LEN {
        score += 1;
    }
    if len >= 12 {
        score += 1;
    }
    if password.chars().any(|c| c.is_uppercase()) && password.chars().any(|c| c.is_lowercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_alphanumeric()) {
        score += 1;
    }

    match score {
        0 | 1 => PasswordStrength::Weak,
        2 => PasswordStrength::Fair,
        3 | 4 => PasswordStrength::Good,
        _ => PasswordStrength::Strong,
    }
}
