//! Field rules shared by request schemas.
//!
//! Messages are fragments; the validation gate prefixes them with the field
//! name ("email" + "is required").

use std::borrow::Cow;

use validator::{ValidateEmail, ValidationError};

pub const PSEUDO_MIN: usize = 3;
pub const PSEUDO_MAX: usize = 30;
pub const PASSWORD_MIN: usize = 8;
/// bcrypt ignores input past 72 bytes.
pub const PASSWORD_MAX_BYTES: usize = 72;
pub const NAME_MAX: usize = 50;

fn violation(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn required() -> ValidationError {
    violation("required", "is required")
}

pub fn email_address(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(required());
    }
    if !value.validate_email() {
        return Err(violation("email", "must be a valid email address"));
    }
    Ok(())
}

pub fn required_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(required());
    }
    Ok(())
}

pub fn person_name(value: &str) -> Result<(), ValidationError> {
    required_text(value)?;
    if value.chars().count() > NAME_MAX {
        return Err(violation(
            "length",
            format!("must be at most {} characters", NAME_MAX),
        ));
    }
    Ok(())
}

pub fn pseudo(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(required());
    }
    let len = value.chars().count();
    if !(PSEUDO_MIN..=PSEUDO_MAX).contains(&len) {
        return Err(violation(
            "length",
            format!(
                "must be between {} and {} characters",
                PSEUDO_MIN, PSEUDO_MAX
            ),
        ));
    }
    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(violation(
            "charset",
            "may only contain letters, digits, '-', '_' and '.'",
        ));
    }
    Ok(())
}

pub fn new_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(required());
    }
    if value.chars().count() < PASSWORD_MIN {
        return Err(violation(
            "length",
            format!("must be at least {} characters", PASSWORD_MIN),
        ));
    }
    if value.len() > PASSWORD_MAX_BYTES {
        return Err(violation(
            "length",
            format!("must be at most {} bytes", PASSWORD_MAX_BYTES),
        ));
    }
    let has_letter = value.chars().any(char::is_alphabetic);
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if !(has_letter && has_digit) {
        return Err(violation(
            "strength",
            "must contain at least one letter and one digit",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(result: Result<(), ValidationError>) -> String {
        result.unwrap_err().code.to_string()
    }

    #[test]
    fn test_email_address() {
        assert!(email_address("rider@example.com").is_ok());
        assert_eq!(code(email_address("")), "required");
        assert_eq!(code(email_address("rider.example.com")), "email");
    }

    #[test]
    fn test_pseudo() {
        assert!(pseudo("road_runner-42").is_ok());
        assert_eq!(code(pseudo("")), "required");
        assert_eq!(code(pseudo("ab")), "length");
        assert_eq!(code(pseudo(&"x".repeat(31))), "length");
        assert_eq!(code(pseudo("no spaces")), "charset");
    }

    #[test]
    fn test_new_password() {
        assert!(new_password("carpool2024").is_ok());
        assert_eq!(code(new_password("")), "required");
        assert_eq!(code(new_password("abc1")), "length");
        assert_eq!(code(new_password(&"a1".repeat(40))), "length");
        assert_eq!(code(new_password("onlyletters")), "strength");
        assert_eq!(code(new_password("12345678")), "strength");
    }

    #[test]
    fn test_person_name() {
        assert!(person_name("Zoé").is_ok());
        assert_eq!(code(person_name("   ")), "required");
        assert_eq!(code(person_name(&"n".repeat(51))), "length");
    }
}
