//! Form checks for sign-in, sign-up and upload
//!
//! Messages are user-facing and shown verbatim by the front end.

use thiserror::Error;

use crate::models::{Credentials, Registration};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingCredentials,

    #[error("Full name is required")]
    FullNameRequired,

    #[error("Username is required")]
    UsernameRequired,

    #[error("Username must be at least 3 characters")]
    UsernameTooShort,

    #[error("Email is required")]
    EmailRequired,

    #[error("Please enter a valid email")]
    InvalidEmail,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please enter a title for your video")]
    TitleRequired,
}

/// Both fields must be non-blank
pub fn validate_credentials(credentials: &Credentials) -> Result<(), ValidationError> {
    if credentials.email.trim().is_empty() || credentials.password.trim().is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

/// Checks run in form order; the first failure wins
pub fn validate_registration(
    registration: &Registration,
    confirm_password: &str,
) -> Result<(), ValidationError> {
    if registration.full_name.trim().is_empty() {
        return Err(ValidationError::FullNameRequired);
    }
    if registration.username.trim().is_empty() {
        return Err(ValidationError::UsernameRequired);
    }
    if registration.username.chars().count() < MIN_USERNAME_LEN {
        return Err(ValidationError::UsernameTooShort);
    }
    if registration.email.trim().is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !registration.email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    if registration.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if registration.password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    Ok(())
}

/// Split free text like "#travel food, #music" into `#`-prefixed tags.
///
/// Order is preserved and case-insensitive duplicates are dropped.
pub fn parse_hashtags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for raw in input.split(|c: char| c.is_whitespace() || c == ',') {
        let word = raw.trim_start_matches('#');
        if word.is_empty() {
            continue;
        }
        let tag = format!("#{}", word);
        if !tags.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            tags.push(tag);
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            full_name: "Sam Rivera".to_string(),
            username: "samr".to_string(),
            email: "sam@example.com".to_string(),
            password: "secret1".to_string(),
            phone: None,
        }
    }

    #[test]
    fn test_blank_credentials_rejected() {
        let err = validate_credentials(&Credentials::new("  ", "pw")).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all fields");
        assert!(validate_credentials(&Credentials::new("a@b.c", "pw")).is_ok());
    }

    #[test]
    fn test_valid_registration() {
        assert!(validate_registration(&registration(), "secret1").is_ok());
    }

    #[test]
    fn test_registration_first_failure_wins() {
        let mut reg = registration();
        reg.full_name.clear();
        reg.username = "ab".to_string();
        assert_eq!(
            validate_registration(&reg, "secret1"),
            Err(ValidationError::FullNameRequired)
        );
    }

    #[test]
    fn test_registration_messages() {
        let mut reg = registration();
        reg.username = "ab".to_string();
        let err = validate_registration(&reg, "secret1").unwrap_err();
        assert_eq!(err.to_string(), "Username must be at least 3 characters");

        let mut reg = registration();
        reg.email = "sam.example.com".to_string();
        assert_eq!(
            validate_registration(&reg, "secret1"),
            Err(ValidationError::InvalidEmail)
        );

        let mut reg = registration();
        reg.password = "12345".to_string();
        let err = validate_registration(&reg, "12345").unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");

        assert_eq!(
            validate_registration(&registration(), "secret2"),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_title_required() {
        assert_eq!(validate_title(" "), Err(ValidationError::TitleRequired));
        assert!(validate_title("My trip").is_ok());
    }

    #[test]
    fn test_parse_hashtags() {
        assert_eq!(
            parse_hashtags("#travel food, #music  #Travel ##"),
            vec!["#travel", "#food", "#music"]
        );
        assert!(parse_hashtags("   ").is_empty());
    }
}
