use thiserror::Error;

pub const MIN_EMAIL_LENGTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email is required")]
    Missing,
    #[error("Email too short")]
    TooShort,
    #[error("Email must contain @")]
    NoAt,
    #[error("Invalid email format")]
    Format,
    #[error("Email domain must contain a dot")]
    DomainWithoutDot,
}

/// Returns the trimmed, lower-cased address if it looks like an email.
pub fn validate_email(raw: &str) -> Result<String, EmailError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(EmailError::Missing);
    }
    if email.chars().count() < MIN_EMAIL_LENGTH {
        return Err(EmailError::TooShort);
    }
    if !email.contains('@') {
        return Err(EmailError::NoAt);
    }

    let parts: Vec<&str> = email.split('@').collect();
    let [local, domain] = parts.as_slice() else {
        return Err(EmailError::Format);
    };
    if local.is_empty() || domain.is_empty() {
        return Err(EmailError::Format);
    }
    if !domain.contains('.') {
        return Err(EmailError::DomainWithoutDot);
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_is_normalised() {
        assert_eq!(validate_email("  Jane@Example.COM "), Ok("jane@example.com".to_string()));
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(validate_email("   "), Err(EmailError::Missing));
        assert_eq!(validate_email("a@b"), Err(EmailError::TooShort));
        assert_eq!(validate_email("abcdef"), Err(EmailError::NoAt));
        assert_eq!(validate_email("a@b@c.com"), Err(EmailError::Format));
        assert_eq!(validate_email("@example.com"), Err(EmailError::Format));
        assert_eq!(validate_email("jane@"), Err(EmailError::Format));
        assert_eq!(validate_email("jane@example"), Err(EmailError::DomainWithoutDot));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(EmailError::NoAt.to_string(), "Email must contain @");
        assert_eq!(
            EmailError::DomainWithoutDot.to_string(),
            "Email domain must contain a dot"
        );
    }
}
