use crate::utils::error::{RegistryError, Result};

/// Minimal shape check: non-empty, contains '@', and the part after the
/// last '@' contains a dot. Intentionally loose; the import paths that
/// require an email use this as their only format gate.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() {
        return false;
    }
    match email.rsplit_once('@') {
        Some((_, domain)) => domain.contains('.'),
        None => false,
    }
}

/// At least 10 characters once spaces, hyphens and plus signs are stripped.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '+'))
        .collect();
    digits.len() >= 10
}

pub fn is_valid_location(location: &str) -> bool {
    location.trim().len() > 3
}

/// Dedup keys compare trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegistryError::ConfigError {
            field: field_name.to_string(),
            message: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<()> {
    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str());

    match extension {
        Some(ext) if allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)) => Ok(()),
        _ => Err(RegistryError::UnsupportedFileType {
            filename: filename.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@a.com"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("bad-email"));
        assert!(!is_valid_email("user@nodot"));
        // the part after the *last* '@' is what needs a dot
        assert!(!is_valid_email("user@a.b@nodot"));
        assert!(is_valid_email("user@nodot@a.b"));
    }

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("0123456789"));
        assert!(is_valid_phone("+91 98765-43210"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("+ - + -"));
    }

    #[test]
    fn test_is_valid_location() {
        assert!(is_valid_location("Mumbai"));
        assert!(!is_valid_location("NY"));
        assert!(!is_valid_location("  ab  "));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  User@Example.COM "), "user@example.com");
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("hospitals.csv", &["csv"]).is_ok());
        assert!(validate_file_extension("hospitals.CSV", &["csv"]).is_ok());
        assert!(validate_file_extension("hospitals.xlsx", &["csv"]).is_err());
        assert!(validate_file_extension("hospitals", &["csv"]).is_err());
    }
}
